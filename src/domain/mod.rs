//! Domain layer - pure business logic with no external dependencies.
//!
//! This layer contains the core concepts of the rule registry:
//! - Model type identity (the registry's partition key)
//! - Resolved members a rule can be bound to
//! - Rule descriptors and registration requests
//! - Registration errors
//!
//! All types in this layer are pure and easily testable.

pub mod error;
pub mod member;
pub mod model;
pub mod rule;
