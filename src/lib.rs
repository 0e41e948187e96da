//! # model-rules
//!
//! Per-model authorization rule registry.
//!
//! Applications declare named rules for their model types at startup. Each
//! rule binds a codename to a member of the model that implements the check
//! (a property, a predicate method or a schema field). Authorization code
//! later looks rules up by `(codename, model)` and evaluates the bound
//! member on an instance.
//!
//! This crate stores and validates rule *metadata*. Evaluating the bound
//! member is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use model_rules::{ModelSchema, RuleRegistration, RuleRegistry};
//!
//! let post = ModelSchema::builder("blog", "Post")
//!     .field("title")
//!     .foreign_key("author")
//!     .property("is_published")
//!     .method("is_author", 2) // self + user
//!     .build()
//!     .unwrap();
//!
//! let rules = RuleRegistry::new();
//!
//! // field_name defaults to the codename
//! rules.register(&post, RuleRegistration::new("is_published")).unwrap();
//!
//! rules
//!     .register(
//!         &post,
//!         RuleRegistration::new("can_edit")
//!             .field_name("is_author")
//!             .view_param_pk("post_id")
//!             .description("Authors may edit their own posts"),
//!     )
//!     .unwrap();
//!
//! let rule = rules.get("can_edit", post.model()).unwrap();
//! assert_eq!(rule.field_name(), "is_author");
//! assert_eq!(rule.view_param_pk(), "post_id");
//! ```
//!
//! ## Validation
//!
//! Registration resolves the rule's `field_name` against the model:
//! attributes, properties and methods first, then declared schema fields.
//!
//! - A name that resolves to nothing fails with
//!   [`RulesError::NonexistentFieldName`].
//! - A method declaring more than two parameters (the receiver plus one
//!   caller-supplied argument) fails with [`RulesError::TooManyParameters`].
//!
//! Failed registrations leave the registry unchanged.
//!
//! ```rust
//! # use model_rules::{ModelSchema, RuleRegistration, RuleRegistry, RulesError};
//! let post = ModelSchema::builder("blog", "Post")
//!     .method("check_acl", 3)
//!     .build()
//!     .unwrap();
//! let rules = RuleRegistry::new();
//!
//! let err = rules.register(&post, RuleRegistration::new("can_view")).unwrap_err();
//! assert!(err.is_nonexistent_field());
//!
//! let err = rules
//!     .register(&post, RuleRegistration::new("can_view").field_name("check_acl"))
//!     .unwrap_err();
//! assert!(matches!(err, RulesError::TooManyParameters { .. }));
//! assert!(rules.is_empty());
//! ```
//!
//! ## Overwriting
//!
//! Registering the same codename twice for a model replaces the earlier rule
//! and logs a `tracing` warning. Mark intentional replacements with
//! [`RuleRegistration::allow_overwrite`], or turn the warning off for a whole
//! registry with [`RuleRegistryBuilder::with_overwrite_warnings`].
//!
//! ## Custom Model Metadata
//!
//! [`ModelSchema`] covers models described by hand. To plug in an existing
//! metadata source, implement the [`ModelMeta`] port directly.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`ModelType`],
//!   [`RulePermission`] and [`RuleRegistration`], so rule declarations can
//!   live in configuration files
//! - `test-helpers`: exposes `infrastructure::mocks` for asserting on logs

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    error::{Result, RulesError},
    member::{BoundField, MemberHandle, MemberKind, SchemaField, MAX_PREDICATE_PARAMS},
    model::ModelType,
    rule::{RulePermission, RuleRegistration},
};

pub use application::{
    metrics::{Metrics, MetricsSnapshot},
    ports::{ModelMeta, RuleStorage},
    registry::{resolve_bound_field, RuleRegistry, RuleRegistryBuilder},
};

pub use infrastructure::{
    schema::{ModelSchema, ModelSchemaBuilder, SchemaError},
    storage::ShardedRuleStorage,
};
