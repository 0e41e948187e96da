//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates registration and lookup:
//! - Rule registry (validation, storage, lookup)
//! - Metrics (registration and lookup counters)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod metrics;
pub mod ports;
pub mod registry;
