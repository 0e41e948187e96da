//! Infrastructure layer - external adapters.
//!
//! This layer provides adapters for:
//! - Model metadata declared up front (`ModelSchema`)
//! - Storage implementations (sharded maps)

pub mod schema;
pub mod storage;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// model-rules = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
