//! Mock implementations for testing.
//!
//! This module provides test doubles for asserting on the registry's
//! diagnostics.

pub mod layer;

pub use layer::{CapturedEvent, MockCaptureLayer};
