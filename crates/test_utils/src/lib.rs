//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! customer provisioning test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for customers and identities
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;

/// Installs a debug-level tracing subscriber once per test binary
pub fn init_test_tracing() {
    core_kernel::telemetry::init_tracing("debug");
}
