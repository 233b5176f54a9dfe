//! Infrastructure layer - external adapters and integrations.
//!
//! This layer provides adapters for:
//! - Storage implementations (in-memory, DashMap backed)
//! - The assembled pickup delivery service

pub mod service;
pub mod storage;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// pickup-postage = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
