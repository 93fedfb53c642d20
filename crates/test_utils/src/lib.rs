//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! pet claims console test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data matching the console fixtures
//! - `builders`: Builder patterns for claims, stage lists and workflows
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
