//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the TISS
//! claims test suite.
//!
//! # Modules
//!
//! - `in_memory`: `ClaimsDataPort` adapter backed by hash maps
//! - `fixtures`: Pre-built records and complete claim scenarios
//! - `builders`: Builder patterns for test data construction
//! - `legacy`: Expansion of flat claim export rows into scenarios
//! - `assertions`: Custom assertion helpers for documents and outcomes
//! - `generators`: Property-based test data generators

pub mod in_memory;
pub mod fixtures;
pub mod builders;
pub mod legacy;
pub mod assertions;
pub mod generators;

pub use in_memory::*;
pub use fixtures::*;
pub use builders::*;
pub use legacy::*;
pub use assertions::*;
pub use generators::*;
