//! Repository implementations
//!
//! Plain SQL access to the tables, returning row types.

pub mod tiss;

pub use tiss::{ClaimRow, HealthPlanRow, PatientRow, ProviderRow, TissRecordsRepository};
