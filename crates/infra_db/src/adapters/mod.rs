//! Domain Adapters
//!
//! Implementations of domain ports over the PostgreSQL repositories.

pub mod claims_data;

pub use claims_data::PostgresClaimsDataAdapter;
