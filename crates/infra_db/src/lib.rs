//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the records a TISS guide is assembled from:
//! patients, providers, health plans and claims.
//!
//! # Architecture
//!
//! The repository layer runs plain SQL and returns row types; the adapter
//! layer converts rows into domain records and implements the
//! `ClaimsDataPort` the TISS service depends on.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresClaimsDataAdapter};
//!
//! let pool = create_pool(&DatabaseConfig::default())?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresClaimsDataAdapter::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::PostgresClaimsDataAdapter;
pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool, DEFAULT_DATABASE_URL};
