//! TISS Document Domain
//!
//! Converts a stored claim into a TISS 3.05.00 XML message and validates the
//! result against an XSD schema.
//!
//! # Components
//!
//! - **Schema Provisioner** ([`provisioner`]): makes sure an XSD file exists,
//!   downloading the official copy or synthesizing a fallback schema
//! - **Document Assembler** ([`assembler`]): fetches a claim and its patient,
//!   provider and health plan through [`ports::ClaimsDataPort`] and fills the
//!   fixed TISS element tree
//! - **Schema Validator** ([`validator`]): compiles the XSD and reports
//!   line-numbered diagnostics for a candidate document
//!
//! # Flow
//!
//! ```text
//! claim id -> DocumentAssembler -> XML string -> SchemaValidator -> (is_valid, errors)
//! ```
//!
//! [`service::TissService`] ties the three together behind the boundary
//! operations consumed by the HTTP layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod document;
pub mod assembler;
pub mod fallback_schema;
pub mod provisioner;
pub mod xsd;
pub mod validator;
pub mod service;

pub use config::{PlaceholderDefaults, TissConfig};
pub use error::TissError;
pub use ports::ClaimsDataPort;
pub use assembler::{ClaimBundle, DocumentAssembler};
pub use provisioner::{SchemaOrigin, SchemaProvisioner};
pub use validator::{SchemaInfo, SchemaStatus, SchemaValidator, ValidationOutcome};
pub use service::{GeneratedDocument, TissService};

/// TISS standard version written on the root element
pub const TISS_VERSION: &str = "3.05.00";

/// Namespace of every TISS element
pub const TISS_NAMESPACE: &str = "http://www.ans.gov.br/padroes/tiss/schemas";

/// Prefix bound to [`TISS_NAMESPACE`] in generated documents
pub const TISS_PREFIX: &str = "ans";
