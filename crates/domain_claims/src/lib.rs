//! Claims Domain
//!
//! A claim is a billing record linking a patient, a provider and a health
//! plan for one procedure.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -> Approved -> Paid
//!    |
//!    +-----> Denied
//! ```

pub mod claim;
pub mod error;

pub use claim::{Claim, ClaimStatus, NewClaim};
pub use error::ClaimError;
