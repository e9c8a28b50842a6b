//! Claims domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Claim value must be greater than zero, got {0}")]
    NonPositiveValue(Decimal),

    #[error("Invalid {field}: {reason}")]
    InvalidCode { field: &'static str, reason: String },

    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),
}
