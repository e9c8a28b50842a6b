//! TISS domain errors

use std::path::PathBuf;
use thiserror::Error;

use core_kernel::PortError;

/// Errors raised by document generation and schema provisioning.
///
/// Validation problems are never reported through this type; they come back
/// as a [`crate::ValidationOutcome`].
#[derive(Debug, Error)]
pub enum TissError {
    /// The claim, or one of the records it references, does not exist
    #[error("{entity_type} with ID {id} not found")]
    NotFound { entity_type: &'static str, id: i64 },

    /// The data-access port failed for a reason other than a missing record
    #[error("Data access error: {0}")]
    DataAccess(#[from] PortError),

    /// The element tree could not be written out
    #[error("XML serialization error: {0}")]
    Serialization(String),

    /// The schema directory or the fallback schema could not be written
    #[error("Failed to provision schema at {}: {source}", path.display())]
    Provisioning {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TissError {
    pub fn not_found(entity_type: &'static str, id: impl Into<i64>) -> Self {
        TissError::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TissError::NotFound { .. })
    }
}
