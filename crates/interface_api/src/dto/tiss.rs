//! TISS DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::ClaimId;
use domain_tiss::SchemaInfo;

/// A claim's generated document, inlined as a string
#[derive(Debug, Serialize)]
pub struct ClaimXmlResponse {
    pub claim_id: ClaimId,
    pub xml_content: String,
    pub filename: String,
    pub generated_at: DateTime<Utc>,
}

/// Validation result for a claim's generated document
#[derive(Debug, Serialize)]
pub struct ClaimValidationResponse {
    pub claim_id: ClaimId,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub schema_info: SchemaInfo,
}

/// Validation result for a submitted document
#[derive(Debug, Serialize)]
pub struct XmlValidationResponse {
    pub is_valid: bool,
    pub errors: Vec<String>,
}
