//! Claim document handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use core_kernel::ClaimId;
use domain_tiss::{GeneratedDocument, TissService};

use crate::dto::tiss::{ClaimValidationResponse, ClaimXmlResponse};
use crate::{error::ApiError, AppState};

/// Generates the claim's TISS document and refuses to hand out an invalid one
async fn valid_document(state: &AppState, id: ClaimId) -> Result<GeneratedDocument, ApiError> {
    let document = state.tiss.generate_with_validation(id).await?;
    if !document.is_valid {
        return Err(ApiError::InvalidDocument {
            errors: document.errors,
        });
    }
    Ok(document)
}

/// Returns the claim's TISS XML inside a JSON envelope
pub async fn get_claim_xml(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimXmlResponse>, ApiError> {
    let document = valid_document(&state, id).await?;
    let generated_at = Utc::now();

    Ok(Json(ClaimXmlResponse {
        claim_id: id,
        xml_content: document.xml,
        filename: TissService::document_filename(id, generated_at),
        generated_at,
    }))
}

/// Returns the claim's TISS XML as a file attachment
pub async fn download_claim_xml(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Response, ApiError> {
    let document = valid_document(&state, id).await?;
    let filename = TissService::document_filename(id, Utc::now());

    let headers = [
        (header::CONTENT_TYPE, "application/xml".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
    ];
    Ok((headers, document.xml).into_response())
}

/// Generates the claim's document and reports how it fares against the schema
pub async fn validate_claim_xml(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimValidationResponse>, ApiError> {
    let document = state.tiss.generate_with_validation(id).await?;

    Ok(Json(ClaimValidationResponse {
        claim_id: id,
        is_valid: document.is_valid,
        errors: document.errors,
        schema_info: state.tiss.schema_info().await,
    }))
}
