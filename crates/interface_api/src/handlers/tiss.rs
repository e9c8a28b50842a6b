//! Schema handlers

use axum::{extract::State, Json};

use domain_tiss::SchemaInfo;

use crate::dto::tiss::XmlValidationResponse;
use crate::{error::ApiError, AppState};

/// Validates a raw XML request body against the TISS schema
pub async fn validate_xml(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<XmlValidationResponse>, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest("Request body must contain an XML document".to_string()));
    }

    let outcome = state.tiss.validate(body).await;

    Ok(Json(XmlValidationResponse {
        is_valid: outcome.is_valid,
        errors: outcome.errors,
    }))
}

/// Describes the schema on disk; 503 until one is loaded
pub async fn get_schema_info(State(state): State<AppState>) -> Result<Json<SchemaInfo>, ApiError> {
    let info = state.tiss.schema_info().await;
    if !info.is_loaded() {
        let reason = info.message.as_deref().unwrap_or("unknown error");
        return Err(ApiError::Unavailable(format!("Schema not loaded: {reason}")));
    }
    Ok(Json(info))
}
