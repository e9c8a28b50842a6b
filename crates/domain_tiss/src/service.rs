//! TISS service boundary
//!
//! The operations the outer layers call: provision the schema at startup,
//! generate a claim's document, validate documents and describe the schema.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::task::JoinError;
use tracing::{error, info, instrument, warn};

use core_kernel::{ClaimId, HealthCheckResult};

use crate::assembler::DocumentAssembler;
use crate::config::TissConfig;
use crate::error::TissError;
use crate::ports::ClaimsDataPort;
use crate::provisioner::{SchemaOrigin, SchemaProvisioner};
use crate::validator::{SchemaInfo, SchemaValidator, ValidationOutcome};

/// A generated document together with its validation result
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub claim_id: ClaimId,
    pub xml: String,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Claim-to-TISS operations over a data port and a schema directory
pub struct TissService {
    port: Arc<dyn ClaimsDataPort>,
    assembler: DocumentAssembler,
    provisioner: SchemaProvisioner,
    validator: SchemaValidator,
}

impl TissService {
    pub fn new(port: Arc<dyn ClaimsDataPort>, config: TissConfig) -> Self {
        let assembler = DocumentAssembler::new(Arc::clone(&port), config.placeholders.clone());
        let validator = SchemaValidator::new(config.schema_path());
        let provisioner = SchemaProvisioner::new(config);
        Self {
            port,
            assembler,
            provisioner,
            validator,
        }
    }

    /// Makes sure a schema file is on disk; call once at startup
    pub async fn ensure_ready(&self) -> Result<SchemaOrigin, TissError> {
        let origin = self.provisioner.ensure_schema().await?;
        if !self.is_schema_usable().await {
            warn!(
                path = %self.validator.schema_path().display(),
                "TISS schema on disk cannot be compiled; validation will report errors"
            );
        }
        Ok(origin)
    }

    /// Generates the TISS XML for a claim
    #[instrument(skip_all, fields(claim_id = %claim_id))]
    pub async fn generate(&self, claim_id: ClaimId) -> Result<String, TissError> {
        self.generate_on(claim_id, Utc::now().date_naive()).await
    }

    /// Generates with an explicit processing date; output is a pure
    /// function of the stored records and `processing_date`
    pub async fn generate_on(
        &self,
        claim_id: ClaimId,
        processing_date: NaiveDate,
    ) -> Result<String, TissError> {
        info!(claim_id = %claim_id, "Generating TISS document");
        match self.assembler.generate_on(claim_id, processing_date).await {
            Ok(xml) => {
                info!(claim_id = %claim_id, bytes = xml.len(), "TISS document generated");
                Ok(xml)
            }
            Err(e) => {
                error!(claim_id = %claim_id, error = %e, "TISS document generation failed");
                Err(e)
            }
        }
    }

    /// Generates a claim's document and validates it against the schema.
    ///
    /// Only lookup and serialization failures are errors; an invalid
    /// document is returned with `is_valid == false`.
    pub async fn generate_with_validation(
        &self,
        claim_id: ClaimId,
    ) -> Result<GeneratedDocument, TissError> {
        let xml = self.generate(claim_id).await?;
        let outcome = self.validate(xml.clone()).await;
        Ok(GeneratedDocument {
            claim_id,
            xml,
            is_valid: outcome.is_valid,
            errors: outcome.errors,
        })
    }

    /// Generates each claim in turn, one result per id in input order
    pub async fn generate_batch(&self, claim_ids: &[ClaimId]) -> Vec<Result<String, TissError>> {
        let mut results = Vec::with_capacity(claim_ids.len());
        for claim_id in claim_ids {
            results.push(self.generate(*claim_id).await);
        }
        results
    }

    /// Validates a document on the blocking pool; schema loading and
    /// compilation read from disk
    pub async fn validate(&self, xml: impl Into<String>) -> ValidationOutcome {
        let xml = xml.into();
        let outcome = self
            .on_blocking_pool(move |validator| validator.validate(&xml))
            .await
            .unwrap_or_else(task_failed);
        if !outcome.is_valid {
            warn!(error_count = outcome.errors.len(), "TISS document failed validation");
        }
        outcome
    }

    pub async fn validate_file(&self, path: impl AsRef<Path>) -> ValidationOutcome {
        let path = path.as_ref().to_path_buf();
        self.on_blocking_pool(move |validator| validator.validate_file(path))
            .await
            .unwrap_or_else(task_failed)
    }

    pub async fn schema_info(&self) -> SchemaInfo {
        self.on_blocking_pool(|validator| validator.schema_info())
            .await
            .unwrap_or_else(|e| SchemaInfo::error(e.to_string()))
    }

    pub async fn is_schema_usable(&self) -> bool {
        self.on_blocking_pool(|validator| validator.is_schema_usable())
            .await
            .unwrap_or(false)
    }

    async fn on_blocking_pool<T, F>(&self, work: F) -> Result<T, JoinError>
    where
        F: FnOnce(SchemaValidator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let validator = self.validator.clone();
        tokio::task::spawn_blocking(move || work(validator)).await
    }

    /// Health of the underlying data store
    pub async fn data_health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }

    /// Download name for a claim's document, e.g. `tiss_claim_7_20240315_143000.xml`
    pub fn document_filename(claim_id: ClaimId, at: DateTime<Utc>) -> String {
        format!("tiss_claim_{}_{}.xml", claim_id, at.format("%Y%m%d_%H%M%S"))
    }
}

fn task_failed(error: JoinError) -> ValidationOutcome {
    ValidationOutcome::invalid(vec![format!("Validation task failed: {error}")])
}
