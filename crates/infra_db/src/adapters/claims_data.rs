//! PostgreSQL Claims Data Adapter
//!
//! The internal (database) implementation of `ClaimsDataPort`. Each lookup
//! loads one row through [`TissRecordsRepository`] and converts it into the
//! domain record; an absent row is `Ok(None)` so the service decides how
//! to report it.
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimsDataAdapter;
//! use domain_tiss::ClaimsDataPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ClaimsDataPort> = Arc::new(PostgresClaimsDataAdapter::new(pool));
//! let claim = port.find_claim(ClaimId::new(7)).await?;
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    ClaimId, DomainPort, HealthCheckResult, HealthCheckable, HealthPlanId, PatientId, PortError,
    ProviderId,
};
use domain_claims::{Claim, ClaimStatus};
use domain_party::{HealthPlan, Patient, Provider, ProviderType};
use domain_tiss::ClaimsDataPort;

use crate::error::DatabaseError;
use crate::repositories::tiss::{
    ClaimRow, HealthPlanRow, PatientRow, ProviderRow, TissRecordsRepository,
};

const ADAPTER_ID: &str = "postgres-claims-data-adapter";

/// PostgreSQL-backed implementation of [`ClaimsDataPort`]
///
/// Database failures surface as `PortError::Connection` (pool exhausted,
/// server unreachable), `PortError::Transformation` (a stored value the
/// domain rejects) or `PortError::Internal`.
#[derive(Debug, Clone)]
pub struct PostgresClaimsDataAdapter {
    repository: TissRecordsRepository,
}

impl PostgresClaimsDataAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TissRecordsRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresClaimsDataAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimsDataAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.repository.pool())
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => {
                let mut check =
                    HealthCheckResult::unhealthy(ADAPTER_ID, format!("Database error: {}", e));
                check.latency_ms = latency_ms;
                check
            }
        }
    }
}

#[async_trait]
impl ClaimsDataPort for PostgresClaimsDataAdapter {
    #[instrument(skip(self), fields(claim_id = %id))]
    async fn find_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        let row = self.repository.find_claim(id.into()).await?;
        debug!(found = row.is_some(), "Claim lookup complete");
        Ok(row.map(row_to_claim).transpose()?)
    }

    #[instrument(skip(self), fields(patient_id = %id))]
    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>, PortError> {
        let row = self.repository.find_patient(id.into()).await?;
        Ok(row.map(row_to_patient))
    }

    #[instrument(skip(self), fields(provider_id = %id))]
    async fn find_provider(&self, id: ProviderId) -> Result<Option<Provider>, PortError> {
        let row = self.repository.find_provider(id.into()).await?;
        Ok(row.map(row_to_provider).transpose()?)
    }

    #[instrument(skip(self), fields(health_plan_id = %id))]
    async fn find_health_plan(&self, id: HealthPlanId) -> Result<Option<HealthPlan>, PortError> {
        let row = self.repository.find_health_plan(id.into()).await?;
        Ok(row.map(row_to_health_plan))
    }
}

// ============================================================================
// Row conversion
// ============================================================================

fn row_to_claim(row: ClaimRow) -> Result<Claim, DatabaseError> {
    let status: ClaimStatus = row
        .status
        .parse()
        .map_err(|e| DatabaseError::invalid_row("claims", row.id, e))?;

    Ok(Claim {
        id: ClaimId::new(row.id),
        patient_id: PatientId::new(row.patient_id),
        provider_id: ProviderId::new(row.provider_id),
        plan_id: HealthPlanId::new(row.health_plan_id),
        procedure_code: row.procedure_code,
        diagnosis_code: row.diagnosis_code,
        claim_date: row.claim_date,
        value: row.value,
        description: row.description,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_patient(row: PatientRow) -> Patient {
    Patient {
        id: PatientId::new(row.id),
        name: row.name,
        cpf: row.cpf,
        birth_date: row.birth_date,
        address: row.address,
        phone: row.phone,
        email: row.email,
    }
}

fn row_to_provider(row: ProviderRow) -> Result<Provider, DatabaseError> {
    let provider_type: ProviderType = row
        .provider_type
        .parse()
        .map_err(|e| DatabaseError::invalid_row("providers", row.id, e))?;

    Ok(Provider {
        id: ProviderId::new(row.id),
        name: row.name,
        cnpj: row.cnpj,
        provider_type,
        address: row.address,
        contact: row.contact,
        phone: row.phone,
        email: row.email,
        website: row.website,
        active: row.active,
    })
}

fn row_to_health_plan(row: HealthPlanRow) -> HealthPlan {
    HealthPlan {
        id: HealthPlanId::new(row.id),
        name: row.name,
        operator_code: row.operator_code,
        registration_number: row.registration_number,
        description: row.description,
        active: row.active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn claim_row(status: &str) -> ClaimRow {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        ClaimRow {
            id: 7,
            patient_id: 1,
            provider_id: 2,
            health_plan_id: 3,
            procedure_code: Some("10101012".into()),
            diagnosis_code: None,
            claim_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            value: dec!(250.00),
            description: None,
            status: status.into(),
            created_at: at,
            updated_at: at,
        }
    }

    fn provider_row(provider_type: &str) -> ProviderRow {
        ProviderRow {
            id: 2,
            name: "Clínica Saúde Total".into(),
            cnpj: "12.345.678/0001-90".into(),
            provider_type: provider_type.into(),
            address: "Av. Paulista, 1000".into(),
            contact: "Dr. João Santos".into(),
            phone: None,
            email: None,
            website: None,
            active: true,
        }
    }

    #[test]
    fn test_claim_row_maps_ids_and_status() {
        let claim = row_to_claim(claim_row("approved")).unwrap();
        assert_eq!(claim.id, ClaimId::new(7));
        assert_eq!(claim.plan_id, HealthPlanId::new(3));
        assert_eq!(claim.status, ClaimStatus::Approved);
        assert_eq!(claim.value, dec!(250.00));
        assert!(claim.diagnosis_code.is_none());
    }

    #[test]
    fn test_unknown_claim_status_rejected() {
        let err = row_to_claim(claim_row("lost")).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidRow { table: "claims", id: 7, .. }));
    }

    #[test]
    fn test_provider_type_parsed() {
        let provider = row_to_provider(provider_row("imaging_center")).unwrap();
        assert_eq!(provider.provider_type, ProviderType::ImagingCenter);
    }

    #[test]
    fn test_unknown_provider_type_is_transformation_error() {
        let err = row_to_provider(provider_row("spa")).unwrap_err();
        let port: PortError = err.into();
        assert!(matches!(port, PortError::Transformation { .. }));
    }

    #[test]
    fn test_health_plan_row_copied_verbatim() {
        let plan = row_to_health_plan(HealthPlanRow {
            id: 3,
            name: "Plano Premium".into(),
            operator_code: "PREMIUM001".into(),
            registration_number: "ANS-123456".into(),
            description: None,
            active: false,
        });
        assert_eq!(plan.operator_code, "PREMIUM001");
        assert!(!plan.active);
    }
}
