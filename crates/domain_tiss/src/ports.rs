//! Data-access port consumed by the document assembler
//!
//! The storage layer owns patients, providers, health plans and claims; the
//! TISS domain only needs point lookups by id. Adapters:
//!
//! - `infra_db::PostgresClaimsDataAdapter` for the relational store
//! - `test_utils::InMemoryClaimsData` for tests
//!
//! ```rust,ignore
//! let port: Arc<dyn ClaimsDataPort> = Arc::new(PostgresClaimsDataAdapter::new(pool));
//! let service = TissService::new(port, TissConfig::default());
//! ```

use async_trait::async_trait;

use core_kernel::{
    ClaimId, DomainPort, HealthCheckable, HealthPlanId, PatientId, PortError, ProviderId,
};
use domain_claims::Claim;
use domain_party::{HealthPlan, Patient, Provider};

/// Read-only lookups over the claim and its related records.
///
/// A missing record is `Ok(None)`; `Err` is reserved for failures of the
/// underlying store.
#[async_trait]
pub trait ClaimsDataPort: DomainPort + HealthCheckable {
    async fn find_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>, PortError>;

    async fn find_provider(&self, id: ProviderId) -> Result<Option<Provider>, PortError>;

    async fn find_health_plan(&self, id: HealthPlanId) -> Result<Option<HealthPlan>, PortError>;
}
