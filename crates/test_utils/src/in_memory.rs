//! In-Memory Claims Data Adapter
//!
//! A `ClaimsDataPort` backed by hash maps, for tests that exercise the TISS
//! service without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use core_kernel::{
    ClaimId, DomainPort, HealthCheckResult, HealthCheckable, HealthPlanId, PatientId, PortError,
    ProviderId,
};
use domain_claims::Claim;
use domain_party::{HealthPlan, Patient, Provider};
use domain_tiss::ClaimsDataPort;

const ADAPTER_ID: &str = "in_memory_claims_data";

#[derive(Default)]
struct Tables {
    claims: HashMap<ClaimId, Claim>,
    patients: HashMap<PatientId, Patient>,
    providers: HashMap<ProviderId, Provider>,
    health_plans: HashMap<HealthPlanId, HealthPlan>,
}

/// In-memory store implementing [`ClaimsDataPort`]
#[derive(Default)]
pub struct InMemoryClaimsData {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryClaimsData {
    pub fn new() -> Self {
        Self::default()
    }

    // Tests never panic while holding the lock, so a poisoned lock still has consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert_claim(&self, claim: Claim) {
        self.write().claims.insert(claim.id, claim);
    }

    pub fn insert_patient(&self, patient: Patient) {
        self.write().patients.insert(patient.id, patient);
    }

    pub fn insert_provider(&self, provider: Provider) {
        self.write().providers.insert(provider.id, provider);
    }

    pub fn insert_health_plan(&self, plan: HealthPlan) {
        self.write().health_plans.insert(plan.id, plan);
    }

    pub fn remove_patient(&self, id: PatientId) -> Option<Patient> {
        self.write().patients.remove(&id)
    }

    pub fn remove_provider(&self, id: ProviderId) -> Option<Provider> {
        self.write().providers.remove(&id)
    }

    pub fn remove_health_plan(&self, id: HealthPlanId) -> Option<HealthPlan> {
        self.write().health_plans.remove(&id)
    }

    /// Builder-style insert of a claim and the three records it references
    pub fn with_scenario(self, scenario: ClaimScenario) -> Self {
        self.insert_scenario(scenario);
        self
    }

    pub fn insert_scenario(&self, scenario: ClaimScenario) {
        let mut tables = self.write();
        tables.patients.insert(scenario.patient.id, scenario.patient);
        tables.providers.insert(scenario.provider.id, scenario.provider);
        tables.health_plans.insert(scenario.health_plan.id, scenario.health_plan);
        tables.claims.insert(scenario.claim.id, scenario.claim);
    }

    /// Makes every lookup fail with a connection error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn claim_count(&self) -> usize {
        self.read().claims.len()
    }

    fn check_available(&self) -> Result<(), PortError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PortError::connection("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

/// A claim plus the patient, provider and plan it points at
#[derive(Debug, Clone)]
pub struct ClaimScenario {
    pub claim: Claim,
    pub patient: Patient,
    pub provider: Provider,
    pub health_plan: HealthPlan,
}

impl DomainPort for InMemoryClaimsData {}

#[async_trait]
impl HealthCheckable for InMemoryClaimsData {
    async fn health_check(&self) -> HealthCheckResult {
        match self.check_available() {
            Ok(()) => HealthCheckResult::healthy(ADAPTER_ID, 0),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, e.to_string()),
        }
    }
}

#[async_trait]
impl ClaimsDataPort for InMemoryClaimsData {
    async fn find_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        self.check_available()?;
        Ok(self.read().claims.get(&id).cloned())
    }

    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>, PortError> {
        self.check_available()?;
        Ok(self.read().patients.get(&id).cloned())
    }

    async fn find_provider(&self, id: ProviderId) -> Result<Option<Provider>, PortError> {
        self.check_available()?;
        Ok(self.read().providers.get(&id).cloned())
    }

    async fn find_health_plan(&self, id: HealthPlanId) -> Result<Option<HealthPlan>, PortError> {
        self.check_available()?;
        Ok(self.read().health_plans.get(&id).cloned())
    }
}
