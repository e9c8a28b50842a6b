//! Flat Claim Records
//!
//! Older billing exports deliver one flat row per claim instead of the
//! normalized claim/patient/provider/plan records. This adapter expands a
//! flat row into a [`ClaimScenario`] so such exports can be replayed
//! through the regular TISS pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{ClaimId, HealthPlanId, PatientId, ProviderId};

use crate::builders::{
    TestClaimBuilder, TestHealthPlanBuilder, TestPatientBuilder, TestProviderBuilder,
};
use crate::in_memory::{ClaimScenario, InMemoryClaimsData};

/// One row of a flat claim export
#[derive(Debug, Clone)]
pub struct FlatClaimRecord {
    pub claim_number: i64,
    pub patient_name: String,
    pub birth_date: NaiveDate,
    pub provider_cnpj: String,
    /// Operator code, also used as the plan's ANS registration
    pub ans_code: String,
    pub total_amount: Decimal,
}

impl FlatClaimRecord {
    /// Expands the row; every derived record shares the claim number as its id
    pub fn into_scenario(self) -> ClaimScenario {
        let n = self.claim_number;
        ClaimScenario {
            claim: TestClaimBuilder::new()
                .with_id(ClaimId::new(n))
                .with_patient_id(PatientId::new(n))
                .with_provider_id(ProviderId::new(n))
                .with_plan_id(HealthPlanId::new(n))
                .with_value(self.total_amount)
                .build(),
            patient: TestPatientBuilder::new()
                .with_id(PatientId::new(n))
                .with_name(self.patient_name)
                .with_birth_date(self.birth_date)
                .build(),
            provider: TestProviderBuilder::new()
                .with_id(ProviderId::new(n))
                .with_cnpj(self.provider_cnpj)
                .build(),
            health_plan: TestHealthPlanBuilder::new()
                .with_id(HealthPlanId::new(n))
                .with_operator_code(self.ans_code.clone())
                .with_registration_number(self.ans_code)
                .build(),
        }
    }
}

/// Loads flat rows into an in-memory store, returning the claim ids in order
pub fn load_flat_records(
    store: &InMemoryClaimsData,
    records: impl IntoIterator<Item = FlatClaimRecord>,
) -> Vec<ClaimId> {
    records
        .into_iter()
        .map(|record| {
            let scenario = record.into_scenario();
            let id = scenario.claim.id;
            store.insert_scenario(scenario);
            id
        })
        .collect()
}
