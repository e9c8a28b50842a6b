//! Pre-built Test Fixtures
//!
//! Ready-to-use records for the claim scenarios the TISS suite relies on.
//! Values are fixed so generated documents are predictable.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, HealthPlanId, PatientId, ProviderId};

use crate::builders::{
    TestClaimBuilder, TestHealthPlanBuilder, TestPatientBuilder, TestProviderBuilder,
};
use crate::in_memory::ClaimScenario;

/// Fixture for dates used across scenarios
pub struct DateFixtures;

impl DateFixtures {
    /// Service date of the standard claim (Mar 15, 2024)
    pub fn service_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Processing date stamped on generated documents (Mar 20, 2024)
    pub fn processing_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    /// Birth date of the standard patient
    pub fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 6, 15).unwrap()
    }

    /// Fixed creation instant for claim records
    pub fn created_at() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
    }
}

/// Fixture for identifiers of the standard scenario
pub struct IdFixtures;

impl IdFixtures {
    pub fn claim_id() -> ClaimId {
        ClaimId::new(7)
    }

    pub fn patient_id() -> PatientId {
        PatientId::new(1)
    }

    pub fn provider_id() -> ProviderId {
        ProviderId::new(2)
    }

    pub fn health_plan_id() -> HealthPlanId {
        HealthPlanId::new(3)
    }
}

/// Fixture for string values of the standard scenario
pub struct StringFixtures;

impl StringFixtures {
    pub fn patient_name() -> &'static str {
        "Maria Silva"
    }

    pub fn cpf() -> &'static str {
        "123.456.789-00"
    }

    pub fn provider_name() -> &'static str {
        "Clínica Saúde Total"
    }

    pub fn cnpj() -> &'static str {
        "12.345.678/0001-90"
    }

    pub fn provider_contact() -> &'static str {
        "Dr. João Santos"
    }

    pub fn operator_code() -> &'static str {
        "PREMIUM001"
    }

    pub fn registration_number() -> &'static str {
        "ANS-123456"
    }

    pub fn procedure_code() -> &'static str {
        "10101012"
    }

    pub fn diagnosis_code() -> &'static str {
        "J11"
    }
}

/// Fixture for claim values
pub struct ValueFixtures;

impl ValueFixtures {
    /// Value of the standard consultation claim
    pub fn consultation() -> Decimal {
        dec!(250.00)
    }

    /// Value of a high-cost procedure
    pub fn surgery() -> Decimal {
        dec!(18750.40)
    }
}

/// Complete claim scenarios
pub struct ClaimsDataFixtures;

impl ClaimsDataFixtures {
    /// Claim 7: a 250.00 consultation for Maria Silva at a clinic on the
    /// PREMIUM001 plan
    pub fn maria_silva_scenario() -> ClaimScenario {
        ClaimScenario {
            claim: TestClaimBuilder::new().build(),
            patient: TestPatientBuilder::new().build(),
            provider: TestProviderBuilder::new().build(),
            health_plan: TestHealthPlanBuilder::new().build(),
        }
    }

    /// A second, unrelated claim with its own patient, provider and plan
    pub fn surgery_scenario() -> ClaimScenario {
        ClaimScenario {
            claim: TestClaimBuilder::new()
                .with_id(ClaimId::new(42))
                .with_patient_id(PatientId::new(11))
                .with_provider_id(ProviderId::new(12))
                .with_plan_id(HealthPlanId::new(13))
                .with_value(ValueFixtures::surgery())
                .with_procedure_code(Some("30715016"))
                .with_diagnosis_code(Some("K80-1"))
                .with_description(None)
                .build(),
            patient: TestPatientBuilder::new()
                .with_id(PatientId::new(11))
                .with_name("José Pereira")
                .with_cpf("987.654.321-00")
                .build(),
            provider: TestProviderBuilder::new()
                .with_id(ProviderId::new(12))
                .with_name("Hospital Central")
                .with_cnpj("98.765.432/0001-10")
                .build(),
            health_plan: TestHealthPlanBuilder::new()
                .with_id(HealthPlanId::new(13))
                .with_operator_code("BASIC002")
                .build(),
        }
    }
}
