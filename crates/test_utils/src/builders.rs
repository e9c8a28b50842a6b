//! Test Data Builders
//!
//! Builder patterns for constructing claim and party records with sensible
//! defaults. Tests set only the fields they care about.
//!
//! Builders construct records directly rather than through
//! `Claim::register`, so tests can also produce rows the write path would
//! reject (a zero value, for instance) to check how generation copes.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use core_kernel::{ClaimId, HealthPlanId, PatientId, ProviderId};
use domain_claims::{Claim, ClaimStatus};
use domain_party::{HealthPlan, Patient, Provider, ProviderType};

use crate::fixtures::{DateFixtures, IdFixtures, StringFixtures, ValueFixtures};

/// Builder for constructing test claims
pub struct TestClaimBuilder {
    id: ClaimId,
    patient_id: PatientId,
    provider_id: ProviderId,
    plan_id: HealthPlanId,
    procedure_code: Option<String>,
    diagnosis_code: Option<String>,
    claim_date: NaiveDate,
    value: Decimal,
    description: Option<String>,
    status: ClaimStatus,
    created_at: DateTime<Utc>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a new builder for the standard consultation claim
    pub fn new() -> Self {
        Self {
            id: IdFixtures::claim_id(),
            patient_id: IdFixtures::patient_id(),
            provider_id: IdFixtures::provider_id(),
            plan_id: IdFixtures::health_plan_id(),
            procedure_code: Some(StringFixtures::procedure_code().to_string()),
            diagnosis_code: Some(StringFixtures::diagnosis_code().to_string()),
            claim_date: DateFixtures::service_date(),
            value: ValueFixtures::consultation(),
            description: Some("Consulta médica".to_string()),
            status: ClaimStatus::Pending,
            created_at: DateFixtures::created_at(),
        }
    }

    pub fn with_id(mut self, id: ClaimId) -> Self {
        self.id = id;
        self
    }

    pub fn with_patient_id(mut self, id: PatientId) -> Self {
        self.patient_id = id;
        self
    }

    pub fn with_provider_id(mut self, id: ProviderId) -> Self {
        self.provider_id = id;
        self
    }

    pub fn with_plan_id(mut self, id: HealthPlanId) -> Self {
        self.plan_id = id;
        self
    }

    pub fn with_procedure_code(mut self, code: Option<&str>) -> Self {
        self.procedure_code = code.map(str::to_string);
        self
    }

    pub fn with_diagnosis_code(mut self, code: Option<&str>) -> Self {
        self.diagnosis_code = code.map(str::to_string);
        self
    }

    pub fn with_claim_date(mut self, date: NaiveDate) -> Self {
        self.claim_date = date;
        self
    }

    /// Sets the value as given, without rounding or positivity checks
    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = value;
        self
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Claim {
        Claim {
            id: self.id,
            patient_id: self.patient_id,
            provider_id: self.provider_id,
            plan_id: self.plan_id,
            procedure_code: self.procedure_code,
            diagnosis_code: self.diagnosis_code,
            claim_date: self.claim_date,
            value: self.value,
            description: self.description,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Builder for constructing test patients
pub struct TestPatientBuilder {
    patient: Patient,
}

impl Default for TestPatientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPatientBuilder {
    pub fn new() -> Self {
        Self {
            patient: Patient {
                id: IdFixtures::patient_id(),
                name: StringFixtures::patient_name().to_string(),
                cpf: StringFixtures::cpf().to_string(),
                birth_date: DateFixtures::birth_date(),
                address: "Rua das Flores, 123, São Paulo - SP".to_string(),
                phone: "(11) 98765-4321".to_string(),
                email: "maria.silva@example.com".to_string(),
            },
        }
    }

    pub fn with_id(mut self, id: PatientId) -> Self {
        self.patient.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.patient.name = name.into();
        self
    }

    pub fn with_cpf(mut self, cpf: impl Into<String>) -> Self {
        self.patient.cpf = cpf.into();
        self
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.patient.birth_date = date;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.patient.email = email.into();
        self
    }

    pub fn build(self) -> Patient {
        self.patient
    }
}

/// Builder for constructing test providers
pub struct TestProviderBuilder {
    provider: Provider,
}

impl Default for TestProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProviderBuilder {
    pub fn new() -> Self {
        Self {
            provider: Provider {
                id: IdFixtures::provider_id(),
                name: StringFixtures::provider_name().to_string(),
                cnpj: StringFixtures::cnpj().to_string(),
                provider_type: ProviderType::Clinic,
                address: "Av. Paulista, 1000, São Paulo - SP".to_string(),
                contact: StringFixtures::provider_contact().to_string(),
                phone: Some("(11) 3333-4444".to_string()),
                email: Some("contato@saudetotal.com.br".to_string()),
                website: None,
                active: true,
            },
        }
    }

    pub fn with_id(mut self, id: ProviderId) -> Self {
        self.provider.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.provider.name = name.into();
        self
    }

    pub fn with_cnpj(mut self, cnpj: impl Into<String>) -> Self {
        self.provider.cnpj = cnpj.into();
        self
    }

    pub fn with_type(mut self, provider_type: ProviderType) -> Self {
        self.provider.provider_type = provider_type;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.provider.address = address.into();
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.provider.contact = contact.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.provider.active = false;
        self
    }

    pub fn build(self) -> Provider {
        self.provider
    }
}

/// Builder for constructing test health plans
pub struct TestHealthPlanBuilder {
    plan: HealthPlan,
}

impl Default for TestHealthPlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHealthPlanBuilder {
    pub fn new() -> Self {
        Self {
            plan: HealthPlan {
                id: IdFixtures::health_plan_id(),
                name: "Plano Premium".to_string(),
                operator_code: StringFixtures::operator_code().to_string(),
                registration_number: StringFixtures::registration_number().to_string(),
                description: Some("Cobertura nacional".to_string()),
                active: true,
            },
        }
    }

    pub fn with_id(mut self, id: HealthPlanId) -> Self {
        self.plan.id = id;
        self
    }

    pub fn with_operator_code(mut self, code: impl Into<String>) -> Self {
        self.plan.operator_code = code.into();
        self
    }

    pub fn with_registration_number(mut self, number: impl Into<String>) -> Self {
        self.plan.registration_number = number.into();
        self
    }

    pub fn build(self) -> HealthPlan {
        self.plan
    }
}
