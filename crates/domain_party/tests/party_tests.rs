//! Tests for domain_party

use chrono::NaiveDate;

use core_kernel::{HealthPlanId, PatientId, ProviderId};

use domain_party::{HealthPlan, PartyValidator, Patient, Provider, ProviderType};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

// ============================================================================
// Patient Tests
// ============================================================================

mod patient_tests {
    use super::*;

    pub fn create_test_patient() -> Patient {
        Patient {
            id: PatientId::new(42),
            name: "Maria Silva".to_string(),
            cpf: "123.456.789-09".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
            address: "Rua das Flores, 123 - Sao Paulo".to_string(),
            phone: "(11) 99999-0000".to_string(),
            email: "maria.silva@example.com".to_string(),
        }
    }

    #[test]
    fn test_valid_patient() {
        let result = PartyValidator::validate_patient(&create_test_patient(), today());
        assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_patient_age() {
        assert_eq!(create_test_patient().age_on(today()), 38);
    }

    #[test]
    fn test_patient_invalid_cpf() {
        let mut patient = create_test_patient();
        patient.cpf = "12345678909".to_string();

        let result = PartyValidator::validate_patient(&patient, today());
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("CPF")));
    }

    #[test]
    fn test_patient_birth_date_in_future() {
        let mut patient = create_test_patient();
        patient.birth_date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

        let result = PartyValidator::validate_patient(&patient, today());
        assert!(result.errors.iter().any(|e| e.contains("future")));
    }

    #[test]
    fn test_patient_collects_all_errors() {
        let mut patient = create_test_patient();
        patient.name = "M".to_string();
        patient.address = "short".to_string();
        patient.email = "not-an-email".to_string();

        let result = PartyValidator::validate_patient(&patient, today());
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_patient_empty_phone_is_warning() {
        let mut patient = create_test_patient();
        patient.phone = "  ".to_string();

        let result = PartyValidator::validate_patient(&patient, today());
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }
}

// ============================================================================
// Provider Tests
// ============================================================================

mod provider_tests {
    use super::*;

    fn create_test_provider() -> Provider {
        Provider {
            id: ProviderId::new(3),
            name: "Hospital Central".to_string(),
            cnpj: "12.345.678/0001-90".to_string(),
            provider_type: ProviderType::Hospital,
            address: "Av. Paulista, 1000 - Sao Paulo".to_string(),
            contact: "Dr. Joao Souza".to_string(),
            phone: None,
            email: Some("contato@hospitalcentral.com.br".to_string()),
            website: None,
            active: true,
        }
    }

    #[test]
    fn test_valid_provider() {
        let result = PartyValidator::validate_provider(&create_test_provider());
        assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
    }

    #[test]
    fn test_provider_invalid_cnpj() {
        let mut provider = create_test_provider();
        provider.cnpj = "12345678000190".to_string();

        let result = PartyValidator::validate_provider(&provider);
        assert!(result.errors.iter().any(|e| e.contains("CNPJ")));
    }

    #[test]
    fn test_inactive_provider_is_warning() {
        let mut provider = create_test_provider();
        provider.active = false;

        let result = PartyValidator::validate_provider(&provider);
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("inactive")));
    }

    #[test]
    fn test_provider_type_codes() {
        for provider_type in [
            ProviderType::Hospital,
            ProviderType::Clinic,
            ProviderType::Laboratory,
            ProviderType::ImagingCenter,
            ProviderType::Specialist,
            ProviderType::GeneralPractitioner,
            ProviderType::Pharmacy,
            ProviderType::Ambulance,
            ProviderType::Other,
        ] {
            let parsed: ProviderType = provider_type.as_str().parse().unwrap();
            assert_eq!(parsed, provider_type);
        }
    }

    #[test]
    fn test_provider_type_unknown_code() {
        assert!("veterinary".parse::<ProviderType>().is_err());
    }

    #[test]
    fn test_provider_type_serde_matches_storage_code() {
        let json = serde_json::to_string(&ProviderType::ImagingCenter).unwrap();
        assert_eq!(json, "\"imaging_center\"");
    }
}

// ============================================================================
// Health Plan Tests
// ============================================================================

mod health_plan_tests {
    use super::*;

    #[test]
    fn test_valid_health_plan() {
        let plan = HealthPlan {
            id: HealthPlanId::new(1),
            name: "Plano Premium".to_string(),
            operator_code: "PREMIUM001".to_string(),
            registration_number: "ANS-123456".to_string(),
            description: None,
            active: true,
        };

        assert!(PartyValidator::validate_health_plan(&plan).is_valid);
    }

    #[test]
    fn test_health_plan_missing_codes() {
        let plan = HealthPlan {
            id: HealthPlanId::new(1),
            name: "Plano Premium".to_string(),
            operator_code: " ".to_string(),
            registration_number: String::new(),
            description: None,
            active: true,
        };

        let result = PartyValidator::validate_health_plan(&plan);
        assert_eq!(result.errors.len(), 2);
    }
}
