//! Tests for domain_claims

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, HealthPlanId, PatientId, ProviderId};

use domain_claims::{Claim, ClaimError, ClaimStatus, NewClaim};

fn new_claim(value: Decimal) -> NewClaim {
    NewClaim {
        patient_id: PatientId::new(1),
        provider_id: ProviderId::new(2),
        plan_id: HealthPlanId::new(3),
        procedure_code: Some("10101012".to_string()),
        diagnosis_code: Some("J11".to_string()),
        claim_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        value,
        description: Some("Consulta em consultorio".to_string()),
    }
}

fn create_test_claim() -> Claim {
    Claim::register(ClaimId::new(7), new_claim(dec!(250.00))).unwrap()
}

// ============================================================================
// Registration Tests
// ============================================================================

mod registration_tests {
    use super::*;

    #[test]
    fn test_register_starts_pending() {
        let claim = create_test_claim();

        assert_eq!(claim.status, ClaimStatus::Pending);
        assert!(claim.is_pending());
        assert_eq!(claim.value, dec!(250.00));
        assert_eq!(claim.id, ClaimId::new(7));
    }

    #[test]
    fn test_register_rejects_zero_value() {
        let result = Claim::register(ClaimId::new(1), new_claim(dec!(0)));
        assert!(matches!(result, Err(ClaimError::NonPositiveValue(_))));
    }

    #[test]
    fn test_register_rejects_negative_value() {
        let result = Claim::register(ClaimId::new(1), new_claim(dec!(-10.00)));
        assert!(result.is_err());
    }

    #[test]
    fn test_register_rounds_to_cents() {
        let claim = Claim::register(ClaimId::new(1), new_claim(dec!(99.999))).unwrap();
        assert_eq!(claim.value, dec!(100.00));
    }

    #[test]
    fn test_register_rejects_short_code() {
        let mut input = new_claim(dec!(10));
        input.diagnosis_code = Some("J1".to_string());

        let err = Claim::register(ClaimId::new(1), input).unwrap_err();
        assert!(err.to_string().contains("diagnosis code"));
    }

    #[test]
    fn test_register_rejects_lowercase_code() {
        let mut input = new_claim(dec!(10));
        input.procedure_code = Some("abc-1".to_string());

        let err = Claim::register(ClaimId::new(1), input).unwrap_err();
        assert!(matches!(err, ClaimError::InvalidCode { field: "procedure code", .. }));
    }

    #[test]
    fn test_register_allows_missing_codes() {
        let mut input = new_claim(dec!(10));
        input.procedure_code = None;
        input.diagnosis_code = None;

        assert!(Claim::register(ClaimId::new(1), input).is_ok());
    }
}

// ============================================================================
// Status Lifecycle Tests
// ============================================================================

mod status_tests {
    use super::*;

    #[test]
    fn test_pending_to_approved_to_paid() {
        let mut claim = create_test_claim();

        claim.approve().unwrap();
        assert_eq!(claim.status, ClaimStatus::Approved);

        claim.mark_as_paid().unwrap();
        assert_eq!(claim.status, ClaimStatus::Paid);
        assert!(claim.is_settled());
    }

    #[test]
    fn test_pending_to_denied() {
        let mut claim = create_test_claim();
        claim.deny().unwrap();
        assert!(claim.is_settled());
    }

    #[test]
    fn test_pending_cannot_be_paid() {
        let mut claim = create_test_claim();

        let err = claim.mark_as_paid().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status transition from pending to paid"
        );
        assert_eq!(claim.status, ClaimStatus::Pending);
    }

    #[test]
    fn test_denied_is_terminal() {
        let mut claim = create_test_claim();
        claim.deny().unwrap();

        assert!(claim.approve().is_err());
        assert!(claim.mark_as_paid().is_err());
    }

    #[test]
    fn test_status_codes_round_trip() {
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Approved,
            ClaimStatus::Denied,
            ClaimStatus::Paid,
        ] {
            assert_eq!(status.as_str().parse::<ClaimStatus>().unwrap(), status);
        }
        assert!("closed".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ClaimStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}

proptest! {
    #[test]
    fn prop_positive_values_are_accepted(cents in 1i64..100_000_000i64) {
        let value = Decimal::new(cents, 2);
        let claim = Claim::register(ClaimId::new(1), new_claim(value)).unwrap();
        prop_assert_eq!(claim.value, value);
    }
}
