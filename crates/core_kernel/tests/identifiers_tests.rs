//! Tests for typed identifiers

use core_kernel::{ClaimId, HealthPlanId, PatientId, ProviderId};
use proptest::prelude::*;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_value_round_trip() {
        let id = ClaimId::new(7);
        assert_eq!(id.value(), 7);
        assert_eq!(i64::from(id), 7);
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ClaimId::new(1024).to_string(), "1024");
    }

    #[test]
    fn test_entity_name() {
        assert_eq!(ClaimId::entity_name(), "Claim");
    }
}

mod entity_name_tests {
    use super::*;

    #[test]
    fn test_entity_names_are_distinct() {
        let names = vec![
            ClaimId::entity_name(),
            PatientId::entity_name(),
            ProviderId::entity_name(),
            HealthPlanId::entity_name(),
        ];

        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_health_plan_name_reads_naturally() {
        assert_eq!(HealthPlanId::entity_name(), "Health plan");
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&PatientId::new(42)).unwrap();
        assert_eq!(json, "42");

        let back: PatientId = serde_json::from_str("42").unwrap();
        assert_eq!(back, PatientId::new(42));
    }
}

proptest! {
    #[test]
    fn prop_display_then_parse_is_identity(raw in any::<i64>()) {
        let id = ProviderId::new(raw);
        let parsed: ProviderId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }
}
