//! Property-Based Test Generators
//!
//! Proptest strategies producing claim data that satisfies the storage
//! invariants (positive two-decimal values, well-formed codes and dates).

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::ClaimId;
use domain_claims::Claim;

use crate::builders::TestClaimBuilder;

/// Strategy for positive claim values with two decimal places
pub fn claim_value_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for service dates between 2000 and 2030
pub fn service_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..11_000i64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

/// Strategy for procedure or diagnosis codes matching `[A-Z0-9-]{3,20}`
pub fn code_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9][A-Z0-9-]{2,19}"
}

/// Strategy for CPF numbers in `XXX.XXX.XXX-XX` form
pub fn cpf_strategy() -> impl Strategy<Value = String> {
    "[0-9]{3}\\.[0-9]{3}\\.[0-9]{3}-[0-9]{2}"
}

/// Strategy for free-text names, including characters XML must escape
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-zÀ-ú&<>' ]{2,40}"
}

/// Strategy for complete claims referencing the standard patient, provider and plan
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        1i64..1_000_000i64,
        claim_value_strategy(),
        service_date_strategy(),
        proptest::option::of(code_strategy()),
        proptest::option::of(code_strategy()),
    )
        .prop_map(|(id, value, date, procedure, diagnosis)| {
            TestClaimBuilder::new()
                .with_id(ClaimId::new(id))
                .with_value(value)
                .with_claim_date(date)
                .with_procedure_code(procedure.as_deref())
                .with_diagnosis_code(diagnosis.as_deref())
                .build()
        })
}
