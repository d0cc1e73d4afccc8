//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random claim data
//! that stays within domain invariants.

use domain_claims::MemberContext;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::MemberContextBuilder;

/// Strategy for generating claimable amounts with paise precision
///
/// Amounts range from the minimum claim amount up to well past the
/// per-claim limit, so both settlement and limit paths are exercised.
pub fn claim_amount_strategy() -> impl Strategy<Value = Decimal> {
    (50_000i64..1_500_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for generating year-to-date claim totals under the annual limit
pub fn previous_claims_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..4_500_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for generating same-day claim counts
pub fn same_day_claims_strategy() -> impl Strategy<Value = u32> {
    0u32..6u32
}

/// Strategy for generating last-month claim counts
pub fn claims_last_month_strategy() -> impl Strategy<Value = u32> {
    0u32..10u32
}

/// Strategy for generating diagnosis texts across coverage categories
pub fn covered_diagnosis_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Viral fever".to_string()),
        Just("Dental caries".to_string()),
        Just("Eye strain".to_string()),
        Just("Chronic joint pain".to_string()),
        Just("Migraine".to_string()),
        Just("Hypertension follow-up".to_string()),
    ]
}

/// Strategy for generating well-formed doctor registration numbers
pub fn doctor_reg_strategy() -> impl Strategy<Value = String> {
    ("[A-Z]{2,4}", 1000u32..999999u32, 1950u32..2025u32)
        .prop_map(|(council, serial, year)| format!("{}/{}/{}", council, serial, year))
}

/// Strategy for generating two-token patient names
pub fn patient_name_strategy() -> impl Strategy<Value = String> {
    ("[A-Z][a-z]{3,8}", "[A-Z][a-z]{3,8}").prop_map(|(first, last)| format!("{} {}", first, last))
}

/// Strategy for generating hospital names, network and otherwise
pub fn hospital_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Apollo Clinic".to_string()),
        Just("Fortis Hospital".to_string()),
        Just("Max Healthcare".to_string()),
        Just("City Nursing Home".to_string()),
        Just("Lotus Medical Centre".to_string()),
    ]
}

/// Strategy for generating member contexts with plausible claim history
pub fn member_context_strategy() -> impl Strategy<Value = MemberContext> {
    (
        claim_amount_strategy(),
        previous_claims_strategy(),
        same_day_claims_strategy(),
        claims_last_month_strategy(),
        hospital_strategy(),
    )
        .prop_map(|(amount, ytd, same_day, last_month, hospital)| {
            MemberContextBuilder::new()
                .with_claim_amount(amount)
                .with_previous_claims_ytd(ytd)
                .with_previous_claims_same_day(same_day)
                .with_claims_last_month(last_month)
                .with_hospital(hospital)
                .build()
        })
}
