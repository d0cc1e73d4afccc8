//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the adjudication pipeline. The
//! fixtures describe one coherent claim: the prescription, bill, and
//! member context all agree on patient, dates, and amounts, so a
//! default build passes every pipeline stage and individual tests
//! break exactly one thing at a time.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{FixedClock, MemberId};
use domain_claims::{Bill, BillItem, MemberContext, Prescription, TestReport};
use domain_policy::PolicyConfig;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Fixture for policy terms
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// Standard policy terms document used across the suite
    ///
    /// Effective 2023-01-01 with a 30-day initial waiting period,
    /// ailment waiting periods for cataract, hernia, and joint
    /// replacement, a 5000 per-claim limit, and a 50000 annual limit.
    pub fn standard_terms_json() -> &'static str {
        r#"{
            "effective_date": "2023-01-01",
            "currency": "INR",
            "waiting_periods": {
                "initial_waiting": 30,
                "specific_ailments": [
                    { "ailment": "cataract", "waiting_days": 730 },
                    { "ailment": "hernia", "waiting_days": 365 },
                    { "ailment": "joint replacement", "waiting_days": 1095 }
                ]
            },
            "coverage_details": {
                "per_claim_limit": 5000,
                "annual_limit": 50000,
                "diagnostic_tests": { "sub_limit": 10000 },
                "pharmacy": { "sub_limit": 5000 },
                "dental": { "sub_limit": 5000 },
                "vision": { "sub_limit": 5000 },
                "alternative_medicine": { "sub_limit": 5000 },
                "consultation_fees": { "copay_percentage": 20, "network_discount": 30 }
            },
            "claim_requirements": { "minimum_claim_amount": 500 }
        }"#
    }

    /// Parsed standard policy terms, shared the way the engine shares them
    pub fn standard_config() -> Arc<PolicyConfig> {
        Arc::new(
            PolicyConfig::from_json_str(Self::standard_terms_json())
                .expect("standard policy terms parse"),
        )
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard member join date, comfortably past the policy effective date
    pub fn join_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Standard treatment date, past the initial waiting period
    pub fn treatment_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// Instant at which test adjudications run
    pub fn adjudication_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 10, 30, 0).unwrap()
    }

    /// Fixed clock pinned to the adjudication instant
    ///
    /// Claim identifiers derive from the clock, so two runs against this
    /// clock produce identical decisions down to the id.
    pub fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(Self::adjudication_instant()))
    }
}

/// Fixture for extracted claim documents
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// A complete, internally consistent prescription
    pub fn valid_prescription() -> Prescription {
        Prescription {
            doctor_name: Some("Dr. Anil Mehta".to_string()),
            doctor_reg: Some("MH/12345/2020".to_string()),
            patient_name: Some("Rajesh Kumar".to_string()),
            patient_age: Some(35),
            diagnosis: Some("Viral fever".to_string()),
            medicines_prescribed: vec![
                "Paracetamol 500mg".to_string(),
                "Cetirizine 10mg".to_string(),
            ],
            tests_prescribed: Vec::new(),
            procedures: Vec::new(),
            treatment: None,
            treatment_date: Some("2024-06-15".to_string()),
        }
    }

    /// A consultation bill matching the valid prescription
    pub fn consultation_bill() -> Bill {
        Bill {
            hospital_name: Some("Apollo Clinic".to_string()),
            bill_number: Some("AP-2024-1043".to_string()),
            bill_date: Some("2024-06-15".to_string()),
            patient_name: Some("Rajesh Kumar".to_string()),
            total_amount: Some(dec!(1000)),
            items: vec![BillItem {
                name: "Consultation".to_string(),
                amount: dec!(1000),
            }],
            test_names: Vec::new(),
            teeth_whitening: None,
            diet_plan: None,
        }
    }

    /// A blood test report matching the valid prescription
    pub fn blood_test_report() -> TestReport {
        TestReport {
            lab_name: Some("Metropolis Labs".to_string()),
            patient_name: Some("Rajesh Kumar".to_string()),
            test_date: Some("2024-06-15".to_string()),
            tests_conducted: vec!["Complete Blood Count".to_string()],
            doctor_referred_by: Some("Dr. Anil Mehta".to_string()),
        }
    }
}

/// Fixture for member registry data
pub struct MemberFixtures;

impl MemberFixtures {
    /// An active member with no claim history, matching the valid documents
    pub fn active_member() -> MemberContext {
        MemberContext {
            member_id: Some(MemberId::new("MEM2024001")),
            member_name: Some("Rajesh Kumar".to_string()),
            member_join_date: Some(TemporalFixtures::join_date()),
            treatment_date: Some(TemporalFixtures::treatment_date()),
            claim_amount: Some(dec!(1000)),
            previous_claims_ytd: dec!(0),
            previous_claims_same_day: 0,
            claims_last_month: 0,
            hospital: Some("Apollo Clinic".to_string()),
            preauth_obtained: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_config_parses() {
        let config = PolicyFixtures::standard_config();
        assert_eq!(config.currency, Currency::INR);
        assert_eq!(config.coverage_details.per_claim_limit, dec!(5000));
    }

    #[test]
    fn test_documents_agree_on_patient_and_date() {
        let prescription = DocumentFixtures::valid_prescription();
        let bill = DocumentFixtures::consultation_bill();

        assert_eq!(prescription.patient_name, bill.patient_name);
        assert_eq!(prescription.treatment_date, bill.bill_date);
    }

    #[test]
    fn test_member_joined_after_policy_effective_date() {
        let config = PolicyFixtures::standard_config();
        assert!(TemporalFixtures::join_date() > config.effective_date);
    }
}
