//! Test Data Builders
//!
//! Provides builder patterns for constructing claim documents, member
//! context, and policy terms with sensible defaults. Builders start from
//! the consistent fixtures, so tests specify only the fields they are
//! exercising.

use chrono::NaiveDate;
use core_kernel::MemberId;
use domain_claims::{Bill, BillItem, ClaimData, MemberContext, Prescription, TestReport};
use domain_policy::{AilmentWaitingPeriod, PolicyConfig};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::fixtures::{DocumentFixtures, MemberFixtures, PolicyFixtures};

/// Builder for constructing prescription documents
pub struct PrescriptionBuilder {
    doctor_name: Option<String>,
    doctor_reg: Option<String>,
    patient_name: Option<String>,
    patient_age: Option<u32>,
    diagnosis: Option<String>,
    medicines_prescribed: Vec<String>,
    tests_prescribed: Vec<String>,
    procedures: Vec<String>,
    treatment: Option<String>,
    treatment_date: Option<String>,
}

impl Default for PrescriptionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PrescriptionBuilder {
    /// Creates a builder seeded from the valid prescription fixture
    pub fn new() -> Self {
        let base = DocumentFixtures::valid_prescription();
        Self {
            doctor_name: base.doctor_name,
            doctor_reg: base.doctor_reg,
            patient_name: base.patient_name,
            patient_age: base.patient_age,
            diagnosis: base.diagnosis,
            medicines_prescribed: base.medicines_prescribed,
            tests_prescribed: base.tests_prescribed,
            procedures: base.procedures,
            treatment: base.treatment,
            treatment_date: base.treatment_date,
        }
    }

    /// Sets the doctor name
    pub fn with_doctor_name(mut self, name: impl Into<String>) -> Self {
        self.doctor_name = Some(name.into());
        self
    }

    /// Sets the doctor registration number
    pub fn with_doctor_reg(mut self, reg: impl Into<String>) -> Self {
        self.doctor_reg = Some(reg.into());
        self
    }

    /// Removes the doctor registration number
    pub fn without_doctor_reg(mut self) -> Self {
        self.doctor_reg = None;
        self
    }

    /// Sets the patient name
    pub fn with_patient_name(mut self, name: impl Into<String>) -> Self {
        self.patient_name = Some(name.into());
        self
    }

    /// Sets the diagnosis text
    pub fn with_diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.diagnosis = Some(diagnosis.into());
        self
    }

    /// Adds a prescribed test
    pub fn with_prescribed_test(mut self, test: impl Into<String>) -> Self {
        self.tests_prescribed.push(test.into());
        self
    }

    /// Adds a prescribed procedure
    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedures.push(procedure.into());
        self
    }

    /// Sets the single treatment line
    pub fn with_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = Some(treatment.into());
        self
    }

    /// Sets the extracted treatment date string
    pub fn with_treatment_date(mut self, date: impl Into<String>) -> Self {
        self.treatment_date = Some(date.into());
        self
    }

    /// Builds the prescription
    pub fn build(self) -> Prescription {
        Prescription {
            doctor_name: self.doctor_name,
            doctor_reg: self.doctor_reg,
            patient_name: self.patient_name,
            patient_age: self.patient_age,
            diagnosis: self.diagnosis,
            medicines_prescribed: self.medicines_prescribed,
            tests_prescribed: self.tests_prescribed,
            procedures: self.procedures,
            treatment: self.treatment,
            treatment_date: self.treatment_date,
        }
    }
}

/// Builder for constructing hospital bills
pub struct BillBuilder {
    hospital_name: Option<String>,
    bill_number: Option<String>,
    bill_date: Option<String>,
    patient_name: Option<String>,
    total_amount: Option<Decimal>,
    items: Vec<BillItem>,
    test_names: Vec<String>,
    teeth_whitening: Option<Decimal>,
    diet_plan: Option<Decimal>,
}

impl Default for BillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillBuilder {
    /// Creates a builder seeded from the consultation bill fixture
    pub fn new() -> Self {
        let base = DocumentFixtures::consultation_bill();
        Self {
            hospital_name: base.hospital_name,
            bill_number: base.bill_number,
            bill_date: base.bill_date,
            patient_name: base.patient_name,
            total_amount: base.total_amount,
            items: base.items,
            test_names: base.test_names,
            teeth_whitening: base.teeth_whitening,
            diet_plan: base.diet_plan,
        }
    }

    /// Sets the hospital name
    pub fn with_hospital_name(mut self, name: impl Into<String>) -> Self {
        self.hospital_name = Some(name.into());
        self
    }

    /// Removes the hospital name
    pub fn without_hospital_name(mut self) -> Self {
        self.hospital_name = None;
        self
    }

    /// Sets the patient name
    pub fn with_patient_name(mut self, name: impl Into<String>) -> Self {
        self.patient_name = Some(name.into());
        self
    }

    /// Sets the extracted bill date string
    pub fn with_bill_date(mut self, date: impl Into<String>) -> Self {
        self.bill_date = Some(date.into());
        self
    }

    /// Sets the bill total
    pub fn with_total_amount(mut self, amount: Decimal) -> Self {
        self.total_amount = Some(amount);
        self
    }

    /// Adds a line item
    pub fn with_item(mut self, name: impl Into<String>, amount: Decimal) -> Self {
        self.items.push(BillItem {
            name: name.into(),
            amount,
        });
        self
    }

    /// Clears all line items
    pub fn without_items(mut self) -> Self {
        self.items.clear();
        self
    }

    /// Adds a billed test name
    pub fn with_test_name(mut self, name: impl Into<String>) -> Self {
        self.test_names.push(name.into());
        self
    }

    /// Builds the bill
    pub fn build(self) -> Bill {
        Bill {
            hospital_name: self.hospital_name,
            bill_number: self.bill_number,
            bill_date: self.bill_date,
            patient_name: self.patient_name,
            total_amount: self.total_amount,
            items: self.items,
            test_names: self.test_names,
            teeth_whitening: self.teeth_whitening,
            diet_plan: self.diet_plan,
        }
    }
}

/// Builder for constructing the full extracted document set
pub struct ClaimDataBuilder {
    prescription: Option<Prescription>,
    bill: Option<Bill>,
    test_reports: Vec<TestReport>,
}

impl Default for ClaimDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimDataBuilder {
    /// Creates a builder with a complete document set
    pub fn new() -> Self {
        Self {
            prescription: Some(DocumentFixtures::valid_prescription()),
            bill: Some(DocumentFixtures::consultation_bill()),
            test_reports: Vec::new(),
        }
    }

    /// Creates a builder with no documents at all
    pub fn empty() -> Self {
        Self {
            prescription: None,
            bill: None,
            test_reports: Vec::new(),
        }
    }

    /// Sets the prescription
    pub fn with_prescription(mut self, prescription: Prescription) -> Self {
        self.prescription = Some(prescription);
        self
    }

    /// Removes the prescription
    pub fn without_prescription(mut self) -> Self {
        self.prescription = None;
        self
    }

    /// Sets the bill
    pub fn with_bill(mut self, bill: Bill) -> Self {
        self.bill = Some(bill);
        self
    }

    /// Removes the bill
    pub fn without_bill(mut self) -> Self {
        self.bill = None;
        self
    }

    /// Adds a test report
    pub fn with_test_report(mut self, report: TestReport) -> Self {
        self.test_reports.push(report);
        self
    }

    /// Builds the claim data
    pub fn build(self) -> ClaimData {
        ClaimData {
            prescription: self.prescription,
            bill: self.bill,
            test_reports: self.test_reports,
        }
    }
}

/// Builder for constructing member registry context
pub struct MemberContextBuilder {
    member_id: Option<MemberId>,
    member_name: Option<String>,
    member_join_date: Option<NaiveDate>,
    treatment_date: Option<NaiveDate>,
    claim_amount: Option<Decimal>,
    previous_claims_ytd: Decimal,
    previous_claims_same_day: u32,
    claims_last_month: u32,
    hospital: Option<String>,
    preauth_obtained: bool,
}

impl Default for MemberContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberContextBuilder {
    /// Creates a builder seeded from the active member fixture
    pub fn new() -> Self {
        let base = MemberFixtures::active_member();
        Self {
            member_id: base.member_id,
            member_name: base.member_name,
            member_join_date: base.member_join_date,
            treatment_date: base.treatment_date,
            claim_amount: base.claim_amount,
            previous_claims_ytd: base.previous_claims_ytd,
            previous_claims_same_day: base.previous_claims_same_day,
            claims_last_month: base.claims_last_month,
            hospital: base.hospital,
            preauth_obtained: base.preauth_obtained,
        }
    }

    /// Sets the member identifier
    pub fn with_member_id(mut self, id: impl Into<String>) -> Self {
        self.member_id = Some(MemberId::new(id));
        self
    }

    /// Removes the member identifier
    pub fn without_member_id(mut self) -> Self {
        self.member_id = None;
        self
    }

    /// Sets the member join date
    pub fn with_member_join_date(mut self, date: NaiveDate) -> Self {
        self.member_join_date = Some(date);
        self
    }

    /// Removes the member join date
    pub fn without_member_join_date(mut self) -> Self {
        self.member_join_date = None;
        self
    }

    /// Sets the registry treatment date
    pub fn with_treatment_date(mut self, date: NaiveDate) -> Self {
        self.treatment_date = Some(date);
        self
    }

    /// Sets the registry claim amount
    pub fn with_claim_amount(mut self, amount: Decimal) -> Self {
        self.claim_amount = Some(amount);
        self
    }

    /// Removes the registry claim amount
    pub fn without_claim_amount(mut self) -> Self {
        self.claim_amount = None;
        self
    }

    /// Sets the amount already claimed this policy year
    pub fn with_previous_claims_ytd(mut self, amount: Decimal) -> Self {
        self.previous_claims_ytd = amount;
        self
    }

    /// Sets the count of other claims filed the same day
    pub fn with_previous_claims_same_day(mut self, count: u32) -> Self {
        self.previous_claims_same_day = count;
        self
    }

    /// Sets the count of claims filed in the last month
    pub fn with_claims_last_month(mut self, count: u32) -> Self {
        self.claims_last_month = count;
        self
    }

    /// Sets the hospital on record
    pub fn with_hospital(mut self, hospital: impl Into<String>) -> Self {
        self.hospital = Some(hospital.into());
        self
    }

    /// Removes the hospital on record
    pub fn without_hospital(mut self) -> Self {
        self.hospital = None;
        self
    }

    /// Sets whether pre-authorization was obtained
    pub fn with_preauth_obtained(mut self, obtained: bool) -> Self {
        self.preauth_obtained = obtained;
        self
    }

    /// Builds the member context
    pub fn build(self) -> MemberContext {
        MemberContext {
            member_id: self.member_id,
            member_name: self.member_name,
            member_join_date: self.member_join_date,
            treatment_date: self.treatment_date,
            claim_amount: self.claim_amount,
            previous_claims_ytd: self.previous_claims_ytd,
            previous_claims_same_day: self.previous_claims_same_day,
            claims_last_month: self.claims_last_month,
            hospital: self.hospital,
            preauth_obtained: self.preauth_obtained,
        }
    }
}

/// Builder for policy terms variants
///
/// Starts from the standard terms fixture and rewrites individual rules,
/// so a test can tighten one limit without restating the whole document.
pub struct PolicyConfigBuilder {
    config: PolicyConfig,
}

impl Default for PolicyConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyConfigBuilder {
    /// Creates a builder seeded from the standard policy terms
    pub fn new() -> Self {
        Self {
            config: (*PolicyFixtures::standard_config()).clone(),
        }
    }

    /// Sets the policy effective date
    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.config.effective_date = date;
        self
    }

    /// Sets the initial waiting period in days
    pub fn with_initial_waiting(mut self, days: u32) -> Self {
        self.config.waiting_periods.initial_waiting = days;
        self
    }

    /// Adds an ailment-specific waiting period
    pub fn with_ailment_waiting(mut self, ailment: impl Into<String>, waiting_days: u32) -> Self {
        self.config
            .waiting_periods
            .specific_ailments
            .push(AilmentWaitingPeriod {
                ailment: ailment.into(),
                waiting_days,
            });
        self
    }

    /// Sets the general per-claim limit
    pub fn with_per_claim_limit(mut self, limit: Decimal) -> Self {
        self.config.coverage_details.per_claim_limit = limit;
        self
    }

    /// Sets the annual limit
    pub fn with_annual_limit(mut self, limit: Decimal) -> Self {
        self.config.coverage_details.annual_limit = limit;
        self
    }

    /// Sets the minimum claim amount
    pub fn with_minimum_claim_amount(mut self, amount: Decimal) -> Self {
        self.config.claim_requirements.minimum_claim_amount = amount;
        self
    }

    /// Sets the consultation copay percentage
    pub fn with_copay_percentage(mut self, percentage: Decimal) -> Self {
        self.config.coverage_details.consultation_fees.copay_percentage = percentage;
        self
    }

    /// Sets the consultation network benefit percentage
    pub fn with_network_discount(mut self, percentage: Decimal) -> Self {
        self.config.coverage_details.consultation_fees.network_discount = percentage;
        self
    }

    /// Builds the shared policy terms
    pub fn build(self) -> Arc<PolicyConfig> {
        Arc::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_claim_builder_defaults_are_complete() {
        let claim = ClaimDataBuilder::new().build();

        assert!(claim.has_prescription());
        assert!(claim.has_bill());
        assert!(claim.test_reports.is_empty());
    }

    #[test]
    fn test_empty_claim_builder_has_no_documents() {
        let claim = ClaimDataBuilder::empty().build();

        assert!(!claim.has_prescription());
        assert!(!claim.has_bill());
    }

    #[test]
    fn test_prescription_builder_customization() {
        let prescription = PrescriptionBuilder::new()
            .without_doctor_reg()
            .with_diagnosis("Dental caries")
            .build();

        assert!(prescription.doctor_reg.is_none());
        assert_eq!(prescription.diagnosis.as_deref(), Some("Dental caries"));
    }

    #[test]
    fn test_bill_builder_accumulates_items() {
        let bill = BillBuilder::new()
            .with_item("Teeth whitening", dec!(2000))
            .with_total_amount(dec!(3000))
            .build();

        assert_eq!(bill.items.len(), 2);
        assert_eq!(bill.total_amount, Some(dec!(3000)));
    }

    #[test]
    fn test_member_builder_clears_identifier() {
        let member = MemberContextBuilder::new().without_member_id().build();

        assert!(member.member_id.is_none());
        assert!(member.member_name.is_some());
    }

    #[test]
    fn test_prescription_builder_sets_single_treatment() {
        let prescription = PrescriptionBuilder::new()
            .with_treatment("Physiotherapy session")
            .build();

        assert!(prescription.procedures.is_empty());
        assert_eq!(prescription.treatment.as_deref(), Some("Physiotherapy session"));
    }

    #[test]
    fn test_policy_builder_overrides_one_rule() {
        let config = PolicyConfigBuilder::new()
            .with_initial_waiting(90)
            .with_per_claim_limit(dec!(8000))
            .build();

        assert_eq!(config.waiting_periods.initial_waiting, 90);
        assert_eq!(config.coverage_details.per_claim_limit, dec!(8000));
        assert_eq!(config.coverage_details.annual_limit, dec!(50000));
    }

    #[test]
    fn test_policy_builder_appends_ailment() {
        let config = PolicyConfigBuilder::new()
            .with_ailment_waiting("gallstone", 365)
            .build();

        let last = config.waiting_periods.specific_ailments.last().unwrap();
        assert_eq!(last.ailment, "gallstone");
        assert_eq!(last.waiting_days, 365);
    }
}
