//! Structured claim data produced by document extraction
//!
//! Upstream OCR and field extraction runs outside this crate and is free
//! to miss, garble, or omit any field. Every field here is therefore
//! optional or defaultable, and dates arrive as raw strings that are
//! parsed fail-open at the point of use.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Data extracted from a prescription document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prescription {
    pub doctor_name: Option<String>,
    /// Doctor registration id, validated against the council formats
    pub doctor_reg: Option<String>,
    pub patient_name: Option<String>,
    pub patient_age: Option<u32>,
    pub diagnosis: Option<String>,
    pub medicines_prescribed: Vec<String>,
    pub tests_prescribed: Vec<String>,
    /// Procedure lines lifted from the prescription body
    pub procedures: Vec<String>,
    /// Single treatment line, present when extraction found one entry
    /// instead of a procedure list
    pub treatment: Option<String>,
    /// Treatment date as extracted, expected `YYYY-MM-DD`
    pub treatment_date: Option<String>,
}

impl Prescription {
    /// True when extraction produced no usable content
    pub fn is_empty(&self) -> bool {
        self.doctor_name.is_none()
            && self.doctor_reg.is_none()
            && self.patient_name.is_none()
            && self.patient_age.is_none()
            && self.diagnosis.is_none()
            && self.medicines_prescribed.is_empty()
            && self.tests_prescribed.is_empty()
            && self.procedures.is_empty()
            && self.treatment.is_none()
            && self.treatment_date.is_none()
    }
}

/// A single line item on a bill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillItem {
    pub name: String,
    pub amount: Decimal,
}

/// Data extracted from a hospital bill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bill {
    pub hospital_name: Option<String>,
    pub bill_number: Option<String>,
    /// Bill date as extracted, expected `YYYY-MM-DD`
    pub bill_date: Option<String>,
    pub patient_name: Option<String>,
    pub total_amount: Option<Decimal>,
    pub items: Vec<BillItem>,
    pub test_names: Vec<String>,
    /// Itemized teeth-whitening charge, when billed separately
    pub teeth_whitening: Option<Decimal>,
    /// Itemized diet-plan charge, when billed separately
    pub diet_plan: Option<Decimal>,
}

impl Bill {
    /// True when extraction produced no usable content
    pub fn is_empty(&self) -> bool {
        self.hospital_name.is_none()
            && self.bill_number.is_none()
            && self.bill_date.is_none()
            && self.patient_name.is_none()
            && self.total_amount.is_none()
            && self.items.is_empty()
            && self.test_names.is_empty()
            && self.teeth_whitening.is_none()
            && self.diet_plan.is_none()
    }
}

/// Data extracted from a diagnostic test report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestReport {
    pub lab_name: Option<String>,
    pub patient_name: Option<String>,
    pub test_date: Option<String>,
    pub tests_conducted: Vec<String>,
    pub doctor_referred_by: Option<String>,
}

/// The full set of extracted documents backing one claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimData {
    pub prescription: Option<Prescription>,
    pub bill: Option<Bill>,
    pub test_reports: Vec<TestReport>,
}

impl ClaimData {
    /// True when a non-empty prescription was extracted
    pub fn has_prescription(&self) -> bool {
        self.prescription.as_ref().map_or(false, |p| !p.is_empty())
    }

    /// True when a non-empty bill was extracted
    pub fn has_bill(&self) -> bool {
        self.bill.as_ref().map_or(false, |b| !b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_extraction_counts_as_missing() {
        let claim = ClaimData {
            prescription: Some(Prescription::default()),
            bill: None,
            test_reports: Vec::new(),
        };

        assert!(!claim.has_prescription());
        assert!(!claim.has_bill());
    }

    #[test]
    fn test_single_field_makes_prescription_present() {
        let claim = ClaimData {
            prescription: Some(Prescription {
                diagnosis: Some("Viral fever".to_string()),
                ..Prescription::default()
            }),
            ..ClaimData::default()
        };

        assert!(claim.has_prescription());
    }

    #[test]
    fn test_partial_json_deserializes_with_defaults() {
        let json = r#"{
            "prescription": {
                "patient_name": "Rajesh Kumar",
                "diagnosis": "Dental caries",
                "procedures": ["Root canal treatment"]
            },
            "bill": {
                "hospital_name": "Apollo Dental",
                "total_amount": 4500,
                "items": [{"name": "Root canal", "amount": 4500}]
            }
        }"#;

        let claim: ClaimData = serde_json::from_str(json).unwrap();
        let prescription = claim.prescription.unwrap();
        let bill = claim.bill.unwrap();

        assert_eq!(prescription.diagnosis.as_deref(), Some("Dental caries"));
        assert!(prescription.doctor_reg.is_none());
        assert!(prescription.treatment.is_none());
        assert!(prescription.tests_prescribed.is_empty());
        assert_eq!(bill.total_amount, Some(dec!(4500)));
        assert_eq!(bill.items[0].name, "Root canal");
        assert!(bill.teeth_whitening.is_none());
        assert!(claim.test_reports.is_empty());
    }

    #[test]
    fn test_unknown_item_amount_defaults_to_zero() {
        let json = r#"{"name": "Consultation"}"#;
        let item: BillItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.amount, Decimal::ZERO);
    }
}
