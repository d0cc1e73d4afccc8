//! Structural validation of extracted claim documents
//!
//! These checks look only at the documents themselves, never at policy
//! terms: completeness, doctor-registration format, and cross-document
//! consistency of patient names and dates. Unparseable values are treated
//! as consistent so an extraction glitch cannot reject a claim on its own.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use core_kernel::parse_claim_date;

use crate::claim_data::ClaimData;
use crate::decision::ReasonCode;

/// Medical council format, `STATE/NUMBER/YEAR`
static STANDARD_REGISTRATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,4}/\d{4,6}/\d{4}$").expect("pattern compiles"));

/// AYUSH council format, `SYSTEM/STATE/NUMBER/YEAR`
static AYUSH_REGISTRATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(AYUR|HOMEO|UNANI)/[A-Z]{2,4}/\d{4,6}/\d{4}$").expect("pattern compiles")
});

/// Outcome of document validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCheck {
    pub valid: bool,
    pub reasons: Vec<ReasonCode>,
}

impl DocumentCheck {
    fn failed(reasons: Vec<ReasonCode>) -> Self {
        Self {
            valid: false,
            reasons,
        }
    }
}

/// Runs every structural check over the extracted documents
///
/// A missing prescription or bill short-circuits with a single
/// `MissingDocuments` reason; otherwise all remaining checks run and
/// their reasons accumulate in a fixed order.
pub fn validate_documents(claim: &ClaimData) -> DocumentCheck {
    if !claim.has_prescription() || !claim.has_bill() {
        return DocumentCheck::failed(vec![ReasonCode::MissingDocuments]);
    }

    // Both guaranteed present past the completeness gate.
    let empty_prescription = Default::default();
    let empty_bill = Default::default();
    let prescription = claim.prescription.as_ref().unwrap_or(&empty_prescription);
    let bill = claim.bill.as_ref().unwrap_or(&empty_bill);

    let mut reasons = Vec::new();

    if !is_valid_doctor_registration(prescription.doctor_reg.as_deref()) {
        reasons.push(ReasonCode::InvalidDoctorReg);
    }

    if prescription.diagnosis.as_deref().map_or(true, str::is_empty) {
        reasons.push(ReasonCode::InvalidPrescription);
    }

    if let (Some(first), Some(second)) = (
        prescription.patient_name.as_deref(),
        bill.patient_name.as_deref(),
    ) {
        if !names_match(first, second) {
            reasons.push(ReasonCode::PatientMismatch);
        }
    }

    if let (Some(first), Some(second)) = (
        prescription.treatment_date.as_deref(),
        bill.bill_date.as_deref(),
    ) {
        if !dates_match(first, second) {
            reasons.push(ReasonCode::DateMismatch);
        }
    }

    DocumentCheck {
        valid: reasons.is_empty(),
        reasons,
    }
}

/// Validates a doctor registration id against the council formats
pub fn is_valid_doctor_registration(registration: Option<&str>) -> bool {
    match registration {
        Some(value) if !value.is_empty() => {
            STANDARD_REGISTRATION.is_match(value) || AYUSH_REGISTRATION.is_match(value)
        }
        _ => false,
    }
}

/// Case-insensitive name comparison tolerating initials and omissions
///
/// Names match when equal after normalization, or when at least half the
/// tokens of the shorter name appear in the longer one.
fn names_match(first: &str, second: &str) -> bool {
    if first.is_empty() || second.is_empty() {
        return true;
    }

    let first = first.to_lowercase();
    let second = second.to_lowercase();
    let first = first.trim();
    let second = second.trim();

    if first == second {
        return true;
    }

    let first_tokens: HashSet<&str> = first.split_whitespace().collect();
    let second_tokens: HashSet<&str> = second.split_whitespace().collect();
    let overlap = first_tokens.intersection(&second_tokens).count();

    2 * overlap >= first_tokens.len().min(second_tokens.len())
}

/// Dates are consistent when both parse and differ by at most one day
fn dates_match(first: &str, second: &str) -> bool {
    match (parse_claim_date(first), parse_claim_date(second)) {
        (Some(first), Some(second)) => (first - second).num_days().abs() <= 1,
        _ => true,
    }
}
