//! Coverage classification and exclusion scanning
//!
//! This module holds the fixed keyword tables that decide whether a claim
//! is covered, partially covered, or excluded, and which benefit category
//! it settles under. Matching is deliberately fuzzy, case-insensitive
//! substring containment evaluated in table order; outcome parity with the
//! established rule set matters more than linguistic precision here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exclusions that void the entire claim when matched
///
/// Each entry is (exclusion type, keywords). A diagnosis hit records the
/// exclusion type; a treatment hit records the treatment text itself.
pub const PRIMARY_EXCLUSIONS: &[(&str, &[&str])] = &[
    ("weight loss", &["obesity", "weight loss", "bariatric"]),
    ("infertility", &["infertility", "ivf", "fertility treatment"]),
    ("experimental", &["experimental", "investigational"]),
];

/// Exclusions that remove single line items while the claim stays covered
pub const SECONDARY_EXCLUSIONS: &[(&str, &[&str])] = &[
    ("cosmetic", &["cosmetic", "aesthetic", "beautification", "whitening"]),
    ("supplements", &["diet plan", "weight management program"]),
];

const DENTAL_KEYWORDS: &[&str] = &["tooth", "dental", "root canal", "filling", "extraction", "decay"];
const VISION_KEYWORDS: &[&str] = &["eye", "vision", "glasses", "contact lens", "lasik"];
const ALTERNATIVE_KEYWORDS: &[&str] =
    &["ayurved", "homeopath", "unani", "panchakarma", "chronic joint"];
const DIAGNOSTIC_KEYWORDS: &[&str] = &["mri", "ct scan", "ultrasound", "x-ray"];

/// Procedures that require prior approval above the pre-auth threshold
const PREAUTH_TRIGGERS: &[&str] = &["mri", "ct scan"];

/// Benefit category a claim settles under
///
/// Categories with a configured sub-limit are checked against it instead
/// of the general per-claim limit; `ConsultationFees` is the only category
/// with a cost-sharing model. `Pharmacy` carries a configured sub-limit
/// but is never produced by [`determine_category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    Dental,
    Vision,
    AlternativeMedicine,
    DiagnosticTests,
    Pharmacy,
    ConsultationFees,
    Exclusion,
}

impl ClaimCategory {
    /// Returns the category's wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::Dental => "dental",
            ClaimCategory::Vision => "vision",
            ClaimCategory::AlternativeMedicine => "alternative_medicine",
            ClaimCategory::DiagnosticTests => "diagnostic_tests",
            ClaimCategory::Pharmacy => "pharmacy",
            ClaimCategory::ConsultationFees => "consultation_fees",
            ClaimCategory::Exclusion => "exclusion",
        }
    }
}

impl fmt::Display for ClaimCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the coverage scan over a claim's clinical texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageAssessment {
    /// False when a primary exclusion voids the claim
    pub covered: bool,
    /// True when only secondary exclusions matched
    pub partial_coverage: bool,
    /// Exclusion types (diagnosis hits) or treatment texts (treatment hits)
    pub excluded_items: Vec<String>,
    /// Settlement category, `Exclusion` for voided claims
    pub category: ClaimCategory,
}

impl CoverageAssessment {
    fn excluded(excluded_items: Vec<String>) -> Self {
        Self {
            covered: false,
            partial_coverage: false,
            excluded_items,
            category: ClaimCategory::Exclusion,
        }
    }
}

/// Scans diagnosis and treatment texts against the exclusion tiers
///
/// Primary-tier hits void the whole claim regardless of where they occur;
/// secondary-tier hits mark individual treatments as excluded while the
/// claim stays covered. Medicine texts are accepted for interface parity
/// with the extraction schema; the exclusion tables target diagnosis and
/// treatment texts only.
pub fn assess_coverage(
    diagnosis: &str,
    treatments: &[String],
    _medicines: &[String],
) -> CoverageAssessment {
    let diagnosis_lower = diagnosis.to_lowercase();
    let mut excluded_items: Vec<String> = Vec::new();
    let mut primary_excluded = false;

    for (exclusion_type, keywords) in PRIMARY_EXCLUSIONS {
        for keyword in *keywords {
            if diagnosis_lower.contains(keyword) {
                excluded_items.push((*exclusion_type).to_string());
                primary_excluded = true;
                break;
            }
        }
    }

    if primary_excluded {
        return CoverageAssessment::excluded(excluded_items);
    }

    let mut partial_exclusions: Vec<String> = Vec::new();
    for treatment in treatments {
        let treatment_lower = treatment.to_lowercase();

        // A treatment matching several primary tiers is recorded once per
        // tier; the break only ends the keyword scan within a tier.
        for (_exclusion_type, keywords) in PRIMARY_EXCLUSIONS {
            for keyword in *keywords {
                if treatment_lower.contains(keyword) {
                    excluded_items.push(treatment.clone());
                    primary_excluded = true;
                    break;
                }
            }
        }

        for (_exclusion_type, keywords) in SECONDARY_EXCLUSIONS {
            for keyword in *keywords {
                if treatment_lower.contains(keyword) {
                    partial_exclusions.push(treatment.clone());
                    break;
                }
            }
        }
    }

    if primary_excluded {
        return CoverageAssessment::excluded(excluded_items);
    }

    if !partial_exclusions.is_empty() {
        excluded_items.extend(partial_exclusions);
        return CoverageAssessment {
            covered: true,
            partial_coverage: true,
            excluded_items,
            category: determine_category(diagnosis, treatments),
        };
    }

    CoverageAssessment {
        covered: true,
        partial_coverage: false,
        excluded_items: Vec::new(),
        category: determine_category(diagnosis, treatments),
    }
}

/// Determines the benefit category from combined clinical text
///
/// Buckets are tested in strict priority order; the first bucket with any
/// keyword hit wins and unmatched claims settle as consultation fees.
pub fn determine_category(diagnosis: &str, treatments: &[String]) -> ClaimCategory {
    let combined = format!("{} {}", diagnosis, treatments.join(" ")).to_lowercase();

    if DENTAL_KEYWORDS.iter().any(|kw| combined.contains(kw)) {
        return ClaimCategory::Dental;
    }
    if VISION_KEYWORDS.iter().any(|kw| combined.contains(kw)) {
        return ClaimCategory::Vision;
    }
    if ALTERNATIVE_KEYWORDS.iter().any(|kw| combined.contains(kw)) {
        return ClaimCategory::AlternativeMedicine;
    }
    if DIAGNOSTIC_KEYWORDS.iter().any(|kw| combined.contains(kw)) {
        return ClaimCategory::DiagnosticTests;
    }

    ClaimCategory::ConsultationFees
}

/// Returns true when any test or treatment names a procedure that needs
/// prior approval
pub fn requires_preauthorization(treatments: &[String], tests: &[String]) -> bool {
    for test in tests {
        let test_lower = test.to_lowercase();
        if PREAUTH_TRIGGERS.iter().any(|pat| test_lower.contains(pat)) {
            return true;
        }
    }

    for treatment in treatments {
        let treatment_lower = treatment.to_lowercase();
        if PREAUTH_TRIGGERS.iter().any(|pat| treatment_lower.contains(pat)) {
            return true;
        }
    }

    false
}
