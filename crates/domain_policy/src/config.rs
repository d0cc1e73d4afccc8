//! Policy terms document model and loading
//!
//! Policy terms are authored as a versioned JSON document and loaded once
//! at startup. The parsed configuration is immutable for the process
//! lifetime; every evaluation reads it behind a shared reference. A
//! malformed document is a fatal startup condition, never a per-claim
//! outcome.

use chrono::NaiveDate;
use core_kernel::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::coverage::ClaimCategory;

/// Errors raised while loading or validating policy terms
#[derive(Debug, Error)]
pub enum PolicyConfigError {
    /// Document was not valid JSON or did not match the schema
    #[error("Failed to parse policy terms: {0}")]
    Parse(String),

    /// Document file could not be read
    #[error("Policy terms file not found: {0}")]
    FileNotFound(String),

    /// Document parsed but carries values the engine cannot apply
    #[error("Invalid policy terms: {0}")]
    Invalid(String),
}

/// Immutable policy ruleset applied to every claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Date the policy terms take effect
    pub effective_date: NaiveDate,
    /// Settlement currency for all monetary terms
    #[serde(default)]
    pub currency: Currency,
    /// Waiting-period rules
    pub waiting_periods: WaitingPeriods,
    /// Limits, sub-limits, and cost-sharing terms
    pub coverage_details: CoverageDetails,
    /// Claim submission requirements
    pub claim_requirements: ClaimRequirements,
}

/// Waiting periods before conditions become claimable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingPeriods {
    /// General waiting period in days applied to every claim
    pub initial_waiting: u32,
    /// Ailment-specific waiting periods, evaluated in document order
    pub specific_ailments: Vec<AilmentWaitingPeriod>,
}

/// A single ailment keyword with its required waiting period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AilmentWaitingPeriod {
    /// Keyword matched case-insensitively against the diagnosis text
    pub ailment: String,
    /// Days of membership required before the ailment is claimable
    pub waiting_days: u32,
}

/// Monetary limits and cost-sharing terms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageDetails {
    /// Maximum payable per claim for categories without a sub-limit
    pub per_claim_limit: Decimal,
    /// Maximum payable across a policy year
    pub annual_limit: Decimal,
    /// Diagnostic tests sub-limit
    pub diagnostic_tests: CategoryCover,
    /// Pharmacy sub-limit
    pub pharmacy: CategoryCover,
    /// Dental sub-limit
    pub dental: CategoryCover,
    /// Vision sub-limit
    pub vision: CategoryCover,
    /// Alternative medicine sub-limit
    pub alternative_medicine: CategoryCover,
    /// Consultation cost-sharing terms
    pub consultation_fees: ConsultationCover,
}

impl CoverageDetails {
    /// Returns the sub-limit configured for a category, if any
    ///
    /// Consultation fees and fully-excluded claims fall back to the
    /// general per-claim limit.
    pub fn sub_limit_for(&self, category: ClaimCategory) -> Option<Decimal> {
        match category {
            ClaimCategory::DiagnosticTests => Some(self.diagnostic_tests.sub_limit),
            ClaimCategory::Pharmacy => Some(self.pharmacy.sub_limit),
            ClaimCategory::Dental => Some(self.dental.sub_limit),
            ClaimCategory::Vision => Some(self.vision.sub_limit),
            ClaimCategory::AlternativeMedicine => Some(self.alternative_medicine.sub_limit),
            ClaimCategory::ConsultationFees | ClaimCategory::Exclusion => None,
        }
    }
}

/// Sub-limit for a single coverage category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCover {
    /// Maximum payable per claim within this category
    pub sub_limit: Decimal,
}

/// Cost-sharing terms for consultation claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationCover {
    /// Member's out-of-pocket percentage
    #[serde(default)]
    pub copay_percentage: Decimal,
    /// Total network benefit percentage, inclusive of the copay
    #[serde(default)]
    pub network_discount: Decimal,
}

/// Claim submission requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequirements {
    /// Claims below this amount are not accepted
    pub minimum_claim_amount: Decimal,
}

impl PolicyConfig {
    /// Loads policy terms from a JSON string
    ///
    /// The document is validated after parsing; an invalid document is
    /// rejected before any claim can be evaluated against it.
    pub fn from_json_str(json_str: &str) -> Result<Self, PolicyConfigError> {
        let config: PolicyConfig =
            serde_json::from_str(json_str).map_err(|e| PolicyConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads policy terms from a file path
    pub fn from_file(path: &Path) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| PolicyConfigError::FileNotFound(path.display().to_string()))?;

        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<(), PolicyConfigError> {
        let coverage = &self.coverage_details;

        if coverage.per_claim_limit <= Decimal::ZERO {
            return Err(self.invalid("per_claim_limit must be positive"));
        }
        if coverage.annual_limit <= Decimal::ZERO {
            return Err(self.invalid("annual_limit must be positive"));
        }
        for (name, cover) in [
            ("diagnostic_tests", &coverage.diagnostic_tests),
            ("pharmacy", &coverage.pharmacy),
            ("dental", &coverage.dental),
            ("vision", &coverage.vision),
            ("alternative_medicine", &coverage.alternative_medicine),
        ] {
            if cover.sub_limit <= Decimal::ZERO {
                return Err(self.invalid(format!("{}.sub_limit must be positive", name)));
            }
        }

        let consultation = &coverage.consultation_fees;
        for (name, pct) in [
            ("copay_percentage", consultation.copay_percentage),
            ("network_discount", consultation.network_discount),
        ] {
            if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(self.invalid(format!("{} must be between 0 and 100", name)));
            }
        }

        if self.claim_requirements.minimum_claim_amount < Decimal::ZERO {
            return Err(self.invalid("minimum_claim_amount must not be negative"));
        }

        for entry in &self.waiting_periods.specific_ailments {
            if entry.ailment.trim().is_empty() {
                return Err(self.invalid("specific_ailments contains an empty keyword"));
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> PolicyConfigError {
        let reason = reason.into();
        warn!(effective_date = %self.effective_date, %reason, "rejecting policy terms");
        PolicyConfigError::Invalid(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_policy_json() -> &'static str {
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

    #[test]
    fn test_load_policy_terms() {
        let config = PolicyConfig::from_json_str(sample_policy_json()).unwrap();

        assert_eq!(
            config.effective_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(config.currency, Currency::INR);
        assert_eq!(config.waiting_periods.initial_waiting, 30);
        assert_eq!(config.coverage_details.per_claim_limit, dec!(5000));
        assert_eq!(config.claim_requirements.minimum_claim_amount, dec!(500));
    }

    #[test]
    fn test_currency_defaults_to_inr() {
        let json = sample_policy_json().replace("\"currency\": \"INR\",", "");
        let config = PolicyConfig::from_json_str(&json).unwrap();
        assert_eq!(config.currency, Currency::INR);
    }

    #[test]
    fn test_ailment_order_is_preserved() {
        let config = PolicyConfig::from_json_str(sample_policy_json()).unwrap();

        let keywords: Vec<&str> = config
            .waiting_periods
            .specific_ailments
            .iter()
            .map(|entry| entry.ailment.as_str())
            .collect();
        assert_eq!(keywords, vec!["cataract", "hernia", "joint replacement"]);
    }

    #[test]
    fn test_sub_limit_lookup_by_category() {
        let config = PolicyConfig::from_json_str(sample_policy_json()).unwrap();
        let coverage = &config.coverage_details;

        assert_eq!(
            coverage.sub_limit_for(ClaimCategory::DiagnosticTests),
            Some(dec!(10000))
        );
        assert_eq!(coverage.sub_limit_for(ClaimCategory::Dental), Some(dec!(5000)));
        assert_eq!(coverage.sub_limit_for(ClaimCategory::ConsultationFees), None);
        assert_eq!(coverage.sub_limit_for(ClaimCategory::Exclusion), None);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = PolicyConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(PolicyConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_section_is_a_parse_error() {
        let json = r#"{ "effective_date": "2023-01-01" }"#;
        let result = PolicyConfig::from_json_str(json);
        assert!(matches!(result, Err(PolicyConfigError::Parse(_))));
    }

    #[test]
    fn test_out_of_range_copay_is_invalid() {
        let json = sample_policy_json().replace("\"copay_percentage\": 20", "\"copay_percentage\": 120");
        let result = PolicyConfig::from_json_str(&json);
        assert!(matches!(result, Err(PolicyConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_positive_limit_is_invalid() {
        let json = sample_policy_json().replace("\"per_claim_limit\": 5000", "\"per_claim_limit\": 0");
        let result = PolicyConfig::from_json_str(&json);
        assert!(matches!(result, Err(PolicyConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_ailment_keyword_is_invalid() {
        let json = sample_policy_json().replace("\"cataract\"", "\"  \"");
        let result = PolicyConfig::from_json_str(&json);
        assert!(matches!(result, Err(PolicyConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = PolicyConfig::from_file(Path::new("/nonexistent/policy_terms.json"));
        assert!(matches!(result, Err(PolicyConfigError::FileNotFound(_))));
    }
}
