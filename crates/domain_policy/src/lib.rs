//! Policy Terms Domain
//!
//! This crate owns the policy side of claim adjudication: loading and
//! validating policy terms, classifying treatments into coverage
//! categories, scanning for exclusions, and evaluating the per-claim
//! policy rules.
//!
//! # Architecture
//!
//! The domain layer is infrastructure-agnostic, containing only business logic:
//! - **Configuration**: PolicyConfig and its nested terms, loaded from JSON
//! - **Coverage**: category classification and exclusion scanning
//! - **Validation**: eligibility, waiting periods, limits, cost sharing
//!
//! Rule outcomes are plain data. A failed check is a value the caller
//! turns into a claim decision, not an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{PolicyConfig, PolicyValidator};
//! use std::sync::Arc;
//!
//! let config = Arc::new(PolicyConfig::from_file("policy_terms.json")?);
//! let validator = PolicyValidator::new(config);
//!
//! let eligibility = validator.check_member_eligibility(Some(&member_id), treatment_date);
//! ```

pub mod config;
pub mod coverage;
pub mod validator;

pub use config::{
    AilmentWaitingPeriod, CategoryCover, ClaimRequirements, ConsultationCover, CoverageDetails,
    PolicyConfig, PolicyConfigError, WaitingPeriods,
};
pub use coverage::{
    assess_coverage, determine_category, requires_preauthorization, ClaimCategory,
    CoverageAssessment,
};
pub use validator::{
    CostSharing, EligibilityCheck, IneligibilityReason, LimitBreach, LimitCheck, LimitType,
    PolicyValidator, WaitingPeriodCheck,
};
