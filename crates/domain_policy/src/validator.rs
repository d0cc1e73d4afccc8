//! Policy rule evaluation over loaded terms
//!
//! The validator owns a shared handle to the immutable policy terms and
//! answers the per-claim questions the adjudication pipeline asks:
//! eligibility, waiting periods, monetary limits, and cost sharing. Every
//! method is a pure function of its inputs and the loaded terms; business
//! failures are returned as data, never as errors.

use chrono::{Days, NaiveDate};
use core_kernel::{Currency, MemberId, Money, Rate};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::config::PolicyConfig;
use crate::coverage::ClaimCategory;

/// Why a member is not eligible to claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibilityReason {
    /// No member id was supplied with the claim
    MemberNotFound,
    /// Treatment predates the policy's effective date
    PolicyInactive,
}

/// Outcome of the eligibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityCheck {
    pub eligible: bool,
    pub reason: Option<IneligibilityReason>,
}

impl EligibilityCheck {
    fn ok() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    fn failed(reason: IneligibilityReason) -> Self {
        Self {
            eligible: false,
            reason: Some(reason),
        }
    }
}

/// Outcome of the waiting-period check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingPeriodCheck {
    pub satisfied: bool,
    /// Unmet condition name, `initial` for the general waiting period
    pub condition: Option<String>,
    /// First date the unmet condition becomes claimable
    pub eligible_date: Option<NaiveDate>,
}

impl WaitingPeriodCheck {
    fn ok() -> Self {
        Self {
            satisfied: true,
            condition: None,
            eligible_date: None,
        }
    }

    fn unmet(condition: impl Into<String>, eligible_date: NaiveDate) -> Self {
        Self {
            satisfied: false,
            condition: Some(condition.into()),
            eligible_date: Some(eligible_date),
        }
    }
}

/// Which monetary limit a claim breached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitType {
    BelowMinAmount,
    SubLimitExceeded,
    PerClaimExceeded,
    AnnualLimitExceeded,
}

impl LimitType {
    /// Returns the wire code for this limit type
    pub fn code(&self) -> &'static str {
        match self {
            LimitType::BelowMinAmount => "BELOW_MIN_AMOUNT",
            LimitType::SubLimitExceeded => "SUB_LIMIT_EXCEEDED",
            LimitType::PerClaimExceeded => "PER_CLAIM_EXCEEDED",
            LimitType::AnnualLimitExceeded => "ANNUAL_LIMIT_EXCEEDED",
        }
    }
}

impl fmt::Display for LimitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A breached limit with the maximum the policy would have allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitBreach {
    pub limit_type: LimitType,
    pub max_allowed: Money,
}

/// Outcome of the limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitCheck {
    pub within_limits: bool,
    pub breach: Option<LimitBreach>,
}

impl LimitCheck {
    fn ok() -> Self {
        Self {
            within_limits: true,
            breach: None,
        }
    }

    fn breached(limit_type: LimitType, max_allowed: Money) -> Self {
        Self {
            within_limits: false,
            breach: Some(LimitBreach {
                limit_type,
                max_allowed,
            }),
        }
    }
}

/// Copay, discount, and the resulting net payable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostSharing {
    pub copay: Money,
    pub discount: Money,
    pub net_payable: Money,
}

/// Evaluates claims against the loaded policy terms
#[derive(Debug, Clone)]
pub struct PolicyValidator {
    config: Arc<PolicyConfig>,
}

impl PolicyValidator {
    /// Creates a validator over shared policy terms
    pub fn new(config: Arc<PolicyConfig>) -> Self {
        Self { config }
    }

    /// Returns the loaded policy terms
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Returns the policy's settlement currency
    pub fn currency(&self) -> Currency {
        self.config.currency
    }

    /// Checks whether the member may claim for the treatment date
    ///
    /// A missing treatment date passes the effective-date comparison;
    /// extraction glitches must not reject a claim outright.
    pub fn check_member_eligibility(
        &self,
        member_id: Option<&MemberId>,
        treatment_date: Option<NaiveDate>,
    ) -> EligibilityCheck {
        if member_id.is_none() {
            return EligibilityCheck::failed(IneligibilityReason::MemberNotFound);
        }

        if let Some(date) = treatment_date {
            if date < self.config.effective_date {
                debug!(
                    treatment_date = %date,
                    effective_date = %self.config.effective_date,
                    "treatment predates policy"
                );
                return EligibilityCheck::failed(IneligibilityReason::PolicyInactive);
            }
        }

        EligibilityCheck::ok()
    }

    /// Checks the waiting periods for the diagnosed condition
    ///
    /// Ailment-specific periods are tested in document order and the first
    /// unmet one wins; the general initial waiting period is then applied
    /// as a backstop even when a matched ailment's own period is already
    /// satisfied.
    pub fn check_waiting_period(
        &self,
        join_date: NaiveDate,
        treatment_date: Option<NaiveDate>,
        diagnosis: &str,
    ) -> WaitingPeriodCheck {
        let Some(treatment_date) = treatment_date else {
            return WaitingPeriodCheck::ok();
        };

        let periods = &self.config.waiting_periods;
        let diagnosis_lower = diagnosis.to_lowercase();

        for entry in &periods.specific_ailments {
            if diagnosis_lower.contains(&entry.ailment.to_lowercase()) {
                if let Some(eligible_date) =
                    join_date.checked_add_days(Days::new(u64::from(entry.waiting_days)))
                {
                    if treatment_date < eligible_date {
                        debug!(
                            condition = %entry.ailment,
                            eligible_date = %eligible_date,
                            "waiting period unmet"
                        );
                        return WaitingPeriodCheck::unmet(entry.ailment.clone(), eligible_date);
                    }
                }
            }
        }

        if let Some(initial_eligible) =
            join_date.checked_add_days(Days::new(u64::from(periods.initial_waiting)))
        {
            if treatment_date < initial_eligible {
                debug!(eligible_date = %initial_eligible, "initial waiting period unmet");
                return WaitingPeriodCheck::unmet("initial", initial_eligible);
            }
        }

        WaitingPeriodCheck::ok()
    }

    /// Checks the claim amount against minimum, sub-limit or per-claim
    /// limit, and the annual limit, in that order
    ///
    /// The amount passed here is the post-exclusion approved claim amount.
    pub fn check_claim_limits(
        &self,
        claim_amount: Money,
        category: ClaimCategory,
        previous_claims: Money,
    ) -> LimitCheck {
        let coverage = &self.config.coverage_details;
        let currency = self.config.currency;
        let amount = claim_amount.amount();

        let min_claim = self.config.claim_requirements.minimum_claim_amount;
        if amount < min_claim {
            debug!(%claim_amount, minimum = %min_claim, "claim below minimum amount");
            return LimitCheck::breached(
                LimitType::BelowMinAmount,
                Money::new(min_claim, currency),
            );
        }

        match coverage.sub_limit_for(category) {
            Some(sub_limit) => {
                if amount > sub_limit {
                    debug!(%claim_amount, category = %category, limit = %sub_limit, "sub-limit exceeded");
                    return LimitCheck::breached(
                        LimitType::SubLimitExceeded,
                        Money::new(sub_limit, currency),
                    );
                }
            }
            None => {
                if amount > coverage.per_claim_limit {
                    debug!(%claim_amount, limit = %coverage.per_claim_limit, "per-claim limit exceeded");
                    return LimitCheck::breached(
                        LimitType::PerClaimExceeded,
                        Money::new(coverage.per_claim_limit, currency),
                    );
                }
            }
        }

        let year_total = previous_claims.amount() + amount;
        if year_total > coverage.annual_limit {
            let headroom = coverage.annual_limit - previous_claims.amount();
            debug!(%claim_amount, headroom = %headroom, "annual limit exceeded");
            return LimitCheck::breached(
                LimitType::AnnualLimitExceeded,
                Money::new(headroom, currency),
            );
        }

        LimitCheck::ok()
    }

    /// Computes copay, network discount, and net payable
    ///
    /// Only consultation claims carry a cost-sharing model; every other
    /// category passes through with the amount rounded to currency
    /// precision. The network benefit is inclusive of the copay, so the
    /// extra discount is the spread between the two rates, floored at
    /// zero.
    pub fn calculate_cost_sharing(
        &self,
        claim_amount: Money,
        category: ClaimCategory,
        is_network: bool,
    ) -> CostSharing {
        let currency = self.config.currency;

        if category != ClaimCategory::ConsultationFees {
            return CostSharing {
                copay: Money::zero(currency),
                discount: Money::zero(currency),
                net_payable: claim_amount.round_to_currency(),
            };
        }

        let terms = &self.config.coverage_details.consultation_fees;
        let copay = Rate::from_percentage(terms.copay_percentage).apply(&claim_amount);

        let discount = if is_network {
            let spread = (terms.network_discount - terms.copay_percentage).max(Decimal::ZERO);
            Rate::from_percentage(spread).apply(&claim_amount)
        } else {
            Money::zero(currency)
        };

        let net_payable = claim_amount - copay - discount;

        CostSharing {
            copay: copay.round_to_currency(),
            discount: discount.round_to_currency(),
            net_payable: net_payable.round_to_currency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AilmentWaitingPeriod, CategoryCover, ClaimRequirements, ConsultationCover,
        CoverageDetails, WaitingPeriods,
    };
    use rust_decimal_macros::dec;

    fn test_validator() -> PolicyValidator {
        let config = PolicyConfig {
            effective_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            currency: Currency::INR,
            waiting_periods: WaitingPeriods {
                initial_waiting: 30,
                specific_ailments: vec![
                    AilmentWaitingPeriod {
                        ailment: "cataract".to_string(),
                        waiting_days: 730,
                    },
                    AilmentWaitingPeriod {
                        ailment: "hernia".to_string(),
                        waiting_days: 365,
                    },
                ],
            },
            coverage_details: CoverageDetails {
                per_claim_limit: dec!(5000),
                annual_limit: dec!(50000),
                diagnostic_tests: CategoryCover {
                    sub_limit: dec!(10000),
                },
                pharmacy: CategoryCover {
                    sub_limit: dec!(5000),
                },
                dental: CategoryCover {
                    sub_limit: dec!(5000),
                },
                vision: CategoryCover {
                    sub_limit: dec!(5000),
                },
                alternative_medicine: CategoryCover {
                    sub_limit: dec!(5000),
                },
                consultation_fees: ConsultationCover {
                    copay_percentage: dec!(20),
                    network_discount: dec!(30),
                },
            },
            claim_requirements: ClaimRequirements {
                minimum_claim_amount: dec!(500),
            },
        };
        PolicyValidator::new(Arc::new(config))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inr(amount: Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }

    mod eligibility {
        use super::*;

        #[test]
        fn test_missing_member_id_is_not_found() {
            let validator = test_validator();
            let check = validator.check_member_eligibility(None, Some(date(2024, 6, 1)));

            assert!(!check.eligible);
            assert_eq!(check.reason, Some(IneligibilityReason::MemberNotFound));
        }

        #[test]
        fn test_treatment_before_effective_date_is_inactive() {
            let validator = test_validator();
            let member = MemberId::new("MEM001");
            let check = validator.check_member_eligibility(Some(&member), Some(date(2022, 12, 31)));

            assert!(!check.eligible);
            assert_eq!(check.reason, Some(IneligibilityReason::PolicyInactive));
        }

        #[test]
        fn test_member_with_valid_treatment_date_is_eligible() {
            let validator = test_validator();
            let member = MemberId::new("MEM001");
            let check = validator.check_member_eligibility(Some(&member), Some(date(2024, 6, 1)));

            assert!(check.eligible);
            assert_eq!(check.reason, None);
        }

        #[test]
        fn test_missing_treatment_date_fails_open() {
            let validator = test_validator();
            let member = MemberId::new("MEM001");
            let check = validator.check_member_eligibility(Some(&member), None);

            assert!(check.eligible);
        }
    }

    mod waiting_periods {
        use super::*;

        #[test]
        fn test_specific_ailment_period_unmet() {
            let validator = test_validator();
            let check = validator.check_waiting_period(
                date(2024, 1, 1),
                Some(date(2024, 6, 1)),
                "Cataract in left eye",
            );

            assert!(!check.satisfied);
            assert_eq!(check.condition.as_deref(), Some("cataract"));
            assert_eq!(check.eligible_date, Some(date(2025, 12, 31)));
        }

        #[test]
        fn test_first_configured_ailment_wins() {
            let validator = test_validator();
            let check = validator.check_waiting_period(
                date(2024, 1, 1),
                Some(date(2024, 6, 1)),
                "Cataract with hernia complications",
            );

            assert_eq!(check.condition.as_deref(), Some("cataract"));
        }

        #[test]
        fn test_initial_period_applies_without_ailment_match() {
            let validator = test_validator();
            let check =
                validator.check_waiting_period(date(2024, 1, 1), Some(date(2024, 1, 15)), "");

            assert!(!check.satisfied);
            assert_eq!(check.condition.as_deref(), Some("initial"));
            assert_eq!(check.eligible_date, Some(date(2024, 1, 31)));
        }

        #[test]
        fn test_initial_period_backstops_satisfied_ailment() {
            // Joined long enough ago for the hernia wait but inside the
            // initial wait of a fresh policy year restart.
            let validator = PolicyValidator::new(Arc::new(PolicyConfig {
                waiting_periods: WaitingPeriods {
                    initial_waiting: 90,
                    specific_ailments: vec![AilmentWaitingPeriod {
                        ailment: "hernia".to_string(),
                        waiting_days: 10,
                    }],
                },
                ..test_validator().config().clone()
            }));

            let check = validator.check_waiting_period(
                date(2024, 1, 1),
                Some(date(2024, 2, 1)),
                "Inguinal hernia",
            );

            assert!(!check.satisfied);
            assert_eq!(check.condition.as_deref(), Some("initial"));
            assert_eq!(check.eligible_date, Some(date(2024, 3, 31)));
        }

        #[test]
        fn test_satisfied_after_both_periods() {
            let validator = test_validator();
            let check = validator.check_waiting_period(
                date(2024, 1, 1),
                Some(date(2024, 6, 1)),
                "Viral fever",
            );

            assert!(check.satisfied);
            assert_eq!(check.condition, None);
            assert_eq!(check.eligible_date, None);
        }

        #[test]
        fn test_missing_treatment_date_fails_open() {
            let validator = test_validator();
            let check = validator.check_waiting_period(date(2024, 1, 1), None, "Cataract");

            assert!(check.satisfied);
        }
    }

    mod limits {
        use super::*;

        #[test]
        fn test_below_minimum_amount() {
            let validator = test_validator();
            let check = validator.check_claim_limits(
                inr(dec!(300)),
                ClaimCategory::ConsultationFees,
                Money::zero(Currency::INR),
            );

            assert!(!check.within_limits);
            let breach = check.breach.unwrap();
            assert_eq!(breach.limit_type, LimitType::BelowMinAmount);
            assert_eq!(breach.max_allowed.amount(), dec!(500));
        }

        #[test]
        fn test_dental_sub_limit_exceeded() {
            let validator = test_validator();
            let check = validator.check_claim_limits(
                inr(dec!(6000)),
                ClaimCategory::Dental,
                Money::zero(Currency::INR),
            );

            assert!(!check.within_limits);
            let breach = check.breach.unwrap();
            assert_eq!(breach.limit_type, LimitType::SubLimitExceeded);
            assert_eq!(breach.max_allowed.amount(), dec!(5000));
        }

        #[test]
        fn test_sub_limit_category_skips_per_claim_limit() {
            // Diagnostic tests allow up to 10000 even though the general
            // per-claim limit is 5000.
            let validator = test_validator();
            let check = validator.check_claim_limits(
                inr(dec!(8000)),
                ClaimCategory::DiagnosticTests,
                Money::zero(Currency::INR),
            );

            assert!(check.within_limits);
        }

        #[test]
        fn test_per_claim_limit_for_consultation() {
            let validator = test_validator();
            let check = validator.check_claim_limits(
                inr(dec!(5500)),
                ClaimCategory::ConsultationFees,
                Money::zero(Currency::INR),
            );

            let breach = check.breach.unwrap();
            assert_eq!(breach.limit_type, LimitType::PerClaimExceeded);
            assert_eq!(breach.max_allowed.amount(), dec!(5000));
        }

        #[test]
        fn test_annual_limit_reports_headroom() {
            let validator = test_validator();
            let check = validator.check_claim_limits(
                inr(dec!(4000)),
                ClaimCategory::ConsultationFees,
                inr(dec!(48000)),
            );

            let breach = check.breach.unwrap();
            assert_eq!(breach.limit_type, LimitType::AnnualLimitExceeded);
            assert_eq!(breach.max_allowed.amount(), dec!(2000));
        }

        #[test]
        fn test_exact_limit_amounts_pass() {
            let validator = test_validator();

            let at_minimum = validator.check_claim_limits(
                inr(dec!(500)),
                ClaimCategory::ConsultationFees,
                Money::zero(Currency::INR),
            );
            assert!(at_minimum.within_limits);

            let at_sub_limit = validator.check_claim_limits(
                inr(dec!(5000)),
                ClaimCategory::Dental,
                Money::zero(Currency::INR),
            );
            assert!(at_sub_limit.within_limits);
        }

        #[test]
        fn test_minimum_check_runs_before_sub_limit() {
            let validator = test_validator();
            let check = validator.check_claim_limits(
                inr(dec!(100)),
                ClaimCategory::Dental,
                Money::zero(Currency::INR),
            );

            let breach = check.breach.unwrap();
            assert_eq!(breach.limit_type, LimitType::BelowMinAmount);
        }
    }

    mod cost_sharing {
        use super::*;

        #[test]
        fn test_network_consultation_split() {
            let validator = test_validator();
            let sharing = validator.calculate_cost_sharing(
                inr(dec!(1000)),
                ClaimCategory::ConsultationFees,
                true,
            );

            assert_eq!(sharing.copay.amount(), dec!(200.00));
            assert_eq!(sharing.discount.amount(), dec!(100.00));
            assert_eq!(sharing.net_payable.amount(), dec!(700.00));
        }

        #[test]
        fn test_non_network_consultation_has_no_discount() {
            let validator = test_validator();
            let sharing = validator.calculate_cost_sharing(
                inr(dec!(1000)),
                ClaimCategory::ConsultationFees,
                false,
            );

            assert_eq!(sharing.copay.amount(), dec!(200.00));
            assert!(sharing.discount.is_zero());
            assert_eq!(sharing.net_payable.amount(), dec!(800.00));
        }

        #[test]
        fn test_other_categories_pass_through() {
            let validator = test_validator();
            let sharing =
                validator.calculate_cost_sharing(inr(dec!(4500)), ClaimCategory::Dental, true);

            assert!(sharing.copay.is_zero());
            assert!(sharing.discount.is_zero());
            assert_eq!(sharing.net_payable.amount(), dec!(4500.00));
        }

        #[test]
        fn test_copay_above_network_rate_floors_discount_at_zero() {
            let mut config = test_validator().config().clone();
            config.coverage_details.consultation_fees = ConsultationCover {
                copay_percentage: dec!(40),
                network_discount: dec!(30),
            };
            let validator = PolicyValidator::new(Arc::new(config));

            let sharing = validator.calculate_cost_sharing(
                inr(dec!(1000)),
                ClaimCategory::ConsultationFees,
                true,
            );

            assert_eq!(sharing.copay.amount(), dec!(400.00));
            assert!(sharing.discount.is_zero());
            assert_eq!(sharing.net_payable.amount(), dec!(600.00));
        }
    }
}
