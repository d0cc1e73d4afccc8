//! Fraud indicator scoring
//!
//! Each indicator adds a fixed weight to the claim's score. The pipeline
//! escalates to manual review when the score crosses the threshold; the
//! score itself never rejects a claim.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::member::MemberContext;

/// Scores above this are escalated to manual review
pub const MANUAL_REVIEW_THRESHOLD: Decimal = dec!(0.5);

/// Computes the weighted fraud score for a claim, in [0, 1]
///
/// Claims without member context cannot be profiled and score zero.
pub fn fraud_score(member: Option<&MemberContext>) -> Decimal {
    let Some(member) = member else {
        return Decimal::ZERO;
    };

    let mut score = Decimal::ZERO;

    // Repeat same-day claims; three or more is a strong signal
    if member.previous_claims_same_day >= 3 {
        score += dec!(0.5);
    } else if member.previous_claims_same_day >= 2 {
        score += dec!(0.3);
    }

    // High claim frequency
    if member.claims_last_month >= 5 {
        score += dec!(0.3);
    }

    // Amount above the usual outpatient band
    if member.claim_amount.unwrap_or(Decimal::ZERO) > dec!(4500) {
        score += dec!(0.1);
    }

    score.min(Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_with(same_day: u32, last_month: u32, amount: Decimal) -> MemberContext {
        MemberContext {
            previous_claims_same_day: same_day,
            claims_last_month: last_month,
            claim_amount: Some(amount),
            ..MemberContext::default()
        }
    }

    #[test]
    fn test_no_member_context_scores_zero() {
        assert_eq!(fraud_score(None), Decimal::ZERO);
    }

    #[test]
    fn test_clean_history_scores_zero() {
        let member = member_with(0, 0, dec!(1200));
        assert_eq!(fraud_score(Some(&member)), Decimal::ZERO);
    }

    #[test]
    fn test_two_same_day_claims_score_light() {
        let member = member_with(2, 0, dec!(1200));
        assert_eq!(fraud_score(Some(&member)), dec!(0.3));
    }

    #[test]
    fn test_three_same_day_claims_score_heavy() {
        let member = member_with(3, 0, dec!(1200));
        assert_eq!(fraud_score(Some(&member)), dec!(0.5));
    }

    #[test]
    fn test_heavy_same_day_weight_replaces_light_one() {
        // The 0.5 branch wins outright; the weights never stack.
        let member = member_with(4, 0, dec!(1200));
        assert_eq!(fraud_score(Some(&member)), dec!(0.5));
    }

    #[test]
    fn test_monthly_frequency_adds_weight() {
        let member = member_with(0, 5, dec!(1200));
        assert_eq!(fraud_score(Some(&member)), dec!(0.3));
    }

    #[test]
    fn test_high_amount_adds_weight() {
        let member = member_with(0, 0, dec!(4800));
        assert_eq!(fraud_score(Some(&member)), dec!(0.1));
    }

    #[test]
    fn test_amount_at_band_edge_is_clean() {
        let member = member_with(0, 0, dec!(4500));
        assert_eq!(fraud_score(Some(&member)), Decimal::ZERO);
    }

    #[test]
    fn test_all_indicators_accumulate() {
        let member = member_with(3, 5, dec!(5000));
        assert_eq!(fraud_score(Some(&member)), dec!(0.9));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let member = member_with(3, 0, dec!(1200));
        assert!(fraud_score(Some(&member)) <= MANUAL_REVIEW_THRESHOLD);

        let member = member_with(3, 0, dec!(4800));
        assert!(fraud_score(Some(&member)) > MANUAL_REVIEW_THRESHOLD);
    }
}
