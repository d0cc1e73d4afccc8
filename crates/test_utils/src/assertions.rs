//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for adjudication decisions
//! that give more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_claims::{Decision, DecisionStatus, ReasonCode};
use rust_decimal::Decimal;

/// Asserts that a decision carries the expected status
pub fn assert_status(decision: &Decision, expected: DecisionStatus) {
    assert_eq!(
        decision.status, expected,
        "Status mismatch for {}: actual={:?}, expected={:?}, notes={:?}",
        decision.claim_id, decision.status, expected, decision.notes
    );
}

/// Asserts that a rejection reason is present on the decision
pub fn assert_reason_present(decision: &Decision, reason: ReasonCode) {
    assert!(
        decision.rejection_reasons.contains(&reason),
        "Reason {} missing on {}: reasons={:?}",
        reason,
        decision.claim_id,
        decision.rejection_reasons
    );
}

/// Asserts that a decision is a rejection for the given reason
///
/// Rejections never carry a payout, so the approved amount is checked
/// alongside the status and reason.
pub fn assert_rejected_with(decision: &Decision, reason: ReasonCode) {
    assert_status(decision, DecisionStatus::Rejected);
    assert_reason_present(decision, reason);
    assert!(
        decision.approved_amount.is_zero(),
        "Rejected claim {} carries a payout of {}",
        decision.claim_id,
        decision.approved_amount.amount()
    );
}

/// Asserts that a decision approves exactly the expected net amount
pub fn assert_approved_for(decision: &Decision, amount: Decimal) {
    assert_status(decision, DecisionStatus::Approved);
    assert!(
        decision.rejection_reasons.is_empty(),
        "Approved claim {} carries rejection reasons {:?}",
        decision.claim_id,
        decision.rejection_reasons
    );
    assert_money_amount(&decision.approved_amount, amount);
}

/// Asserts that a flag was raised on the decision
pub fn assert_flag_present(decision: &Decision, flag: &str) {
    assert!(
        decision.flags.iter().any(|f| f == flag),
        "Flag {:?} missing on {}: flags={:?}",
        flag,
        decision.claim_id,
        decision.flags
    );
}

/// Asserts that a decision carries the expected confidence score
pub fn assert_confidence_eq(decision: &Decision, expected: f64) {
    assert!(
        (decision.confidence_score - expected).abs() < 1e-9,
        "Confidence mismatch for {}: actual={}, expected={}",
        decision.claim_id,
        decision.confidence_score,
        expected
    );
}

/// Asserts that a money value carries exactly the expected amount
pub fn assert_money_amount(money: &Money, expected: Decimal) {
    assert_eq!(
        money.amount(),
        expected,
        "Money amount mismatch: actual={}, expected={}",
        money.amount(),
        expected
    );
}
