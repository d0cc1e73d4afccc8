//! Claim adjudication pipeline
//!
//! Adjudication runs a fixed sequence of gates over the extracted
//! documents and member context. Each stage consumes the working claim
//! and either passes it on or produces the final decision; once a gate
//! has decided, no later stage runs. All business outcomes, including
//! every rejection, are ordinary return values.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use core_kernel::{parse_claim_date, ClaimId, Clock, Money, SystemClock};
use domain_policy::{
    assess_coverage, requires_preauthorization, ClaimCategory, PolicyConfig, PolicyValidator,
};

use crate::claim_data::{Bill, ClaimData, Prescription};
use crate::decision::{Decision, DecisionStatus, Deductions, ReasonCode};
use crate::documents::validate_documents;
use crate::fraud;
use crate::member::MemberContext;

/// Hospital brands eligible for the network discount
const NETWORK_HOSPITALS: &[&str] = &["Apollo", "Fortis", "Max", "Manipal", "Narayana"];

/// Missing pre-authorization rejects claims above this amount
const PREAUTH_AMOUNT_THRESHOLD: Decimal = dec!(10000);

/// Outcome of a single pipeline stage
enum StageOutcome {
    /// Stage passed; adjudication continues with the updated claim
    Continue(WorkingClaim),
    /// Stage produced the final decision
    Terminal(Decision),
}

impl StageOutcome {
    fn and_then(self, stage: impl FnOnce(WorkingClaim) -> StageOutcome) -> StageOutcome {
        match self {
            StageOutcome::Continue(working) => stage(working),
            StageOutcome::Terminal(decision) => StageOutcome::Terminal(decision),
        }
    }
}

/// Per-claim state threaded through the pipeline
///
/// Later gates read amounts computed by earlier ones; in particular the
/// pre-authorization and limit gates evaluate the post-exclusion amount,
/// never the raw claimed one.
struct WorkingClaim {
    prescription: Prescription,
    bill: Bill,
    member: Option<MemberContext>,
    decision: Decision,
    treatment_date: Option<NaiveDate>,
    claim_amount: Decimal,
    treatments: Vec<String>,
    tests: Vec<String>,
    /// Defaulted until the coverage stage classifies the claim
    category: ClaimCategory,
    excluded_items: Vec<String>,
    excluded_amount: Decimal,
    approved_claim_amount: Decimal,
}

/// Runs claims through the adjudication pipeline
///
/// Holds shared policy terms and a clock for claim-id generation. The
/// adjudicator is immutable after construction and safe to share across
/// threads; every call is independent.
#[derive(Clone)]
pub struct ClaimAdjudicator {
    validator: PolicyValidator,
    clock: Arc<dyn Clock>,
}

impl ClaimAdjudicator {
    /// Creates an adjudicator over shared policy terms
    pub fn new(config: Arc<PolicyConfig>) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an adjudicator with an injected clock
    pub fn with_clock(config: Arc<PolicyConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            validator: PolicyValidator::new(config),
            clock,
        }
    }

    /// Adjudicates one claim and returns its decision
    pub fn adjudicate(&self, claim: &ClaimData, member: Option<&MemberContext>) -> Decision {
        let claim_id = ClaimId::generate(self.clock.as_ref());
        let member_name = match member {
            Some(context) => context.member_name.clone(),
            None => claim
                .prescription
                .as_ref()
                .and_then(|p| p.patient_name.clone()),
        };
        let decision = Decision::pending(claim_id, self.validator.currency());

        let outcome = self
            .check_documents(claim, member, decision)
            .and_then(|working| self.check_eligibility(working))
            .and_then(|working| self.check_waiting_period(working))
            .and_then(|working| self.check_coverage(working))
            .and_then(|working| self.apply_exclusions(working))
            .and_then(|working| self.check_fraud(working))
            .and_then(|working| self.check_preauthorization(working))
            .and_then(|working| self.check_limits(working));

        let decision = match outcome {
            StageOutcome::Continue(working) => self.finalize(working),
            StageOutcome::Terminal(decision) => decision,
        };

        info!(
            claim_id = %decision.claim_id,
            member = ?member_name,
            status = ?decision.status,
            approved = %decision.approved_amount,
            "claim adjudicated"
        );
        decision
    }

    fn check_documents(
        &self,
        claim: &ClaimData,
        member: Option<&MemberContext>,
        mut decision: Decision,
    ) -> StageOutcome {
        let check = validate_documents(claim);
        if !check.valid {
            debug!(claim_id = %decision.claim_id, reasons = ?check.reasons, "documents rejected");
            decision.status = DecisionStatus::Rejected;
            decision.rejection_reasons = check.reasons;
            decision.confidence_score = 1.0;
            decision.notes = "Document validation failed".to_string();
            return StageOutcome::Terminal(decision);
        }

        let prescription = claim.prescription.clone().unwrap_or_default();
        let bill = claim.bill.clone().unwrap_or_default();
        let member = member.cloned();

        // Registry values take precedence over extracted ones; the
        // extracted fallback applies only when no context was supplied.
        let treatment_date = match &member {
            Some(context) => context.treatment_date,
            None => prescription
                .treatment_date
                .as_deref()
                .and_then(parse_claim_date),
        };
        let claim_amount = match &member {
            Some(context) => context.claim_amount.unwrap_or(Decimal::ZERO),
            None => bill.total_amount.unwrap_or(Decimal::ZERO),
        };

        let treatments = if prescription.procedures.is_empty() {
            prescription.treatment.iter().cloned().collect()
        } else {
            prescription.procedures.clone()
        };
        let tests = if prescription.tests_prescribed.is_empty() {
            bill.test_names.clone()
        } else {
            prescription.tests_prescribed.clone()
        };

        StageOutcome::Continue(WorkingClaim {
            prescription,
            bill,
            member,
            decision,
            treatment_date,
            claim_amount,
            treatments,
            tests,
            category: ClaimCategory::ConsultationFees,
            excluded_items: Vec::new(),
            excluded_amount: Decimal::ZERO,
            approved_claim_amount: claim_amount,
        })
    }

    fn check_eligibility(&self, mut working: WorkingClaim) -> StageOutcome {
        let member_id = working.member.as_ref().and_then(|m| m.member_id.clone());
        let eligibility = self
            .validator
            .check_member_eligibility(member_id.as_ref(), working.treatment_date);

        if !eligibility.eligible {
            let decision = &mut working.decision;
            decision.status = DecisionStatus::Rejected;
            if let Some(reason) = eligibility.reason {
                decision.rejection_reasons.push(reason.into());
            }
            decision.confidence_score = 0.98;
            decision.notes = "Member eligibility check failed".to_string();
            return StageOutcome::Terminal(working.decision);
        }

        StageOutcome::Continue(working)
    }

    fn check_waiting_period(&self, mut working: WorkingClaim) -> StageOutcome {
        let join_date = working.member.as_ref().and_then(|m| m.member_join_date);
        let Some(join_date) = join_date else {
            return StageOutcome::Continue(working);
        };

        let diagnosis = working.prescription.diagnosis.as_deref().unwrap_or("");
        let check =
            self.validator
                .check_waiting_period(join_date, working.treatment_date, diagnosis);

        if !check.satisfied {
            let condition = check.condition.as_deref().unwrap_or("Treatment").to_string();
            let eligible_date = check
                .eligible_date
                .map(|date| date.to_string())
                .unwrap_or_default();

            let decision = &mut working.decision;
            decision.status = DecisionStatus::Rejected;
            decision.rejection_reasons.push(ReasonCode::WaitingPeriod);
            decision.confidence_score = 0.96;
            decision.notes = format!(
                "{} has waiting period. Eligible from {}",
                condition, eligible_date
            );
            return StageOutcome::Terminal(working.decision);
        }

        StageOutcome::Continue(working)
    }

    fn check_coverage(&self, mut working: WorkingClaim) -> StageOutcome {
        let diagnosis = working.prescription.diagnosis.as_deref().unwrap_or("");
        let assessment = assess_coverage(
            diagnosis,
            &working.treatments,
            &working.prescription.medicines_prescribed,
        );
        working.category = assessment.category;

        if !assessment.covered && !assessment.partial_coverage {
            debug!(
                claim_id = %working.decision.claim_id,
                excluded = ?assessment.excluded_items,
                "claim voided by exclusion"
            );
            let decision = &mut working.decision;
            decision.status = DecisionStatus::Rejected;
            decision.rejection_reasons.push(ReasonCode::ServiceNotCovered);
            decision.confidence_score = 0.97;
            decision.notes = format!(
                "Treatment/service not covered under policy: {}",
                assessment.excluded_items.join(", ")
            );
            return StageOutcome::Terminal(working.decision);
        }

        working.excluded_items = assessment.excluded_items;
        StageOutcome::Continue(working)
    }

    /// Prices excluded line items and reduces the claimable amount
    ///
    /// Never terminal; later gates work against the reduced amount.
    fn apply_exclusions(&self, mut working: WorkingClaim) -> StageOutcome {
        if working.excluded_items.is_empty() {
            return StageOutcome::Continue(working);
        }

        working.excluded_amount = excluded_amount(&working.bill, &working.excluded_items);
        working.approved_claim_amount = working.claim_amount - working.excluded_amount;

        let decision = &mut working.decision;
        decision.status = DecisionStatus::Partial;
        decision.rejected_items = Some(working.excluded_items.clone());
        decision.flags.push("Contains excluded items".to_string());

        StageOutcome::Continue(working)
    }

    fn check_fraud(&self, mut working: WorkingClaim) -> StageOutcome {
        let score = fraud::fraud_score(working.member.as_ref());
        if score > fraud::MANUAL_REVIEW_THRESHOLD {
            debug!(
                claim_id = %working.decision.claim_id,
                %score,
                "fraud indicators above threshold"
            );
            let repeat_same_day = working
                .member
                .as_ref()
                .map_or(false, |m| m.previous_claims_same_day >= 2);

            let decision = &mut working.decision;
            decision.status = DecisionStatus::ManualReview;
            if repeat_same_day {
                decision.flags.push("Multiple claims same day".to_string());
            }
            decision.flags.push("Unusual pattern detected".to_string());
            decision.confidence_score = 0.65;
            decision.notes = "Flagged for manual review due to unusual patterns".to_string();
            return StageOutcome::Terminal(working.decision);
        }

        StageOutcome::Continue(working)
    }

    fn check_preauthorization(&self, mut working: WorkingClaim) -> StageOutcome {
        if !requires_preauthorization(&working.treatments, &working.tests) {
            return StageOutcome::Continue(working);
        }

        let obtained = working.member.as_ref().map_or(false, |m| m.preauth_obtained);
        if !obtained && working.approved_claim_amount > PREAUTH_AMOUNT_THRESHOLD {
            let decision = &mut working.decision;
            decision.status = DecisionStatus::Rejected;
            decision.rejection_reasons.push(ReasonCode::PreAuthMissing);
            decision.confidence_score = 0.94;
            decision.notes =
                "Pre-authorization required for MRI/CT scans above ₹10000".to_string();
            return StageOutcome::Terminal(working.decision);
        }

        StageOutcome::Continue(working)
    }

    fn check_limits(&self, mut working: WorkingClaim) -> StageOutcome {
        let currency = self.validator.currency();
        let previous_claims = working
            .member
            .as_ref()
            .map_or(Decimal::ZERO, |m| m.previous_claims_ytd);

        let check = self.validator.check_claim_limits(
            Money::new(working.approved_claim_amount, currency),
            working.category,
            Money::new(previous_claims, currency),
        );

        if let Some(breach) = check.breach {
            let decision = &mut working.decision;
            decision.status = DecisionStatus::Rejected;
            decision.rejection_reasons.push(breach.limit_type.into());
            decision.confidence_score = 0.98;
            decision.notes = if working.excluded_amount > Decimal::ZERO {
                format!(
                    "Even after excluding ₹{}, remaining claim exceeds {}. Max allowed: ₹{}",
                    working.excluded_amount,
                    breach.limit_type,
                    breach.max_allowed.amount()
                )
            } else {
                format!(
                    "Claim exceeds {}. Max allowed: ₹{}",
                    breach.limit_type,
                    breach.max_allowed.amount()
                )
            };
            return StageOutcome::Terminal(working.decision);
        }

        StageOutcome::Continue(working)
    }

    fn finalize(&self, mut working: WorkingClaim) -> Decision {
        let hospital = working
            .bill
            .hospital_name
            .clone()
            .or_else(|| working.member.as_ref().and_then(|m| m.hospital.clone()));
        let is_network = is_network_hospital(hospital.as_deref());

        let currency = self.validator.currency();
        let sharing = self.validator.calculate_cost_sharing(
            Money::new(working.approved_claim_amount, currency),
            working.category,
            is_network,
        );

        let decision = &mut working.decision;
        decision.approved_amount = sharing.net_payable;
        decision.deductions = Deductions {
            copay: Some(sharing.copay),
            discount: Some(sharing.discount),
        };
        if sharing.discount.is_positive() {
            decision.network_discount = Some(sharing.discount);
        }

        if decision.status == DecisionStatus::Partial {
            decision.confidence_score = 0.92;
        } else {
            decision.status = DecisionStatus::Approved;
            decision.confidence_score = 0.95;
        }
        decision.notes = format!("Claim processed successfully. Category: {}", working.category);

        working.decision
    }
}

/// Case-insensitive brand match against the network allow-list
fn is_network_hospital(hospital_name: Option<&str>) -> bool {
    let Some(name) = hospital_name else {
        return false;
    };
    let name_lower = name.to_lowercase();
    NETWORK_HOSPITALS
        .iter()
        .any(|brand| name_lower.contains(&brand.to_lowercase()))
}

/// Sums bill amounts attributable to the excluded items
///
/// Line items match when either text contains the other, so a terse bill
/// line still pairs with the fuller prescription wording. Itemized
/// surcharge fields are added per excluded item that names them.
fn excluded_amount(bill: &Bill, excluded_items: &[String]) -> Decimal {
    let mut total = Decimal::ZERO;

    for item in &bill.items {
        let item_name = item.name.to_lowercase();
        if item_name.is_empty() {
            continue;
        }
        for excluded in excluded_items {
            let excluded_lower = excluded.to_lowercase();
            if excluded_lower.contains(&item_name) || item_name.contains(&excluded_lower) {
                total += item.amount;
            }
        }
    }

    for excluded in excluded_items {
        let excluded_lower = excluded.to_lowercase();
        if excluded_lower.contains("whitening") || excluded_lower.contains("cosmetic") {
            total += bill.teeth_whitening.unwrap_or(Decimal::ZERO);
        }
        if excluded_lower.contains("weight") || excluded_lower.contains("diet") {
            total += bill.diet_plan.unwrap_or(Decimal::ZERO);
        }
    }

    total
}
