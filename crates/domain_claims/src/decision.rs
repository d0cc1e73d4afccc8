//! Adjudication decision record

use core_kernel::{ClaimId, Currency, Money};
use domain_policy::{IneligibilityReason, LimitType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Disposition of an adjudicated claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionStatus {
    /// Not yet adjudicated
    Pending,
    /// Payable in full after deductions
    Approved,
    /// Not payable
    Rejected,
    /// Payable with excluded line items removed
    Partial,
    /// Escalated to a human reviewer
    ManualReview,
}

/// Machine-readable rejection reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    MissingDocuments,
    InvalidDoctorReg,
    InvalidPrescription,
    PatientMismatch,
    DateMismatch,
    MemberNotFound,
    PolicyInactive,
    WaitingPeriod,
    ServiceNotCovered,
    PreAuthMissing,
    BelowMinAmount,
    SubLimitExceeded,
    PerClaimExceeded,
    AnnualLimitExceeded,
}

impl ReasonCode {
    /// Returns the wire code for this reason
    pub fn code(&self) -> &'static str {
        match self {
            ReasonCode::MissingDocuments => "MISSING_DOCUMENTS",
            ReasonCode::InvalidDoctorReg => "INVALID_DOCTOR_REG",
            ReasonCode::InvalidPrescription => "INVALID_PRESCRIPTION",
            ReasonCode::PatientMismatch => "PATIENT_MISMATCH",
            ReasonCode::DateMismatch => "DATE_MISMATCH",
            ReasonCode::MemberNotFound => "MEMBER_NOT_FOUND",
            ReasonCode::PolicyInactive => "POLICY_INACTIVE",
            ReasonCode::WaitingPeriod => "WAITING_PERIOD",
            ReasonCode::ServiceNotCovered => "SERVICE_NOT_COVERED",
            ReasonCode::PreAuthMissing => "PRE_AUTH_MISSING",
            ReasonCode::BelowMinAmount => "BELOW_MIN_AMOUNT",
            ReasonCode::SubLimitExceeded => "SUB_LIMIT_EXCEEDED",
            ReasonCode::PerClaimExceeded => "PER_CLAIM_EXCEEDED",
            ReasonCode::AnnualLimitExceeded => "ANNUAL_LIMIT_EXCEEDED",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<IneligibilityReason> for ReasonCode {
    fn from(reason: IneligibilityReason) -> Self {
        match reason {
            IneligibilityReason::MemberNotFound => ReasonCode::MemberNotFound,
            IneligibilityReason::PolicyInactive => ReasonCode::PolicyInactive,
        }
    }
}

impl From<LimitType> for ReasonCode {
    fn from(limit_type: LimitType) -> Self {
        match limit_type {
            LimitType::BelowMinAmount => ReasonCode::BelowMinAmount,
            LimitType::SubLimitExceeded => ReasonCode::SubLimitExceeded,
            LimitType::PerClaimExceeded => ReasonCode::PerClaimExceeded,
            LimitType::AnnualLimitExceeded => ReasonCode::AnnualLimitExceeded,
        }
    }
}

/// Amounts withheld from the approved payout
///
/// Both fields stay unset until the payout stage runs; a decision that
/// terminates earlier carries an empty deductions block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deductions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copay: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Money>,
}

/// The adjudication outcome for one claim
///
/// Serialized field order is part of the record contract; optional
/// trailing fields appear only once a stage has set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub claim_id: ClaimId,
    #[serde(rename = "decision")]
    pub status: DecisionStatus,
    pub approved_amount: Money,
    pub rejection_reasons: Vec<ReasonCode>,
    pub flags: Vec<String>,
    pub confidence_score: f64,
    pub notes: String,
    pub deductions: Deductions,
    pub next_steps: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_discount: Option<Money>,
}

impl Decision {
    /// Creates the blank record every adjudication starts from
    pub fn pending(claim_id: ClaimId, currency: Currency) -> Self {
        Self {
            claim_id,
            status: DecisionStatus::Pending,
            approved_amount: Money::zero(currency),
            rejection_reasons: Vec::new(),
            flags: Vec::new(),
            confidence_score: 0.0,
            notes: String::new(),
            deductions: Deductions::default(),
            next_steps: String::new(),
            rejected_items: None,
            network_discount: None,
        }
    }

    /// True when the claim will not be paid as submitted
    pub fn is_terminal_rejection(&self) -> bool {
        matches!(
            self.status,
            DecisionStatus::Rejected | DecisionStatus::ManualReview
        )
    }
}
