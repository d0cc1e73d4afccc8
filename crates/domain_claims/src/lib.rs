//! Claims Adjudication Domain
//!
//! This crate turns extracted claim documents and member registry context
//! into a final claim decision. It owns the document consistency checks,
//! fraud indicator scoring, and the ordered adjudication pipeline that
//! applies the policy rules from `domain_policy`.
//!
//! # Pipeline
//!
//! ```text
//! documents -> eligibility -> waiting period -> coverage -> exclusions
//!           -> fraud -> pre-authorization -> limits -> payout
//! ```
//!
//! Every stage can end adjudication with a terminal decision; rejections,
//! partial approvals, and manual-review escalations are all data, never
//! errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_claims::ClaimAdjudicator;
//! use domain_policy::PolicyConfig;
//! use std::sync::Arc;
//!
//! let config = Arc::new(PolicyConfig::from_file("policy_terms.json")?);
//! let adjudicator = ClaimAdjudicator::new(config);
//!
//! let decision = adjudicator.adjudicate(&claim_data, Some(&member));
//! println!("{}: {}", decision.claim_id, decision.notes);
//! ```

pub mod adjudicator;
pub mod claim_data;
pub mod decision;
pub mod documents;
pub mod fraud;
pub mod member;

pub use adjudicator::ClaimAdjudicator;
pub use claim_data::{Bill, BillItem, ClaimData, Prescription, TestReport};
pub use decision::{Decision, DecisionStatus, Deductions, ReasonCode};
pub use documents::{is_valid_doctor_registration, validate_documents, DocumentCheck};
pub use fraud::{fraud_score, MANUAL_REVIEW_THRESHOLD};
pub use member::MemberContext;
