//! Member registry context for a claim

use chrono::NaiveDate;
use core_kernel::MemberId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Member and history data supplied by the registry alongside a claim
///
/// Registry data is typed at the boundary, unlike extracted document
/// data. Counters default to zero for members with no claim history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberContext {
    pub member_id: Option<MemberId>,
    pub member_name: Option<String>,
    pub member_join_date: Option<NaiveDate>,
    /// Treatment date on record; preferred over the extracted one
    pub treatment_date: Option<NaiveDate>,
    /// Claimed amount on record; preferred over the bill total
    pub claim_amount: Option<Decimal>,
    /// Total claimed this policy year, before this claim
    pub previous_claims_ytd: Decimal,
    pub previous_claims_same_day: u32,
    pub claims_last_month: u32,
    pub hospital: Option<String>,
    pub preauth_obtained: bool,
}
