//! Time primitives for claim processing
//!
//! This module provides the clock abstraction that keeps identifier
//! generation and any time-derived behavior deterministic under test,
//! plus fail-open parsing for dates arriving from document extraction.

use chrono::{DateTime, NaiveDate, Utc};

/// Calendar date format used across extracted documents
pub const CLAIM_DATE_FORMAT: &str = "%Y-%m-%d";

/// A source of the current instant
///
/// Production code uses [`SystemClock`]; tests inject [`FixedClock`] so
/// repeated runs produce identical output.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always reports the given instant
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Parses an extracted document date, failing open
///
/// Extraction output is untrusted. A value that does not parse as
/// [`CLAIM_DATE_FORMAT`] yields `None` and the caller treats the field
/// as absent rather than rejecting the claim.
pub fn parse_claim_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), CLAIM_DATE_FORMAT).ok()
}
