//! Core Kernel - Foundational types and utilities for the claims engine
//!
//! This crate provides the fundamental building blocks used across the
//! domain modules:
//! - Money types with precise decimal arithmetic
//! - Clock abstraction and fail-open date parsing
//! - Strongly-typed claim and member identifiers

pub mod identifiers;
pub mod money;
pub mod temporal;

pub use identifiers::{ClaimId, MemberId};
pub use money::{Currency, Money, MoneyError, Rate};
pub use temporal::{parse_claim_date, Clock, FixedClock, SystemClock, CLAIM_DATE_FORMAT};
