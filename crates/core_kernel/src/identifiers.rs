//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers around the business-facing id strings provides
//! type safety and prevents accidental mixing of different identifier types.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::temporal::Clock;

macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an existing value
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

// Claim identifiers carry a generation timestamp so downstream systems can
// order them without a database sequence.
define_string_id!(ClaimId);

// Member identifiers are issued by the member registry and opaque here.
define_string_id!(MemberId);

impl ClaimId {
    /// Identifier prefix for generated claim ids
    pub const PREFIX: &'static str = "CLM";

    /// Generates a claim identifier from the clock's current instant
    ///
    /// The format is `CLM_` followed by the UTC timestamp as
    /// `%Y%m%d%H%M%S`. A fixed clock therefore yields a fixed identifier.
    pub fn generate(clock: &dyn Clock) -> Self {
        Self(format!(
            "{}_{}",
            Self::PREFIX,
            clock.now().format("%Y%m%d%H%M%S")
        ))
    }
}
