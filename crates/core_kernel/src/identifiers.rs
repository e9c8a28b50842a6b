//! Strongly-typed identifiers for domain entities
//!
//! The storage layer keys every table with an auto-increment integer. Wrapping
//! those integers in newtypes prevents a patient id from being passed where a
//! provider id is expected, while still rendering as the bare number in TISS
//! documents (card numbers and guide numbers are the raw ids).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an identifier cannot be parsed
#[derive(Debug, Error)]
#[error("invalid {entity} identifier '{input}': {source}")]
pub struct IdParseError {
    pub entity: &'static str,
    pub input: String,
    #[source]
    pub source: ParseIntError,
}

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from its raw storage key
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw storage key
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Human readable entity name, used in "not found" messages
            pub fn entity_name() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self).map_err(|source| IdParseError {
                    entity: $entity,
                    input: s.to_string(),
                    source,
                })
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(ClaimId, "Claim");
define_id!(PatientId, "Patient");
define_id!(ProviderId, "Provider");
define_id!(HealthPlanId, "Health plan");
