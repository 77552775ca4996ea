//! Strongly-typed identifiers for entities owned by the identity store
//!
//! The identity store assigns a numeric customer identifier when an identity
//! is created. Wrapping it in a newtype keeps it from being confused with
//! other integers travelling through the adapters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Internal identifier assigned to a customer by the identity store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i32);

impl CustomerId {
    /// Creates an identifier from its raw value
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw value
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = ParseIntError;

    /// Parses a decimal integer with an optional sign. Surrounding whitespace
    /// is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>().map(Self)
    }
}

impl From<i32> for CustomerId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<CustomerId> for i32 {
    fn from(id: CustomerId) -> i32 {
        id.0
    }
}
