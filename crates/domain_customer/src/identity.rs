//! Identity store data transfer objects
//!
//! These mirror the JSON exchanged with the identity store. An identity is
//! keyed by a numeric customer id and an external connection id, and carries
//! its person data as a map of attribute code to attribute.

use std::collections::BTreeMap;

use core_kernel::CustomerId;
use serde::{Deserialize, Serialize};

/// A single named attribute of an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAttribute {
    pub key: String,
    pub value: Option<String>,
}

/// An identity as exposed by the identity store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// External account identifier
    #[serde(default)]
    pub connection_id: Option<String>,
    /// Internal identifier assigned by the store
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    /// Attributes keyed by their code
    #[serde(default)]
    pub attributes: BTreeMap<String, IdentityAttribute>,
}

impl IdentityRecord {
    /// Writes an attribute, replacing any previous value under the same code
    pub fn set_attribute(&mut self, code: impl Into<String>, value: Option<String>) {
        let key = code.into();
        self.attributes.insert(key.clone(), IdentityAttribute { key, value });
    }

    /// Returns the attribute stored under `code`
    pub fn attribute(&self, code: &str) -> Option<&IdentityAttribute> {
        self.attributes.get(code)
    }

    /// Returns the value stored under `code`, treating a missing attribute
    /// and a null value alike
    pub fn attribute_value(&self, code: &str) -> Option<&str> {
        self.attribute(code).and_then(|a| a.value.as_deref())
    }
}

/// The application that authored a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub application_code: String,
}

/// A request to create or modify an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityChange {
    pub identity: IdentityRecord,
    pub author: Author,
}

impl IdentityChange {
    /// Creates a change authored by the given application
    pub fn new(identity: IdentityRecord, application_code: impl Into<String>) -> Self {
        Self {
            identity,
            author: Author {
                application_code: application_code.into(),
            },
        }
    }
}
