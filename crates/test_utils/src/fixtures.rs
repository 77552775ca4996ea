//! Pre-built Test Fixtures
//!
//! Ready-to-use customers, identities and attribute tables. Values are
//! fixed so tests stay predictable.

use core_kernel::CustomerId;
use domain_customer::{AttributeCodeTable, Customer, IdentityRecord};

/// Fixture for attribute code tables
pub struct AttributeFixtures;

impl AttributeFixtures {
    /// The table used when no setting overrides it
    pub fn default_table() -> AttributeCodeTable {
        AttributeCodeTable::default()
    }

    /// A table using dotted identity store attribute names
    pub fn dotted_table() -> AttributeCodeTable {
        AttributeCodeTable {
            given_name: "user.name.given".to_string(),
            family_name: "user.name.family".to_string(),
            email: "user.home-info.online.email".to_string(),
            fixed_phone: "user.home-info.telecom.telephone.number".to_string(),
            mobile_phone: "user.home-info.telecom.mobile.number".to_string(),
        }
    }
}

/// Fixture for customer test data
pub struct CustomerFixtures;

impl CustomerFixtures {
    pub const GUID: &'static str = "G1";

    /// A customer with every field set
    pub fn complete() -> Customer {
        Customer {
            id: Some(CustomerId::new(42)),
            account_guid: Some(Self::GUID.to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@example.org".to_string()),
            fixed_phone_number: Some("0102030405".to_string()),
            mobile_phone: Some("0607080910".to_string()),
        }
    }

    /// A customer not yet created in the identity store
    pub fn unprovisioned() -> Customer {
        Customer {
            id: None,
            ..Self::complete()
        }
    }

    /// A customer with only an account and a first name
    pub fn first_name_only() -> Customer {
        Customer {
            first_name: Some("Ada".to_string()),
            ..Customer::new(Self::GUID)
        }
    }
}

/// Fixture for identity test data
pub struct IdentityFixtures;

impl IdentityFixtures {
    /// The identity matching [`CustomerFixtures::complete`] under `table`
    pub fn complete(table: &AttributeCodeTable) -> IdentityRecord {
        table.to_identity(&CustomerFixtures::complete())
    }

    /// The same identity as JSON, as the identity store would send it
    pub fn complete_json(table: &AttributeCodeTable) -> serde_json::Value {
        serde_json::to_value(Self::complete(table)).expect("identity serializes")
    }
}
