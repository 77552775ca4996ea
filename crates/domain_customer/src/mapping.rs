//! Customer / identity attribute mapping
//!
//! Five customer fields are carried in the identity store under attribute
//! codes that vary between deployments. The codes are resolved once at
//! startup into an [`AttributeCodeTable`], which then drives both directions
//! of the conversion.
//!
//! Conversion rules:
//!
//! - Customer to identity writes all five codes, with a null value for every
//!   absent field. Nothing is omitted.
//! - Identity to customer reads the five codes only. A missing attribute
//!   and a null value both yield an absent field; other codes are ignored.

use std::collections::HashSet;

use core_kernel::CoreError;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::identity::IdentityRecord;

/// Attribute codes under which the identity store keeps customer fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeCodeTable {
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub fixed_phone: String,
    pub mobile_phone: String,
}

impl Default for AttributeCodeTable {
    fn default() -> Self {
        Self {
            given_name: "first_name".to_string(),
            family_name: "family_name".to_string(),
            email: "email".to_string(),
            fixed_phone: "phone".to_string(),
            mobile_phone: "mobile_phone".to_string(),
        }
    }
}

/// A customer field carried as an identity attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappedField {
    GivenName,
    FamilyName,
    Email,
    FixedPhone,
    MobilePhone,
}

impl MappedField {
    pub const ALL: [MappedField; 5] = [
        MappedField::GivenName,
        MappedField::FamilyName,
        MappedField::Email,
        MappedField::FixedPhone,
        MappedField::MobilePhone,
    ];

    /// Name of the setting holding this field's code
    pub fn setting_name(self) -> &'static str {
        match self {
            MappedField::GivenName => "given_name",
            MappedField::FamilyName => "family_name",
            MappedField::Email => "email",
            MappedField::FixedPhone => "fixed_phone",
            MappedField::MobilePhone => "mobile_phone",
        }
    }

    fn read(self, customer: &Customer) -> &Option<String> {
        match self {
            MappedField::GivenName => &customer.first_name,
            MappedField::FamilyName => &customer.last_name,
            MappedField::Email => &customer.email,
            MappedField::FixedPhone => &customer.fixed_phone_number,
            MappedField::MobilePhone => &customer.mobile_phone,
        }
    }

    fn slot(self, customer: &mut Customer) -> &mut Option<String> {
        match self {
            MappedField::GivenName => &mut customer.first_name,
            MappedField::FamilyName => &mut customer.last_name,
            MappedField::Email => &mut customer.email,
            MappedField::FixedPhone => &mut customer.fixed_phone_number,
            MappedField::MobilePhone => &mut customer.mobile_phone,
        }
    }
}

impl AttributeCodeTable {
    /// Returns the attribute code configured for `field`
    pub fn code(&self, field: MappedField) -> &str {
        match field {
            MappedField::GivenName => &self.given_name,
            MappedField::FamilyName => &self.family_name,
            MappedField::Email => &self.email,
            MappedField::FixedPhone => &self.fixed_phone,
            MappedField::MobilePhone => &self.mobile_phone,
        }
    }

    /// Returns the five codes in field order
    pub fn codes(&self) -> [&str; 5] {
        MappedField::ALL.map(|field| self.code(field))
    }

    /// Rejects blank codes and codes shared by two fields
    ///
    /// A shared code would make one field silently overwrite the other when
    /// an identity is built.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for field in MappedField::ALL {
            let code = self.code(field);
            if code.trim().is_empty() {
                return Err(CoreError::validation(format!(
                    "attribute code for '{}' is blank",
                    field.setting_name()
                )));
            }
            if !seen.insert(code) {
                return Err(CoreError::validation(format!(
                    "attribute code '{}' is mapped more than once",
                    code
                )));
            }
        }
        Ok(())
    }

    /// Builds the identity record that represents `customer`
    pub fn to_identity(&self, customer: &Customer) -> IdentityRecord {
        let mut identity = IdentityRecord {
            connection_id: customer.account_guid.clone(),
            customer_id: customer.id,
            ..Default::default()
        };

        for field in MappedField::ALL {
            identity.set_attribute(self.code(field), field.read(customer).clone());
        }

        identity
    }

    /// Builds the customer described by `identity`
    pub fn to_customer(&self, identity: &IdentityRecord) -> Customer {
        let mut customer = Customer {
            id: identity.customer_id,
            account_guid: identity.connection_id.clone(),
            ..Default::default()
        };

        for field in MappedField::ALL {
            *field.slot(&mut customer) = identity
                .attribute_value(self.code(field))
                .map(str::to_string);
        }

        customer
    }
}
