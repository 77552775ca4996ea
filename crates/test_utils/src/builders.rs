//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults, so
//! tests only spell out the fields they care about.

use core_kernel::CustomerId;
use domain_customer::{Customer, IdentityRecord};

use crate::fixtures::CustomerFixtures;

/// Builder for constructing test customers
#[derive(Debug, Clone)]
pub struct CustomerBuilder {
    customer: Customer,
}

impl Default for CustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerBuilder {
    /// Creates a builder for an unprovisioned customer on the fixture account
    pub fn new() -> Self {
        Self {
            customer: Customer::new(CustomerFixtures::GUID),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.customer.id = Some(CustomerId::new(id));
        self
    }

    pub fn with_account_guid(mut self, guid: impl Into<String>) -> Self {
        self.customer.account_guid = Some(guid.into());
        self
    }

    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.customer.first_name = Some(name.into());
        self
    }

    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.customer.last_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.customer.email = Some(email.into());
        self
    }

    pub fn with_fixed_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer.fixed_phone_number = Some(phone.into());
        self
    }

    pub fn with_mobile_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer.mobile_phone = Some(phone.into());
        self
    }

    /// Builds the customer
    pub fn build(self) -> Customer {
        self.customer
    }
}

/// Builder for constructing identity store records
///
/// Unlike converting a customer, this builder writes only the attributes it
/// is given, which makes it suitable for simulating sparse store answers.
#[derive(Debug, Clone, Default)]
pub struct IdentityRecordBuilder {
    record: IdentityRecord,
}

impl IdentityRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer_id(mut self, id: i32) -> Self {
        self.record.customer_id = Some(CustomerId::new(id));
        self
    }

    pub fn with_connection_id(mut self, connection_id: impl Into<String>) -> Self {
        self.record.connection_id = Some(connection_id.into());
        self
    }

    /// Adds an attribute with a value
    pub fn with_attribute(mut self, code: impl Into<String>, value: impl Into<String>) -> Self {
        self.record.set_attribute(code, Some(value.into()));
        self
    }

    /// Adds an attribute whose value is null
    pub fn with_null_attribute(mut self, code: impl Into<String>) -> Self {
        self.record.set_attribute(code, None);
        self
    }

    pub fn build(self) -> IdentityRecord {
        self.record
    }
}
