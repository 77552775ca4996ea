//! Customer record used by the provisioning services

use core_kernel::CustomerId;
use serde::{Deserialize, Serialize};

/// A customer as seen by the provisioning business services
///
/// Every field is optional: a customer that has not been created in the
/// identity store yet carries no `id`, and the store may return identities
/// with any attribute missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Internal identifier assigned by the identity store on creation
    pub id: Option<CustomerId>,
    /// External account identifier, the stable correlation key
    pub account_guid: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub fixed_phone_number: Option<String>,
    pub mobile_phone: Option<String>,
}

impl Customer {
    /// Creates an empty customer correlated to an external account
    pub fn new(account_guid: impl Into<String>) -> Self {
        Self {
            account_guid: Some(account_guid.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_has_only_account_guid() {
        let customer = Customer::new("G1");
        assert_eq!(customer.account_guid.as_deref(), Some("G1"));
        assert!(customer.id.is_none());
        assert!(customer.first_name.is_none());
        assert!(customer.mobile_phone.is_none());
    }
}
