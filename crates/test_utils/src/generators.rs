//! Property-Based Test Generators
//!
//! Proptest strategies producing customers and attribute tables.

use core_kernel::CustomerId;
use domain_customer::{AttributeCodeTable, Customer};
use proptest::prelude::*;

/// Strategy for customer identifiers
pub fn customer_id_strategy() -> impl Strategy<Value = CustomerId> {
    any::<i32>().prop_map(CustomerId::new)
}

/// Strategy for an optional free-text field, including empty strings
pub fn optional_text_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[\\PC]{0,24}")
}

/// Strategy for customers with any combination of absent fields
pub fn customer_strategy() -> impl Strategy<Value = Customer> {
    (
        proptest::option::of(customer_id_strategy()),
        proptest::option::of("[a-f0-9]{8}-[a-f0-9]{4}"),
        optional_text_strategy(),
        optional_text_strategy(),
        optional_text_strategy(),
        optional_text_strategy(),
        optional_text_strategy(),
    )
        .prop_map(
            |(id, account_guid, first_name, last_name, email, fixed_phone_number, mobile_phone)| {
                Customer {
                    id,
                    account_guid,
                    first_name,
                    last_name,
                    email,
                    fixed_phone_number,
                    mobile_phone,
                }
            },
        )
}

/// Strategy for valid attribute code tables with five distinct codes
pub fn attribute_table_strategy() -> impl Strategy<Value = AttributeCodeTable> {
    proptest::collection::hash_set("[a-z][a-z._-]{0,15}", 5).prop_map(|codes| {
        let mut codes = codes.into_iter();
        let mut next = || codes.next().unwrap_or_default();
        AttributeCodeTable {
            given_name: next(),
            family_name: next(),
            email: next(),
            fixed_phone: next(),
            mobile_phone: next(),
        }
    })
}
