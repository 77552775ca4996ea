//! Custom Test Assertions
//!
//! Assertion helpers for customer and identity types that give more
//! meaningful failure messages than a plain `assert_eq!` on whole records.

use domain_customer::{AttributeCodeTable, Customer, IdentityRecord, MappedField};

/// Asserts that `identity` carries exactly the five mapped codes of `table`
pub fn assert_has_exactly_mapped_codes(identity: &IdentityRecord, table: &AttributeCodeTable) {
    let mut actual: Vec<&str> = identity.attributes.keys().map(String::as_str).collect();
    let mut expected: Vec<&str> = table.codes().to_vec();
    actual.sort_unstable();
    expected.sort_unstable();

    assert_eq!(
        actual, expected,
        "Identity attribute codes differ from the mapped codes"
    );
}

/// Asserts that `customer` and `identity` describe the same person under `table`
pub fn assert_same_person(customer: &Customer, identity: &IdentityRecord, table: &AttributeCodeTable) {
    assert_eq!(customer.id, identity.customer_id, "Customer id mismatch");
    assert_eq!(
        customer.account_guid, identity.connection_id,
        "Account guid / connection id mismatch"
    );

    let mapped = table.to_identity(customer);
    for field in MappedField::ALL {
        let code = table.code(field);
        assert_eq!(
            mapped.attribute_value(code),
            identity.attribute_value(code),
            "Attribute '{}' ({}) mismatch",
            code,
            field.setting_name()
        );
    }
}
