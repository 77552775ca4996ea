//! Tests for the identity store customer info adapter

use std::sync::Arc;

use proptest::prelude::*;

use core_kernel::{CustomerId, PortError};
use domain_customer::adapters::{IdentityStoreCustomerInfoAdapter, MockIdentityService};
use domain_customer::{AttributeCodeTable, CustomerInfoPort, IdentityStoreSettings};
use test_utils::{
    assert_has_exactly_mapped_codes, attribute_table_strategy, customer_strategy,
    init_test_tracing, AttributeFixtures, CustomerBuilder, CustomerFixtures, IdentityFixtures,
    IdentityRecordBuilder,
};

async fn adapter_over(
    service: MockIdentityService,
    table: AttributeCodeTable,
) -> (IdentityStoreCustomerInfoAdapter, Arc<MockIdentityService>) {
    init_test_tracing();
    let service = Arc::new(service);
    let adapter = IdentityStoreCustomerInfoAdapter::new(service.clone(), table);
    (adapter, service)
}

// ============================================================================
// Lookups
// ============================================================================

mod lookup_tests {
    use super::*;

    #[tokio::test]
    async fn test_guid_not_found_returns_none() {
        let (adapter, _) = adapter_over(MockIdentityService::new(), AttributeFixtures::default_table()).await;

        let result = adapter.get_customer_by_guid("unknown").await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_cid_42_returns_customer_42() {
        let table = AttributeFixtures::default_table();
        let service = MockIdentityService::with_identities(vec![IdentityFixtures::complete(&table)]).await;
        let (adapter, _) = adapter_over(service, table).await;

        let customer = adapter.get_customer_by_cid("42").await.unwrap().unwrap();
        assert_eq!(customer.id, Some(CustomerId::new(42)));
        assert_eq!(customer, CustomerFixtures::complete());
    }

    #[tokio::test]
    async fn test_cid_not_found_returns_none() {
        let (adapter, _) = adapter_over(MockIdentityService::new(), AttributeFixtures::default_table()).await;
        assert!(adapter.get_customer_by_cid("7").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cid_abc_is_invalid_argument() {
        let (adapter, _) = adapter_over(MockIdentityService::new(), AttributeFixtures::default_table()).await;

        let error = adapter.get_customer_by_cid("abc").await.unwrap_err();
        assert!(error.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_cid_out_of_range_is_invalid_argument() {
        let (adapter, _) = adapter_over(MockIdentityService::new(), AttributeFixtures::default_table()).await;

        let error = adapter.get_customer_by_cid("99999999999").await.unwrap_err();
        assert!(error.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_sparse_identity_yields_absent_fields() {
        let table = AttributeFixtures::default_table();
        let sparse = IdentityRecordBuilder::new()
            .with_customer_id(5)
            .with_connection_id("G5")
            .with_attribute(table.family_name.clone(), "Hopper")
            .with_null_attribute(table.email.clone())
            .with_attribute("unmapped", "ignored")
            .build();
        let service = MockIdentityService::with_identities(vec![sparse]).await;
        let (adapter, _) = adapter_over(service, table).await;

        let customer = adapter.get_customer_by_guid("G5").await.unwrap().unwrap();
        assert_eq!(customer.id, Some(CustomerId::new(5)));
        assert_eq!(customer.last_name.as_deref(), Some("Hopper"));
        assert!(customer.email.is_none());
        assert!(customer.first_name.is_none());
        assert!(customer.fixed_phone_number.is_none());
        assert!(customer.mobile_phone.is_none());
    }

    #[tokio::test]
    async fn test_transient_failure_propagates_unchanged() {
        let (adapter, service) = adapter_over(MockIdentityService::new(), AttributeFixtures::default_table()).await;
        service
            .fail_next(PortError::Timeout { operation: "get_identity".to_string(), duration_ms: 30000 })
            .await;

        let error = adapter.get_customer_by_cid("1").await.unwrap_err();
        match error.as_port_error() {
            Some(PortError::Timeout { duration_ms, .. }) => assert_eq!(*duration_ms, 30000),
            other => panic!("Expected Timeout error, got {:?}", other),
        }
    }
}

// ============================================================================
// Creation
// ============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_writes_all_five_codes() {
        let table = AttributeFixtures::default_table();
        let (adapter, service) = adapter_over(MockIdentityService::new(), table.clone()).await;

        adapter.create_customer(CustomerFixtures::first_name_only()).await.unwrap();

        let changes = service.received_changes().await;
        let identity = &changes[0].identity;
        assert_has_exactly_mapped_codes(identity, &table);
        assert_eq!(identity.connection_id.as_deref(), Some("G1"));
        assert_eq!(identity.attribute_value(&table.given_name), Some("Ada"));
        for code in [&table.family_name, &table.email, &table.fixed_phone, &table.mobile_phone] {
            let attribute = identity.attribute(code).expect("code present");
            assert!(attribute.value.is_none(), "{} should be null", code);
        }
    }

    #[tokio::test]
    async fn test_create_returns_assigned_id() {
        let (adapter, _) = adapter_over(MockIdentityService::new(), AttributeFixtures::default_table()).await;

        let created = adapter
            .create_customer(CustomerBuilder::new().with_email("ada@example.org").build())
            .await
            .unwrap();

        assert_eq!(created.id, Some(CustomerId::new(1)));
        assert_eq!(created.email.as_deref(), Some("ada@example.org"));
    }

    #[tokio::test]
    async fn test_created_customer_can_be_read_back() {
        let table = AttributeFixtures::dotted_table();
        let (adapter, _) = adapter_over(MockIdentityService::new(), table).await;

        let created = adapter.create_customer(CustomerFixtures::unprovisioned()).await.unwrap();
        let id = created.id.unwrap().to_string();

        let by_cid = adapter.get_customer_by_cid(&id).await.unwrap();
        let by_guid = adapter.get_customer_by_guid(CustomerFixtures::GUID).await.unwrap();
        assert_eq!(by_cid, Some(created.clone()));
        assert_eq!(by_guid, Some(created));
    }

    #[tokio::test]
    async fn test_create_uses_configured_application_code_and_hash() {
        let settings = IdentityStoreSettings {
            application_code: "Billing".to_string(),
            hash: "h4sh".to_string(),
            ..Default::default()
        };
        let service = Arc::new(MockIdentityService::new());
        let adapter = IdentityStoreCustomerInfoAdapter::from_settings(service.clone(), &settings);

        adapter.create_customer(CustomerFixtures::first_name_only()).await.unwrap();

        let changes = service.received_changes().await;
        assert_eq!(changes[0].author.application_code, "Billing");
        assert_eq!(service.last_call().await.unwrap().hash, "h4sh");
    }

    #[tokio::test]
    async fn test_create_twice_submits_twice() {
        let (adapter, service) = adapter_over(MockIdentityService::new(), AttributeFixtures::default_table()).await;

        let first = adapter.create_customer(CustomerFixtures::first_name_only()).await.unwrap();
        let second = adapter.create_customer(CustomerFixtures::first_name_only()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.received_changes().await.len(), 2);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_customer_identity_round_trip(
        customer in customer_strategy(),
        table in attribute_table_strategy(),
    ) {
        let identity = table.to_identity(&customer);
        prop_assert_eq!(identity.attributes.len(), 5);
        prop_assert_eq!(table.to_customer(&identity), customer);
    }
}
