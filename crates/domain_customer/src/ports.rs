//! Customer Domain Ports
//!
//! Two ports meet in this crate:
//!
//! - [`CustomerInfoPort`] is the inbound contract consumed by the
//!   provisioning business services. It speaks in [`Customer`] records.
//! - [`IdentityServicePort`] is the outbound contract of the identity store
//!   client. It speaks in [`IdentityRecord`]s.
//!
//! The identity store adapter implements the former on top of the latter.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_customer::ports::{CustomerInfoPort, IdentityServicePort};
//! use std::sync::Arc;
//!
//! let client: Arc<dyn IdentityServicePort> = Arc::new(IdentityStoreRestClient::new(config)?);
//! let customers: Arc<dyn CustomerInfoPort> =
//!     Arc::new(IdentityStoreCustomerInfoAdapter::new(client, AttributeCodeTable::default()));
//! ```

use async_trait::async_trait;

use core_kernel::{CustomerId, DomainPort, HealthCheckable, PortError};

use crate::customer::Customer;
use crate::error::CustomerError;
use crate::identity::{IdentityChange, IdentityRecord};

/// Inbound contract giving the provisioning services access to customers
#[async_trait]
pub trait CustomerInfoPort: DomainPort + HealthCheckable {
    /// Retrieves a customer by external account identifier
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no customer is correlated to `guid` yet
    async fn get_customer_by_guid(&self, guid: &str) -> Result<Option<Customer>, CustomerError>;

    /// Retrieves a customer by internal identifier given as text
    ///
    /// # Errors
    ///
    /// `CustomerError::InvalidArgument` when `customer_id` is not an integer
    async fn get_customer_by_cid(
        &self,
        customer_id: &str,
    ) -> Result<Option<Customer>, CustomerError>;

    /// Creates a customer and returns it with its assigned identifier
    async fn create_customer(&self, customer: Customer) -> Result<Customer, CustomerError>;
}

/// Outbound contract of the identity store client
///
/// Lookups fail with `PortError::NotFound` when no identity matches.
#[async_trait]
pub trait IdentityServicePort: DomainPort + HealthCheckable {
    /// Retrieves an identity by external connection identifier
    async fn get_identity_by_connection_id(
        &self,
        connection_id: &str,
        application_code: &str,
        hash: &str,
    ) -> Result<IdentityRecord, PortError>;

    /// Retrieves an identity by internal customer identifier
    async fn get_identity_by_customer_id(
        &self,
        customer_id: CustomerId,
        application_code: &str,
        hash: &str,
    ) -> Result<IdentityRecord, PortError>;

    /// Creates an identity and returns it as stored
    async fn create_identity(
        &self,
        change: IdentityChange,
        hash: &str,
    ) -> Result<IdentityRecord, PortError>;
}

/// Mock implementations of the customer ports for testing
///
/// Both keep their records in memory and are useful for unit testing
/// without an identity store.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::{Mutex, RwLock};

    /// Request parameters last seen by [`MockIdentityService`]
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct RecordedCall {
        pub application_code: String,
        pub hash: String,
    }

    /// In-memory mock implementation of IdentityServicePort
    #[derive(Debug)]
    pub struct MockIdentityService {
        identities: Arc<RwLock<HashMap<CustomerId, IdentityRecord>>>,
        changes: Arc<RwLock<Vec<IdentityChange>>>,
        last_call: Arc<RwLock<Option<RecordedCall>>>,
        next_failure: Mutex<Option<PortError>>,
        next_id: Mutex<i64>,
    }

    impl Default for MockIdentityService {
        fn default() -> Self {
            Self {
                identities: Arc::default(),
                changes: Arc::default(),
                last_call: Arc::default(),
                next_failure: Mutex::new(None),
                next_id: Mutex::new(1),
            }
        }
    }

    impl MockIdentityService {
        /// Creates a new mock service
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with identities for testing
        ///
        /// Identities without a customer id are skipped.
        pub async fn with_identities(identities: Vec<IdentityRecord>) -> Self {
            let service = Self::new();
            {
                let mut store = service.identities.write().await;
                let mut next_id = service.next_id.lock().await;
                for identity in identities {
                    if let Some(id) = identity.customer_id {
                        *next_id = (*next_id).max(i64::from(id.value()) + 1);
                        store.insert(id, identity);
                    }
                }
            }
            service
        }

        /// Makes the next call fail with `error`
        pub async fn fail_next(&self, error: PortError) {
            *self.next_failure.lock().await = Some(error);
        }

        /// Every change submitted through `create_identity`, oldest first
        pub async fn received_changes(&self) -> Vec<IdentityChange> {
            self.changes.read().await.clone()
        }

        /// Parameters of the most recent call
        pub async fn last_call(&self) -> Option<RecordedCall> {
            self.last_call.read().await.clone()
        }

        async fn begin(&self, application_code: &str, hash: &str) -> Result<(), PortError> {
            *self.last_call.write().await = Some(RecordedCall {
                application_code: application_code.to_string(),
                hash: hash.to_string(),
            });
            match self.next_failure.lock().await.take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    impl DomainPort for MockIdentityService {}

    #[async_trait]
    impl HealthCheckable for MockIdentityService {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new("mock-identity-service", AdapterHealth::Healthy, 0)
                .with_message("Mock adapter always healthy")
        }
    }

    #[async_trait]
    impl IdentityServicePort for MockIdentityService {
        async fn get_identity_by_connection_id(
            &self,
            connection_id: &str,
            application_code: &str,
            hash: &str,
        ) -> Result<IdentityRecord, PortError> {
            self.begin(application_code, hash).await?;
            self.identities
                .read()
                .await
                .values()
                .find(|identity| identity.connection_id.as_deref() == Some(connection_id))
                .cloned()
                .ok_or_else(|| PortError::not_found("Identity", connection_id))
        }

        async fn get_identity_by_customer_id(
            &self,
            customer_id: CustomerId,
            application_code: &str,
            hash: &str,
        ) -> Result<IdentityRecord, PortError> {
            self.begin(application_code, hash).await?;
            self.identities
                .read()
                .await
                .get(&customer_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Identity", customer_id))
        }

        async fn create_identity(
            &self,
            change: IdentityChange,
            hash: &str,
        ) -> Result<IdentityRecord, PortError> {
            self.begin(&change.author.application_code, hash).await?;

            let mut next_id = self.next_id.lock().await;
            let id = i32::try_from(*next_id)
                .map(CustomerId::new)
                .map_err(|_| PortError::internal("mock identity ids exhausted"))?;
            *next_id += 1;
            self.changes.write().await.push(change.clone());

            let mut identity = change.identity;
            identity.customer_id = Some(id);
            self.identities.write().await.insert(id, identity.clone());
            Ok(identity)
        }
    }

    /// In-memory mock implementation of CustomerInfoPort
    #[derive(Debug, Default)]
    pub struct MockCustomerInfoPort {
        customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
    }

    impl MockCustomerInfoPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with customers for testing
        ///
        /// Customers without an id are skipped.
        pub async fn with_customers(customers: Vec<Customer>) -> Self {
            let port = Self::new();
            {
                let mut store = port.customers.write().await;
                for customer in customers {
                    if let Some(id) = customer.id {
                        store.insert(id, customer);
                    }
                }
            }
            port
        }
    }

    impl DomainPort for MockCustomerInfoPort {}

    #[async_trait]
    impl HealthCheckable for MockCustomerInfoPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new("mock-customer-info-port", AdapterHealth::Healthy, 0)
                .with_message("Mock adapter always healthy")
        }
    }

    #[async_trait]
    impl CustomerInfoPort for MockCustomerInfoPort {
        async fn get_customer_by_guid(
            &self,
            guid: &str,
        ) -> Result<Option<Customer>, CustomerError> {
            Ok(self
                .customers
                .read()
                .await
                .values()
                .find(|c| c.account_guid.as_deref() == Some(guid))
                .cloned())
        }

        async fn get_customer_by_cid(
            &self,
            customer_id: &str,
        ) -> Result<Option<Customer>, CustomerError> {
            let id: CustomerId = customer_id
                .parse()
                .map_err(|e| CustomerError::invalid_argument(customer_id, e))?;
            Ok(self.customers.read().await.get(&id).cloned())
        }

        async fn create_customer(&self, mut customer: Customer) -> Result<Customer, CustomerError> {
            let mut customers = self.customers.write().await;
            let next = customers
                .keys()
                .map(|id| id.value())
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| PortError::internal("mock customer ids exhausted"))?;
            let id = CustomerId::new(next);
            customer.id = Some(id);
            customers.insert(id, customer.clone());
            Ok(customer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::{MockCustomerInfoPort, MockIdentityService};

    #[tokio::test]
    async fn test_mock_identity_create_assigns_sequential_ids() {
        let service = MockIdentityService::new();

        let first = service
            .create_identity(IdentityChange::new(IdentityRecord::default(), "App"), "")
            .await
            .unwrap();
        let second = service
            .create_identity(IdentityChange::new(IdentityRecord::default(), "App"), "")
            .await
            .unwrap();

        assert_eq!(first.customer_id, Some(CustomerId::new(1)));
        assert_eq!(second.customer_id, Some(CustomerId::new(2)));
        assert_eq!(service.received_changes().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_identity_not_found() {
        let service = MockIdentityService::new();
        let result = service.get_identity_by_connection_id("nobody", "App", "").await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_identity_fail_next_is_consumed() {
        let service = MockIdentityService::new();
        service
            .fail_next(PortError::ServiceUnavailable { service: "identitystore".to_string() })
            .await;

        let first = service.get_identity_by_customer_id(CustomerId::new(1), "App", "").await;
        assert!(first.unwrap_err().is_transient());

        let second = service.get_identity_by_customer_id(CustomerId::new(1), "App", "").await;
        assert!(second.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_identity_seeded_ids_are_not_reused() {
        let seeded = IdentityRecord {
            customer_id: Some(CustomerId::new(10)),
            ..Default::default()
        };
        let service = MockIdentityService::with_identities(vec![seeded]).await;

        let created = service
            .create_identity(IdentityChange::new(IdentityRecord::default(), "App"), "")
            .await
            .unwrap();
        assert_eq!(created.customer_id, Some(CustomerId::new(11)));
    }

    #[tokio::test]
    async fn test_mock_identity_reports_exhausted_ids() {
        let seeded = IdentityRecord {
            customer_id: Some(CustomerId::new(i32::MAX - 1)),
            ..Default::default()
        };
        let service = MockIdentityService::with_identities(vec![seeded]).await;

        let last = service
            .create_identity(IdentityChange::new(IdentityRecord::default(), "App"), "")
            .await
            .unwrap();
        assert_eq!(last.customer_id, Some(CustomerId::new(i32::MAX)));

        let error = service
            .create_identity(IdentityChange::new(IdentityRecord::default(), "App"), "")
            .await
            .unwrap_err();
        assert!(matches!(error, PortError::Internal { .. }));
        assert_eq!(service.received_changes().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_customer_port_reports_exhausted_ids() {
        let mut seeded = Customer::new("G1");
        seeded.id = Some(CustomerId::new(i32::MAX));
        let port = MockCustomerInfoPort::with_customers(vec![seeded]).await;

        let error = port.create_customer(Customer::new("G2")).await.unwrap_err();
        assert!(matches!(error.as_port_error(), Some(PortError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_mock_customer_port_create_and_get() {
        let port = MockCustomerInfoPort::new();

        let created = port.create_customer(Customer::new("G1")).await.unwrap();
        let id = created.id.unwrap();

        let by_cid = port.get_customer_by_cid(&id.to_string()).await.unwrap();
        assert_eq!(by_cid, Some(created.clone()));

        let by_guid = port.get_customer_by_guid("G1").await.unwrap();
        assert_eq!(by_guid, Some(created));
    }

    #[tokio::test]
    async fn test_mock_customer_port_rejects_bad_cid() {
        let port = MockCustomerInfoPort::new();
        let error = port.get_customer_by_cid("abc").await.unwrap_err();
        assert!(error.is_invalid_argument());
    }
}
