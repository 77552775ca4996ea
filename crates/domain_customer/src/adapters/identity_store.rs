//! Identity Store Customer Info Adapter
//!
//! Implements [`CustomerInfoPort`] on top of an [`IdentityServicePort`]
//! client. Every operation is a single call to the client:
//!
//! - lookups turn `PortError::NotFound` into `Ok(None)`, since a customer
//!   missing from the identity store simply has not been provisioned yet
//! - creation submits the customer as an identity change authored by the
//!   configured application code and copies the assigned id back
//! - every other client error reaches the caller unchanged
//!
//! The application code and hash are process-wide settings rather than
//! values supplied per caller.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use core_kernel::{
    CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::adapters::rest_client::IdentityStoreRestClient;
use crate::customer::Customer;
use crate::error::CustomerError;
use crate::identity::{IdentityChange, IdentityRecord};
use crate::mapping::AttributeCodeTable;
use crate::ports::{CustomerInfoPort, IdentityServicePort};
use crate::settings::{IdentityStoreSettings, DEFAULT_APPLICATION_CODE};

const ADAPTER_ID: &str = "identity-store-customer-info";

/// Customer info backed by the identity store
///
/// # Example
///
/// ```rust,ignore
/// use domain_customer::adapters::IdentityStoreCustomerInfoAdapter;
///
/// let adapter = IdentityStoreCustomerInfoAdapter::new(client, AttributeCodeTable::default())
///     .with_application_code("CustomerProvisioning");
///
/// let customer = adapter.get_customer_by_cid("42").await?;
/// ```
#[derive(Clone)]
pub struct IdentityStoreCustomerInfoAdapter {
    client: Arc<dyn IdentityServicePort>,
    attribute_codes: AttributeCodeTable,
    application_code: String,
    hash: String,
}

impl std::fmt::Debug for IdentityStoreCustomerInfoAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityStoreCustomerInfoAdapter")
            .field("attribute_codes", &self.attribute_codes)
            .field("application_code", &self.application_code)
            .finish_non_exhaustive()
    }
}

impl IdentityStoreCustomerInfoAdapter {
    /// Creates an adapter with the default application code and an empty hash
    pub fn new(client: Arc<dyn IdentityServicePort>, attribute_codes: AttributeCodeTable) -> Self {
        Self {
            client,
            attribute_codes,
            application_code: DEFAULT_APPLICATION_CODE.to_string(),
            hash: String::new(),
        }
    }

    /// Creates an adapter configured from `settings`
    pub fn from_settings(client: Arc<dyn IdentityServicePort>, settings: &IdentityStoreSettings) -> Self {
        Self::new(client, settings.attributes.clone())
            .with_application_code(settings.application_code.clone())
            .with_hash(settings.hash.clone())
    }

    /// Creates an adapter talking to the REST identity store described by `settings`
    pub fn with_rest_client(settings: &IdentityStoreSettings) -> Result<Self, PortError> {
        let client = IdentityStoreRestClient::new(settings.client_config())?;
        Ok(Self::from_settings(Arc::new(client), settings))
    }

    /// Sets the application code sent to the identity store
    pub fn with_application_code(mut self, application_code: impl Into<String>) -> Self {
        self.application_code = application_code.into();
        self
    }

    /// Sets the request hash sent to the identity store
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    fn found(&self, lookup: Result<IdentityRecord, PortError>) -> Result<Option<Customer>, CustomerError> {
        match lookup {
            Ok(identity) => Ok(Some(self.attribute_codes.to_customer(&identity))),
            Err(PortError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl DomainPort for IdentityStoreCustomerInfoAdapter {}

#[async_trait]
impl HealthCheckable for IdentityStoreCustomerInfoAdapter {
    /// Reports the health of the underlying identity store client
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let client = self.client.health_check().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let mut result = HealthCheckResult::new(ADAPTER_ID, client.status, latency_ms);
        result.message = Some(match client.message {
            Some(message) => format!("{}: {}", client.adapter_id, message),
            None => client.adapter_id,
        });
        result
    }
}

#[async_trait]
impl CustomerInfoPort for IdentityStoreCustomerInfoAdapter {
    async fn get_customer_by_guid(&self, guid: &str) -> Result<Option<Customer>, CustomerError> {
        tracing::debug!(guid, "Looking up customer by guid");

        let lookup = self
            .client
            .get_identity_by_connection_id(guid, &self.application_code, &self.hash)
            .await;

        let customer = self.found(lookup)?;
        if customer.is_none() {
            tracing::debug!(guid, "Customer not in identity store yet");
        }
        Ok(customer)
    }

    async fn get_customer_by_cid(
        &self,
        customer_id: &str,
    ) -> Result<Option<Customer>, CustomerError> {
        let id: CustomerId = customer_id
            .parse()
            .map_err(|e| CustomerError::invalid_argument(customer_id, e))?;

        tracing::debug!(customer_id = %id, "Looking up customer by id");

        let lookup = self
            .client
            .get_identity_by_customer_id(id, &self.application_code, &self.hash)
            .await;

        let customer = self.found(lookup)?;
        if customer.is_none() {
            tracing::debug!(customer_id = %id, "Customer not in identity store yet");
        }
        Ok(customer)
    }

    async fn create_customer(&self, mut customer: Customer) -> Result<Customer, CustomerError> {
        let identity = self.attribute_codes.to_identity(&customer);
        let change = IdentityChange::new(identity, self.application_code.clone());

        let created = self.client.create_identity(change, &self.hash).await?;
        customer.id = created.customer_id;

        tracing::info!(
            guid = customer.account_guid.as_deref().unwrap_or_default(),
            customer_id = ?customer.id,
            "Customer created in identity store"
        );

        Ok(customer)
    }
}
