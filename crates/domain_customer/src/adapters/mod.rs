//! Adapters for the Customer Domain
//!
//! - **IdentityStoreCustomerInfoAdapter**: serves `CustomerInfoPort` from the
//!   identity store through any `IdentityServicePort` client
//! - **IdentityStoreRestClient**: `IdentityServicePort` over the identity
//!   store's REST API
//! - **MockIdentityService** / **MockCustomerInfoPort**: in-memory ports for
//!   testing (re-exported from the ports module)
//!
//! # Usage
//!
//! Wire the adapter at application startup:
//!
//! ```rust,ignore
//! use domain_customer::adapters::IdentityStoreCustomerInfoAdapter;
//! use domain_customer::{CustomerInfoPort, IdentityStoreSettings};
//! use std::sync::Arc;
//!
//! let settings = IdentityStoreSettings::load()?;
//! core_kernel::telemetry::init_tracing(&settings.log_level);
//!
//! let adapter = IdentityStoreCustomerInfoAdapter::with_rest_client(&settings)?;
//! let port: Arc<dyn CustomerInfoPort> = Arc::new(adapter);
//! ```

pub mod identity_store;
pub mod rest_client;

pub use identity_store::IdentityStoreCustomerInfoAdapter;
pub use rest_client::{IdentityStoreClientConfig, IdentityStoreRestClient};

#[cfg(any(test, feature = "mock"))]
pub use crate::ports::mock::{MockCustomerInfoPort, MockIdentityService};
