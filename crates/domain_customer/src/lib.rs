//! Customer Provisioning Domain
//!
//! This crate exposes customer records to the provisioning business services
//! while keeping the identity store as their system of record.
//!
//! # Customer / Identity Model
//!
//! The provisioning services work with a flat [`Customer`] record. The
//! identity store exposes the same person as an [`IdentityRecord`]: a
//! connection id, a numeric customer id, and a map of attribute codes to
//! values. Five attributes are mapped through a configurable
//! [`AttributeCodeTable`]:
//!
//! | Customer field       | Attribute code setting     |
//! |----------------------|----------------------------|
//! | `first_name`         | `attributes.given_name`    |
//! | `last_name`          | `attributes.family_name`   |
//! | `email`              | `attributes.email`         |
//! | `fixed_phone_number` | `attributes.fixed_phone`   |
//! | `mobile_phone`       | `attributes.mobile_phone`  |
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_customer::{CustomerInfoPort, IdentityStoreCustomerInfoAdapter, IdentityStoreSettings};
//!
//! let settings = IdentityStoreSettings::load()?;
//! let adapter = IdentityStoreCustomerInfoAdapter::with_rest_client(&settings)?;
//!
//! match adapter.get_customer_by_guid("0c2a...").await? {
//!     Some(customer) => println!("known customer {:?}", customer.id),
//!     None => println!("not provisioned yet"),
//! }
//! ```

pub mod customer;
pub mod identity;
pub mod mapping;
pub mod ports;
pub mod settings;
pub mod adapters;
pub mod error;

pub use customer::Customer;
pub use identity::{IdentityRecord, IdentityAttribute, IdentityChange, Author};
pub use mapping::{AttributeCodeTable, MappedField};
pub use ports::{CustomerInfoPort, IdentityServicePort};
pub use settings::{IdentityStoreSettings, SettingsError};
pub use adapters::{IdentityStoreCustomerInfoAdapter, IdentityStoreRestClient, IdentityStoreClientConfig};
pub use error::CustomerError;
