//! Core Kernel - Foundational types shared by the customer provisioning modules
//!
//! This crate provides the building blocks used by every domain crate:
//! - Strongly-typed identifiers issued by the identity store
//! - The port error type and marker traits for ports and adapters
//! - Tracing subscriber initialisation

pub mod identifiers;
pub mod ports;
pub mod error;
pub mod telemetry;

pub use identifiers::CustomerId;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
    ExternalAuthConfig,
};
pub use error::CoreError;
