//! Ports and Adapters Infrastructure
//!
//! Foundational types for the hexagonal layout shared by the domain crates.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │        Provisioning business services        │
//! └──────────────────────────────────────────────┘
//!                      │ CustomerInfoPort
//!                      ▼
//! ┌──────────────────────────────────────────────┐
//! │       IdentityStoreCustomerInfoAdapter       │
//! └──────────────────────────────────────────────┘
//!                      │ IdentityServicePort
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//! ┌──────────────────┐   ┌──────────────────────┐
//! │ REST identity    │   │ In-memory mock       │
//! │ store client     │   │ (tests)              │
//! └──────────────────┘   └──────────────────────┘
//! ```
//!
//! Each domain defines its own port traits extending [`DomainPort`]. Every
//! port operation reports failures as [`PortError`], so an adapter can hand
//! a client failure to its caller without translating it.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error type for port operations
///
/// Shared by all port implementations, so errors raised by an outbound
/// client flow through inbound adapters unchanged.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The remote system rejected the request content
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// Authentication or authorization failed
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// Rate limit exceeded for external API
    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        retry_after_secs: u64,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// A payload could not be encoded or decoded
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Connection error carrying its cause
    pub fn connection(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::RateLimited { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across tasks.
pub trait DomainPort: Send + Sync + 'static {}

/// Authentication configuration for external systems
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExternalAuthConfig {
    /// No authentication required
    #[default]
    None,
    /// API key sent in a custom header
    ApiKey {
        header_name: String,
        #[serde(skip_serializing)]
        key: String,
    },
    /// Bearer token authentication
    BearerToken {
        #[serde(skip_serializing)]
        token: String,
    },
}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is degraded but operational
    Degraded,
    /// Adapter is unhealthy and not operational
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Creates a result stamped with the current time
    pub fn new(adapter_id: impl Into<String>, status: AdapterHealth, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            latency_ms,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Attaches a message to the result
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}
