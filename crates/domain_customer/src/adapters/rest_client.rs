//! Identity Store REST Client
//!
//! Implements [`IdentityServicePort`] against the identity store's REST API:
//!
//! - `GET  {base_url}/identities?connection_id=..&application_code=..`
//! - `GET  {base_url}/identities?customer_id=..&application_code=..`
//! - `POST {base_url}/identities` with an [`IdentityChange`] JSON body
//!
//! A non-empty hash is sent as the `hash` query parameter. Every request
//! carries a fresh `X-Correlation-Id` header.
//!
//! # Error Handling
//!
//! HTTP statuses are mapped to `PortError` variants:
//! - 404 -> `PortError::NotFound`
//! - 400/422 -> `PortError::Validation`
//! - 401/403 -> `PortError::Unauthorized`
//! - 409 -> `PortError::Conflict`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Unreachable host -> `PortError::Connection`
//! - Undecodable body -> `PortError::Transformation`
//! - Other -> `PortError::Internal`

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::Instrument;
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, CustomerId, DomainPort, ExternalAuthConfig, HealthCheckResult,
    HealthCheckable, PortError,
};

use crate::identity::{IdentityChange, IdentityRecord};
use crate::ports::IdentityServicePort;

const ADAPTER_ID: &str = "identity-store-rest-client";
const CORRELATION_HEADER: &str = "X-Correlation-Id";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Configuration for the REST identity store client
#[derive(Debug, Clone)]
pub struct IdentityStoreClientConfig {
    /// Base URL of the identity store API (e.g., "https://identity.example.org/rest/identitystore/v1")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub auth: ExternalAuthConfig,
}

impl Default for IdentityStoreClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 30,
            auth: ExternalAuthConfig::None,
        }
    }
}

/// HTTP client for the identity store
#[derive(Debug, Clone)]
pub struct IdentityStoreRestClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    auth: ExternalAuthConfig,
}

impl IdentityStoreRestClient {
    /// Creates a client for the identity store described by `config`
    pub fn new(config: IdentityStoreClientConfig) -> Result<Self, PortError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortError::Internal {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            auth: config.auth,
        })
    }

    /// Returns the base URL of the identity store
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn identities_url(&self) -> String {
        format!("{}/identities", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            ExternalAuthConfig::None => request,
            ExternalAuthConfig::ApiKey { header_name, key } => request.header(header_name.as_str(), key),
            ExternalAuthConfig::BearerToken { token } => request.bearer_auth(token),
        }
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response, PortError> {
        let correlation_id = Uuid::new_v4();
        let request = self
            .authorize(request)
            .header(CORRELATION_HEADER, correlation_id.to_string());

        let span = tracing::debug_span!("identity_store_request", operation, %correlation_id);
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| self.transport_error(operation, e))?;
            tracing::debug!(status = response.status().as_u16(), "Identity store responded");
            Ok(response)
        }
        .instrument(span)
        .await
    }

    fn transport_error(&self, operation: &str, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if error.is_connect() {
            PortError::connection(format!("cannot reach identity store at {}", self.base_url), error)
        } else {
            PortError::Internal {
                message: format!("{} request failed", operation),
                source: Some(Box::new(error)),
            }
        }
    }

    /// Decodes a successful response or maps its status to an error
    async fn decode<T: DeserializeOwned>(&self, response: Response, entity_id: &str) -> Result<T, PortError> {
        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await.map_err(|e| PortError::Internal {
                message: "failed to read identity store response".to_string(),
                source: Some(Box::new(e)),
            })?;
            return serde_json::from_slice(&body).map_err(|e| {
                PortError::transformation(format!("unexpected identity store payload: {}", e))
            });
        }

        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(entity_id, "Identity not found");
        } else {
            tracing::warn!(status = status.as_u16(), entity_id, "Identity store request failed");
        }
        Err(status_error(status, &body, entity_id, retry_after_secs))
    }

    async fn get_identity(
        &self,
        selector: (&'static str, String),
        application_code: &str,
        hash: &str,
    ) -> Result<IdentityRecord, PortError> {
        let mut query = vec![selector.clone(), ("application_code", application_code.to_string())];
        if !hash.is_empty() {
            query.push(("hash", hash.to_string()));
        }

        let request = self.http.get(self.identities_url()).query(&query);
        let response = self.send("get_identity", request).await?;
        self.decode(response, &selector.1).await
    }
}

/// Maps a non-success status to a port error
fn status_error(status: StatusCode, body: &str, entity_id: &str, retry_after_secs: u64) -> PortError {
    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        body.trim().to_string()
    };

    match status {
        StatusCode::NOT_FOUND => PortError::not_found("Identity", entity_id),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => PortError::validation(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized { message },
        StatusCode::CONFLICT => PortError::Conflict { message },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited { retry_after_secs },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: format!("identity store ({})", s.as_u16()),
        },
        _ => PortError::internal(format!("unexpected identity store status {}: {}", status, message)),
    }
}

impl DomainPort for IdentityStoreRestClient {}

#[async_trait]
impl HealthCheckable for IdentityStoreRestClient {
    /// Any HTTP answer from the base URL means the store is reachable
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let request = self.http.get(&self.base_url);
        let outcome = self.send("health_check", request).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(response) if response.status().is_server_error() => {
                HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Degraded, latency_ms)
                    .with_message(format!("identity store answered {}", response.status()))
            }
            Ok(_) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Healthy, latency_ms),
            Err(e) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Unhealthy, latency_ms)
                .with_message(e.to_string()),
        }
    }
}

#[async_trait]
impl IdentityServicePort for IdentityStoreRestClient {
    async fn get_identity_by_connection_id(
        &self,
        connection_id: &str,
        application_code: &str,
        hash: &str,
    ) -> Result<IdentityRecord, PortError> {
        self.get_identity(("connection_id", connection_id.to_string()), application_code, hash)
            .await
    }

    async fn get_identity_by_customer_id(
        &self,
        customer_id: CustomerId,
        application_code: &str,
        hash: &str,
    ) -> Result<IdentityRecord, PortError> {
        self.get_identity(("customer_id", customer_id.to_string()), application_code, hash)
            .await
    }

    async fn create_identity(
        &self,
        change: IdentityChange,
        hash: &str,
    ) -> Result<IdentityRecord, PortError> {
        let mut request = self.http.post(self.identities_url()).json(&change);
        if !hash.is_empty() {
            request = request.query(&[("hash", hash)]);
        }

        let response = self.send("create_identity", request).await?;
        let entity_id = change.identity.connection_id.as_deref().unwrap_or_default();
        self.decode(response, entity_id).await
    }
}
