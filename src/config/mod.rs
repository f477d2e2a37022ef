//! Configuration types for the Uber Direct SDK.
//!
//! This module provides the configuration consumed by the request executor
//! and shared read-only by every resource handle.
//!
//! # Overview
//!
//! - [`UberDirectConfig`]: The immutable configuration
//! - [`UberDirectConfigBuilder`]: A builder for constructing [`UberDirectConfig`] instances
//! - [`CustomerId`], [`ClientId`], [`ClientSecret`], [`HostUrl`]: Validated newtypes
//! - [`AccessToken`]: A fixed token or a per-attempt token supplier
//! - [`ApiVersion`], [`OAuthVersion`]: Path versions
//!
//! # Example
//!
//! ```rust
//! use uberdirect::{UberDirectConfig, CustomerId, AccessToken, ApiVersion};
//!
//! let config = UberDirectConfig::builder()
//!     .customer_id(CustomerId::new("cus_123").unwrap())
//!     .access_token(AccessToken::from("token"))
//!     .api_version(ApiVersion::V1)
//!     .max_retries(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.base_url(),
//!     "https://api.uber.com/v1/customers/cus_123"
//! );
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ClientId, ClientSecret, CustomerId, HostUrl};
pub use version::{ApiVersion, OAuthVersion};

use std::collections::BTreeSet;
use std::time::Duration;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Default host for the delivery API.
pub const DEFAULT_API_HOST: &str = "https://api.uber.com";

/// Default host for the OAuth token endpoint.
pub const DEFAULT_AUTH_HOST: &str = "https://auth.uber.com";

/// Configuration for the Uber Direct SDK.
///
/// # Thread Safety
///
/// `UberDirectConfig` is `Clone`, `Send`, and `Sync`. The optional shared
/// `reqwest::Client` is a pooled handle that is safe to reuse across
/// simultaneous calls.
#[derive(Clone, Debug)]
pub struct UberDirectConfig {
    customer_id: CustomerId,
    access_token: AccessToken,
    api_version: ApiVersion,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
    api_host: HostUrl,
    auth_host: HostUrl,
    user_agent_prefix: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl UberDirectConfig {
    /// Creates a new builder for constructing an `UberDirectConfig`.
    #[must_use]
    pub fn builder() -> UberDirectConfigBuilder {
        UberDirectConfigBuilder::new()
    }

    /// Returns the customer ID.
    #[must_use]
    pub const fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the access token source.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the API host.
    #[must_use]
    pub const fn api_host(&self) -> &HostUrl {
        &self.api_host
    }

    /// Returns the OAuth host.
    #[must_use]
    pub const fn auth_host(&self) -> &HostUrl {
        &self.auth_host
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the shared HTTP client handle, if one was injected.
    #[must_use]
    pub const fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }

    /// Returns the versioned, customer-scoped resource root.
    ///
    /// Format: `{api_host}/{version}/customers/{customer_id}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}/customers/{}",
            self.api_host.as_ref(),
            self.api_version,
            self.customer_id.as_ref()
        )
    }
}

// Verify UberDirectConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UberDirectConfig>();
};

/// Builder for constructing [`UberDirectConfig`] instances.
///
/// Required fields are `customer_id` and `access_token`.
///
/// # Defaults
///
/// - `api_version`: `v1`
/// - `max_retries`: 3
/// - `retriable_status_codes`: 401, 429, 500, 502, 503, 504
/// - backoff: `min(2^attempt, 20)` seconds
/// - `timeout`: `None` (transport default)
/// - `api_host`: `https://api.uber.com`
/// - `auth_host`: `https://auth.uber.com`
#[derive(Debug, Default)]
pub struct UberDirectConfigBuilder {
    customer_id: Option<CustomerId>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    retry_policy: Option<RetryPolicy>,
    max_retries: Option<u32>,
    retriable_status_codes: Option<BTreeSet<u16>>,
    timeout: Option<Duration>,
    api_host: Option<HostUrl>,
    auth_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl UberDirectConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the customer ID (required).
    #[must_use]
    pub fn customer_id(mut self, id: CustomerId) -> Self {
        self.customer_id = Some(id);
        self
    }

    /// Sets the access token or token supplier (required).
    #[must_use]
    pub fn access_token(mut self, token: impl Into<AccessToken>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Replaces the whole retry policy.
    ///
    /// `max_retries` and `retriable_status_codes`, when also set, take
    /// precedence over the values carried by this policy.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets the maximum number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the HTTP status codes that trigger a retry.
    #[must_use]
    pub fn retriable_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retriable_status_codes = Some(codes.into_iter().collect());
        self
    }

    /// Sets the per-request timeout honored by the transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the API host.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Overrides the OAuth host.
    #[must_use]
    pub fn auth_host(mut self, host: HostUrl) -> Self {
        self.auth_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Shares an existing connection pool instead of creating one.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`UberDirectConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `customer_id` or
    /// `access_token` are not set, and [`ConfigError::EmptyAccessToken`] if a
    /// static token is empty.
    pub fn build(self) -> Result<UberDirectConfig, ConfigError> {
        let customer_id = self.customer_id.ok_or(ConfigError::MissingRequiredField {
            field: "customer_id",
        })?;
        let access_token = self.access_token.ok_or(ConfigError::MissingRequiredField {
            field: "access_token",
        })?;
        access_token.verify()?;

        let mut retry_policy = self.retry_policy.unwrap_or_default();
        if let Some(max_retries) = self.max_retries {
            retry_policy = retry_policy.with_max_retries(max_retries);
        }
        if let Some(codes) = self.retriable_status_codes {
            retry_policy = retry_policy.with_retriable_status_codes(codes);
        }

        let api_host = match self.api_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_API_HOST)?,
        };
        let auth_host = match self.auth_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_AUTH_HOST)?,
        };

        Ok(UberDirectConfig {
            customer_id,
            access_token,
            api_version: self.api_version.unwrap_or_default(),
            retry_policy,
            timeout: self.timeout,
            api_host,
            auth_host,
            user_agent_prefix: self.user_agent_prefix,
            http_client: self.http_client,
        })
    }
}
