//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;
use std::sync::Arc;

/// A validated Uber Direct customer ID.
///
/// The customer ID scopes every resource URL:
/// `https://api.uber.com/v1/customers/{customer_id}/...`.
///
/// # Example
///
/// ```rust
/// use uberdirect::CustomerId;
///
/// let id = CustomerId::new("cus_123").unwrap();
/// assert_eq!(id.as_ref(), "cus_123");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a new validated customer ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCustomerId`] if the ID is empty or blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() {
            return Err(ConfigError::EmptyCustomerId);
        }
        Ok(Self(id.to_string()))
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth client ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth client secret.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ClientSecret(*****)`.
///
/// # Example
///
/// ```rust
/// use uberdirect::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// The bearer credential attached to every API call.
///
/// A token is either a fixed string or a supplier that is invoked once per
/// attempt, so a refreshed token is picked up between retries.
///
/// # Example
///
/// ```rust
/// use uberdirect::AccessToken;
///
/// let fixed = AccessToken::from("token-abc");
/// assert_eq!(fixed.resolve(), "token-abc");
///
/// let supplied = AccessToken::supplier(|| "fresh-token".to_string());
/// assert_eq!(supplied.resolve(), "fresh-token");
/// ```
#[derive(Clone)]
pub enum AccessToken {
    /// A fixed token string.
    Static(String),
    /// A zero-argument function returning the current token.
    Supplier(Arc<dyn Fn() -> String + Send + Sync>),
}

impl AccessToken {
    /// Wraps a closure as a token supplier.
    #[must_use]
    pub fn supplier<F>(supplier: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Supplier(Arc::new(supplier))
    }

    /// Returns the token to use for the next attempt.
    #[must_use]
    pub fn resolve(&self) -> String {
        match self {
            Self::Static(token) => token.clone(),
            Self::Supplier(supplier) => supplier(),
        }
    }

    pub(crate) fn verify(&self) -> Result<(), ConfigError> {
        match self {
            Self::Static(token) if token.is_empty() => Err(ConfigError::EmptyAccessToken),
            _ => Ok(()),
        }
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self::Static(token.to_string())
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::Static(token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(_) => f.write_str("AccessToken::Static(*****)"),
            Self::Supplier(_) => f.write_str("AccessToken::Supplier(..)"),
        }
    }
}

/// A validated base URL for the API or OAuth host.
///
/// Trailing slashes are stripped so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use uberdirect::HostUrl;
///
/// let url = HostUrl::new("https://api.uber.com/").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("api.uber.com"));
/// assert_eq!(url.as_ref(), "https://api.uber.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
