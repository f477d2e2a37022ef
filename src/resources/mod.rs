//! Typed operations on the Uber Direct API.
//!
//! [`UberDirect`] owns one [`HttpClient`] and hands out resource handles
//! that share it. Every operation validates its request record, sends it
//! through the executor (bearer token, retries), and decodes the response
//! into a model record.
//!
//! # Example
//!
//! ```rust,ignore
//! use uberdirect::{UberDirect, UberDirectConfig, CustomerId};
//!
//! let config = UberDirectConfig::builder()
//!     .customer_id(CustomerId::new("customer-uuid")?)
//!     .access_token("token")
//!     .build()?;
//! let client = UberDirect::new(config)?;
//!
//! let delivery = client.deliveries().get_delivery("del_123").await?;
//! println!("{:?}", delivery.status);
//! ```

mod deliveries;
mod errors;
mod quotes;

pub use deliveries::Deliveries;
pub use errors::ApiError;
pub use quotes::Quotes;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::HttpClient;
use crate::config::UberDirectConfig;
use crate::error::ConfigError;
use crate::validation::{Validate, ValidationError};

/// Entry point bundling every resource over one shared executor.
#[derive(Clone, Debug)]
pub struct UberDirect {
    client: HttpClient,
}

impl UberDirect {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: UberDirectConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }

    /// Creates a client sharing an existing configuration.
    ///
    /// # Errors
    ///
    /// See [`UberDirect::new`].
    pub fn from_shared(config: Arc<UberDirectConfig>) -> Result<Self, ConfigError> {
        Ok(Self {
            client: HttpClient::from_shared(config)?,
        })
    }

    /// Returns the underlying executor.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.client
    }

    /// Returns the quotes handle.
    #[must_use]
    pub fn quotes(&self) -> Quotes {
        Quotes::new(self.client.clone())
    }

    /// Returns the deliveries handle.
    #[must_use]
    pub fn deliveries(&self) -> Deliveries {
        Deliveries::new(self.client.clone())
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UberDirect>();
};

/// Validates a request record and encodes it as a JSON body.
fn encode<T>(resource: &'static str, record: &T) -> Result<serde_json::Value, ApiError>
where
    T: Serialize + Validate,
{
    record.validate().map_err(ValidationError::from)?;
    serde_json::to_value(record).map_err(|source| ApiError::Encode { resource, source })
}

/// Decodes a response body into a model record.
fn decode<T: DeserializeOwned>(
    resource: &'static str,
    body: serde_json::Value,
) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|source| ApiError::Decode { resource, source })
}
