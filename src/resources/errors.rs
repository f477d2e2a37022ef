//! Error type for resource operations.
//!
//! Resource calls fail in one of three places: the request record is
//! rejected before anything is sent, the executor reports an HTTP failure,
//! or the response body does not fit the expected record.
//!
//! # Example
//!
//! ```rust,ignore
//! use uberdirect::resources::ApiError;
//!
//! match client.deliveries().get_delivery("del_123").await {
//!     Ok(delivery) => println!("Status: {:?}", delivery.status),
//!     Err(ApiError::Validation(e)) => println!("Invalid request: {}", e),
//!     Err(ApiError::Http(e)) => println!("HTTP failure: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::validation::ValidationError;

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use uberdirect::resources::ApiError;
/// use uberdirect::validation::ValidationError;
///
/// let error: ApiError = ValidationError::for_field("tip", "greater_than_equal", "must be >= 0").into();
/// assert!(error.to_string().contains("tip"));
/// assert_eq!(error.status(), None);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request record violates a constraint. Nothing was sent.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The executor failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The request record could not be encoded as JSON.
    #[error("Failed to encode {resource} request: {source}")]
    Encode {
        /// The resource name (e.g., "Delivery").
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The response body does not match the expected record.
    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        /// The resource name (e.g., "Delivery").
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns the HTTP status code when the failure came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
