//! Error types for the Uber Direct SDK.
//!
//! This module contains the configuration error type. Errors for the other
//! layers live next to the code that raises them:
//!
//! - [`crate::clients::HttpError`] for the request executor
//! - [`crate::auth::OAuthError`] for token acquisition
//! - [`crate::validation::ValidationError`] for model validation
//! - [`crate::resources::ApiError`] for resource operations
//!
//! # Example
//!
//! ```rust
//! use uberdirect::{CustomerId, ConfigError};
//!
//! let result = CustomerId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyCustomerId)));
//! ```

use thiserror::Error;

/// Errors that can occur while building the SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Customer ID cannot be empty.
    #[error("Customer ID cannot be empty. Please provide the Uber Direct customer ID.")]
    EmptyCustomerId,

    /// A static access token cannot be empty.
    #[error("Access token cannot be empty. Provide a token or a token supplier.")]
    EmptyAccessToken,

    /// OAuth client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide a valid OAuth client ID.")]
    EmptyClientId,

    /// OAuth client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide a valid OAuth client secret.")]
    EmptyClientSecret,

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'v<number>' (e.g., 'v1').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.uber.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The underlying HTTP transport could not be created.
    #[error("Failed to build HTTP client: {reason}")]
    HttpClientBuild {
        /// The reason reported by the transport.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_customer_id_error_message() {
        let error = ConfigError::EmptyCustomerId;
        let message = error.to_string();
        assert!(message.contains("Customer ID cannot be empty"));
    }

    #[test]
    fn test_invalid_host_url_error_message() {
        let error = ConfigError::InvalidHostUrl {
            url: "ftp//nope".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ftp//nope"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "customer_id",
        };
        let message = error.to_string();
        assert!(message.contains("customer_id"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyAccessToken;
        let _: &dyn std::error::Error = &error;
    }
}
