//! OAuth-specific error types for the Uber Direct SDK.
//!
//! # Error Types
//!
//! - [`OAuthError::TokenRequestFailed`]: The token endpoint rejected the request
//!   or could not be reached
//! - [`OAuthError::MissingAccessToken`]: The token endpoint answered without an `access_token`
//!
//! # Example
//!
//! ```rust
//! use uberdirect::auth::oauth::OAuthError;
//!
//! let error = OAuthError::TokenRequestFailed {
//!     status: 401,
//!     message: "invalid_client".to_string(),
//! };
//! assert!(error.to_string().contains("401"));
//! ```

use thiserror::Error;

/// Errors that can occur while acquiring an access token.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The token request failed.
    ///
    /// `status` is the HTTP status returned by the token endpoint, or `0`
    /// when no response was received.
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed {
        /// The HTTP status code returned, `0` for network failures.
        status: u16,
        /// The response body or transport error description.
        message: String,
    },

    /// The token endpoint answered 2xx without an `access_token` field.
    #[error("Token response did not contain an access_token")]
    MissingAccessToken,
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
