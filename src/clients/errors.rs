//! HTTP-specific error types for the Uber Direct SDK.
//!
//! - [`HttpResponseError`]: Non-2xx response with a non-retriable status
//! - [`MaxHttpRetriesExceededError`]: Retriable status persisted past the retry budget
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`InvalidJsonError`]: A 2xx response whose body is not JSON
//! - [`HttpError`]: Unified error type encompassing all of the above plus transport failures
//!
//! # Example
//!
//! ```rust,ignore
//! use uberdirect::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(body) => println!("Success: {}", body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::MaxRetries(e)) => println!("Gave up after {} tries", e.tries),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::Decode(e)) => println!("Bad JSON: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-retriable non-2xx response.
///
/// `message` is a compact JSON rendering of the provider's error fields
/// (`code`, `message`, `metadata`) or the raw body when none are present.
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message.
    pub message: String,
    /// The parsed response body (`{"raw_body": ...}` when it was not JSON).
    pub body: serde_json::Value,
}

/// Error returned when a retriable status persists after every retry.
///
/// Carries the last response received.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count after {tries} tries. Last status {code}: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// Total number of attempts made.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// The parsed body of the last response.
    pub body: serde_json::Value,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The resource path is empty or contains an empty segment.
    #[error("Invalid resource path '{path}'.")]
    InvalidPath {
        /// The joined path that was rejected.
        path: String,
    },
}

/// Error returned when a successful response body is not valid JSON.
#[derive(Debug, Error)]
#[error("Response with status {code} is not valid JSON: {source}")]
pub struct InvalidJsonError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
    /// The underlying parse error.
    #[source]
    pub source: serde_json::Error,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Non-retriable non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Retriable response persisted past the retry budget.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A 2xx response carried a malformed JSON body.
    #[error(transparent)]
    Decode(#[from] InvalidJsonError),

    /// Network or connection error. Never retried.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::Decode(e) => Some(e.code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidRequest(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_response_error_includes_status_code_in_message() {
        let error = HttpResponseError {
            code: 404,
            message: r#"{"code":"not_found"}"#.to_string(),
            body: json!({"code": "not_found"}),
        };
        assert_eq!(error.to_string(), r#"HTTP 404: {"code":"not_found"}"#);
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 503,
            tries: 4,
            message: "unavailable".to_string(),
            body: json!({}),
        };
        let message = error.to_string();
        assert!(message.contains("4 tries"));
        assert!(message.contains("503"));
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
    }

    #[test]
    fn test_status_accessor() {
        let error = HttpError::from(HttpResponseError {
            code: 422,
            message: String::new(),
            body: json!({}),
        });
        assert_eq!(error.status(), Some(422));

        let error = HttpError::from(InvalidHttpRequestError::InvalidPath {
            path: String::new(),
        });
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_decode_error_keeps_raw_body() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = InvalidJsonError {
            code: 200,
            body: "not json".to_string(),
            source,
        };
        assert!(error.to_string().contains("200"));
        assert_eq!(error.body, "not json");
    }
}
