//! Request executor for Uber Direct API communication.
//!
//! This module provides the foundational HTTP layer for making authenticated
//! requests to the Uber Direct API. It handles URL construction, bearer
//! authentication, retry with capped exponential backoff and error
//! classification.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async request executor
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`RetryPolicy`]: Retriable status set and backoff parameters
//! - [`HttpError`]: Every failure the executor can report
//!
//! # Example
//!
//! ```rust,ignore
//! use uberdirect::{UberDirectConfig, CustomerId};
//! use uberdirect::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let config = UberDirectConfig::builder()
//!     .customer_id(CustomerId::new("cus_123").unwrap())
//!     .access_token("token")
//!     .build()?;
//! let client = HttpClient::new(config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, ["deliveries", "del_1"])
//!     .build()
//!     .unwrap();
//!
//! let body = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **Status in the retriable set** (default 401, 429, 500, 502, 503, 504):
//!   retried after `min(2^attempt, 20)` seconds, up to `max_retries` times
//! - **Any other non-2xx status**: returned immediately as [`HttpError::Response`]
//! - **Transport failures**: returned immediately as [`HttpError::Network`]
//!
//! No sleep follows the final failed attempt.

mod errors;
mod http_client;
mod http_request;
mod retry;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, InvalidJsonError,
    MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use retry::{
    RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRIABLE_STATUS_CODES,
};
