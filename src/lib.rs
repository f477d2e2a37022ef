//! # Uber Direct Rust SDK
//!
//! A Rust SDK for the Uber Direct last-mile delivery API: quotes, delivery
//! creation, updates and cancellation, proof of delivery, and courier-status
//! webhooks.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`UberDirectConfig`] and [`UberDirectConfigBuilder`]
//! - OAuth 2.0 client credentials via [`auth::oauth`]
//! - An async request executor with bearer authentication and exponential
//!   backoff via [`HttpClient`]
//! - Self-validating field types in [`fields`] (money as integer cents,
//!   structured addresses, E.164 phone numbers, time windows)
//! - Request and response records in [`models`], validated through
//!   [`validation::Validate`]
//! - Typed operations in [`resources`], bundled by [`UberDirect`]
//! - Webhook signature verification in [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use uberdirect::{UberDirect, UberDirectConfig, CustomerId};
//!
//! let config = UberDirectConfig::builder()
//!     .customer_id(CustomerId::new("customer-uuid").unwrap())
//!     .access_token("access-token")
//!     .max_retries(3)
//!     .build()
//!     .unwrap();
//!
//! let client = UberDirect::new(config).unwrap();
//! let deliveries = client.deliveries();
//! ```
//!
//! ## Creating a Delivery
//!
//! ```rust,ignore
//! use uberdirect::fields::{Money, StructuredAddress};
//! use uberdirect::models::{DeliveryCreateRequest, DeliveryManifestItem};
//!
//! let pickup = StructuredAddress::new(["Av. Reforma 222"], "CDMX", "CDMX", "06600", "MX")?;
//! let dropoff = StructuredAddress::new(["Durango 10"], "CDMX", "CDMX", "06700", "MX")?;
//!
//! let request = DeliveryCreateRequest::new(
//!     "Store",
//!     pickup,
//!     "5512345678".parse()?,
//!     "Customer",
//!     dropoff,
//!     "5587654321".parse()?,
//!     vec![DeliveryManifestItem::new("Tacos", 2)],
//!     Money::from_cents(25_000),
//! );
//!
//! let delivery = client.deliveries().create_delivery(&request).await?;
//! println!("Tracking: {}", delivery.tracking_url);
//! ```
//!
//! ## Refreshing Tokens
//!
//! The token is resolved on every attempt, so a supplier can hand out a
//! fresh token without rebuilding the client:
//!
//! ```rust
//! use std::sync::{Arc, RwLock};
//! use uberdirect::{AccessToken, CustomerId, UberDirectConfig};
//!
//! let current = Arc::new(RwLock::new(String::from("initial-token")));
//! let source = Arc::clone(&current);
//!
//! let config = UberDirectConfig::builder()
//!     .customer_id(CustomerId::new("customer-uuid").unwrap())
//!     .access_token(AccessToken::supplier(move || {
//!         source.read().map(|t| t.clone()).unwrap_or_default()
//!     }))
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Field types validate on construction, records before sending
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod constants;
pub mod error;
pub mod fields;
pub mod models;
pub mod resources;
pub mod validation;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiVersion, ClientId, ClientSecret, CustomerId, HostUrl, OAuthVersion,
    UberDirectConfig, UberDirectConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponseError,
    InvalidHttpRequestError, InvalidJsonError, MaxHttpRetriesExceededError, RetryPolicy,
};

// Re-export OAuth types for convenience
pub use auth::oauth::{get_access_token, request_access_token, AccessTokenResponse, OAuthError};

pub use resources::{ApiError, Deliveries, Quotes, UberDirect};
pub use validation::{Validate, ValidationError};
pub use webhooks::{verify_webhook, WebhookError, WebhookEvent, WebhookRequest};
