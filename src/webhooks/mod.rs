//! Courier-status webhooks.
//!
//! Uber Direct posts delivery status changes and courier position updates
//! to a URL configured in the dashboard. This module verifies the signature
//! of those requests and parses them into [`WebhookEvent`] values:
//!
//! - [`WebhookRequest`]: raw body plus the signature header
//! - [`verify_webhook`]: checks the signature and parses the event
//! - [`compute_signature`] / [`verify_signature`]: the low-level primitives
//! - [`WebhookError`]: verification failures

mod errors;
mod types;
mod verification;

pub use errors::WebhookError;
pub use types::{CourierUpdateEvent, DeliveryStatusEvent, WebhookEvent};
pub use verification::{
    compute_signature, verify_signature, verify_webhook, WebhookRequest, HEADER_SIGNATURE,
    HEADER_SIGNATURE_LEGACY,
};
