//! Error type for webhook verification.

use thiserror::Error;

/// Error type for webhook verification.
///
/// Signature failures carry no detail so that nothing about the expected
/// signature leaks to the caller's logs.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request carried no signature.
    #[error("Webhook signature header is missing")]
    MissingSignature,

    /// The signature does not match the body.
    #[error("Webhook signature verification failed")]
    InvalidSignature,

    /// The body is signed correctly but is not a webhook event.
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookError>();
};
