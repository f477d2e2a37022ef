//! Webhook signature verification.
//!
//! Uber Direct signs each webhook body with HMAC-SHA256 using the webhook
//! signing key from the developer dashboard, and sends the lowercase hex
//! digest in the [`HEADER_SIGNATURE`] header.
//!
//! # Example
//!
//! ```rust
//! use uberdirect::webhooks::{compute_signature, verify_webhook, WebhookEvent, WebhookRequest};
//!
//! let body = br#"{"kind": "event.courier_update", "delivery_id": "del_1", "location": {"lat": 19.4, "lng": -99.1}}"#;
//! let signature = compute_signature(body, "signing-key");
//!
//! let request = WebhookRequest::new(body.to_vec(), signature);
//! let event = verify_webhook(&request, "signing-key").unwrap();
//! assert!(matches!(event, WebhookEvent::CourierUpdate(_)));
//! ```
//!
//! # Security
//!
//! Signatures are compared in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::webhooks::{WebhookError, WebhookEvent};

type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// Header Constants
// ============================================================================

/// HTTP header carrying the hex-encoded HMAC-SHA256 of the body.
pub const HEADER_SIGNATURE: &str = "X-Uber-Signature";

/// Legacy header some accounts still receive with the same value.
pub const HEADER_SIGNATURE_LEGACY: &str = "X-Postmates-Signature";

// ============================================================================
// WebhookRequest
// ============================================================================

/// An incoming webhook request.
///
/// The body is kept as raw bytes; re-serializing parsed JSON would change
/// the signed payload.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    body: Vec<u8>,
    signature: String,
}

impl WebhookRequest {
    /// Creates a request from the raw body and the signature header value.
    #[must_use]
    pub fn new(body: impl Into<Vec<u8>>, signature: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            signature: signature.into(),
        }
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the signature header value.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

// ============================================================================
// Verification Functions
// ============================================================================

fn sign(body: &[u8], signing_key: &str) -> Option<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(signing_key.as_bytes()).ok()?;
    mac.update(body);
    Some(mac.finalize().into_bytes().to_vec())
}

/// Computes the lowercase hex HMAC-SHA256 of `body`.
///
/// ```rust
/// use uberdirect::webhooks::compute_signature;
///
/// let signature = compute_signature(b"payload", "key");
/// assert_eq!(signature.len(), 64);
/// assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
/// ```
#[must_use]
pub fn compute_signature(body: &[u8], signing_key: &str) -> String {
    sign(body, signing_key).map(hex::encode).unwrap_or_default()
}

/// Checks `signature` against the body in constant time.
///
/// Upper-case hex digests are accepted.
#[must_use]
pub fn verify_signature(body: &[u8], signature: &str, signing_key: &str) -> bool {
    let Some(expected) = sign(body, signing_key) else {
        return false;
    };
    let expected = hex::encode(expected);
    let received = signature.trim().to_ascii_lowercase();
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}

/// Verifies a webhook request and parses its event.
///
/// # Errors
///
/// Returns [`WebhookError::MissingSignature`] if the signature is empty,
/// [`WebhookError::InvalidSignature`] if it does not match the body, and
/// [`WebhookError::InvalidPayload`] if the body is not an event.
pub fn verify_webhook(
    request: &WebhookRequest,
    signing_key: &str,
) -> Result<WebhookEvent, WebhookError> {
    if request.signature().trim().is_empty() {
        return Err(WebhookError::MissingSignature);
    }
    if !verify_signature(request.body(), request.signature(), signing_key) {
        tracing::warn!("Rejected webhook with an invalid signature");
        return Err(WebhookError::InvalidSignature);
    }
    let event: WebhookEvent = serde_json::from_slice(request.body())?;
    tracing::debug!(delivery_id = ?event.delivery_id(), "Verified webhook");
    Ok(event)
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}
