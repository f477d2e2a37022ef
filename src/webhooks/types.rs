//! Webhook event payloads.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::constants::DeliveryStatus;
use crate::models::LatLng;

/// A verified webhook event, selected by its `kind` field.
///
/// # Example
///
/// ```rust
/// use uberdirect::webhooks::WebhookEvent;
///
/// let event: WebhookEvent = serde_json::from_str(
///     r#"{"kind": "event.refund_request", "id": "evt_1"}"#,
/// ).unwrap();
/// assert_eq!(event, WebhookEvent::Other);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WebhookEvent {
    /// A delivery changed status.
    #[serde(rename = "event.delivery_status")]
    DeliveryStatus(DeliveryStatusEvent),
    /// The courier moved.
    #[serde(rename = "event.courier_update")]
    CourierUpdate(CourierUpdateEvent),
    /// Any event kind this SDK does not model.
    #[serde(other)]
    Other,
}

impl WebhookEvent {
    /// Returns the delivery the event refers to, if known.
    #[must_use]
    pub fn delivery_id(&self) -> Option<&str> {
        match self {
            Self::DeliveryStatus(e) => Some(&e.delivery_id),
            Self::CourierUpdate(e) => Some(&e.delivery_id),
            Self::Other => None,
        }
    }
}

/// Payload of `event.delivery_status`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStatusEvent {
    /// Event identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Delivery the event refers to.
    pub delivery_id: String,
    /// New status.
    pub status: DeliveryStatus,
    /// Snapshot of the delivery. Kept as raw JSON since partial snapshots
    /// are common.
    #[serde(default)]
    pub data: serde_json::Value,
    /// When the event was emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<FixedOffset>>,
    /// `false` for sandbox deliveries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_mode: Option<bool>,
}

/// Payload of `event.courier_update`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourierUpdateEvent {
    /// Event identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Delivery the event refers to.
    pub delivery_id: String,
    /// Courier position.
    pub location: LatLng,
    /// `false` for sandbox deliveries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_mode: Option<bool>,
}
