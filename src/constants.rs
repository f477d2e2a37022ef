//! Allowed values for enumerated API fields.
//!
//! All enums serialize to the exact strings the API uses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Approximate size of a manifest item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryManifestItemSize {
    /// Carried with one hand, e.g. a bottle of water.
    Small,
    /// Needs a tote bag, e.g. a retail bag.
    Medium,
    /// Needs two hands, e.g. a computer monitor.
    Large,
    /// Needs two hands and more, e.g. a 42 inch TV.
    Xlarge,
}

/// Barcode symbology to scan at a waypoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryBarcodeRequirementType {
    /// QR code.
    #[serde(rename = "QR")]
    Qr,
    /// EAN-13.
    #[serde(rename = "EAN13")]
    Ean13,
    /// Code 39.
    #[serde(rename = "CODE39")]
    Code39,
    /// Code 128.
    #[serde(rename = "CODE128")]
    Code128,
    /// Code 39 with the full ASCII set.
    #[serde(rename = "CODE39_FULL_ASCII")]
    Code39FullAscii,
}

/// How the dropoff pincode is generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPincodeRequirementType {
    /// A random pincode.
    Random,
    /// The account default.
    Default,
    /// A 4-digit pincode supplied in the request.
    MerchantProvided,
}

/// What the courier does when the recipient is unavailable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryUndeliverableAction {
    /// Bring the package back to the pickup location. The default.
    Return,
    /// Keep or throw away the package.
    Discard,
    /// Leave the package at the dropoff location.
    LeaveAtDoor,
}

/// The normal handoff action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryDeliverableAction {
    /// Hand the package to the recipient. The default.
    DeliverableActionMeetAtDoor,
    /// Contactless delivery with photo confirmation.
    DeliverableActionLeaveAtDoor,
}

/// Kind of proof-of-delivery document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofOfDeliveryType {
    /// Entered pincode.
    Pincode,
    /// Photo.
    Picture,
    /// Signature.
    Signature,
}

/// Stage of a delivery at which proof was collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofOfDeliveryWaypoint {
    /// Return trip.
    Return,
    /// Pickup.
    Pickup,
    /// Dropoff.
    Dropoff,
}

/// Simulated courier progression mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoboCourierMode {
    /// The simulator advances on its own schedule.
    Auto,
    /// The caller supplies every progression timestamp.
    Custom,
}

/// Cancellation reason a simulated courier reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoboCourierCancelReason {
    /// Recipient did not show up.
    CustomerUnavailable,
    /// Recipient refused the order.
    CustomerRejectedOrder,
    /// Dropoff address could not be found.
    CannotFindCustomerAddress,
    /// Dropoff location could not be accessed.
    CannotAccessCustomerLocation,
}

/// Lifecycle status of a delivery.
///
/// Statuses the SDK does not know deserialize to [`DeliveryStatus::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Accepted, no courier assigned yet.
    Pending,
    /// Courier heading to pickup.
    Pickup,
    /// Courier picked up the items.
    PickupComplete,
    /// Courier heading to dropoff.
    Dropoff,
    /// Items handed off.
    Delivered,
    /// Delivery canceled.
    Canceled,
    /// Items brought back to the pickup location.
    Returned,
    /// A status added after this SDK was released.
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    /// Returns `true` once the delivery can no longer change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Canceled | Self::Returned)
    }

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Pickup => "pickup",
            Self::PickupComplete => "pickup_complete",
            Self::Dropoff => "dropoff",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
            Self::Returned => "returned",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_values() {
        assert_eq!(
            serde_json::to_value(DeliveryManifestItemSize::Xlarge).unwrap(),
            json!("xlarge")
        );
        assert_eq!(
            serde_json::to_value(DeliveryBarcodeRequirementType::Code39FullAscii).unwrap(),
            json!("CODE39_FULL_ASCII")
        );
        assert_eq!(
            serde_json::to_value(DeliveryPincodeRequirementType::MerchantProvided).unwrap(),
            json!("merchant_provided")
        );
        assert_eq!(
            serde_json::to_value(DeliveryDeliverableAction::DeliverableActionLeaveAtDoor)
                .unwrap(),
            json!("deliverable_action_leave_at_door")
        );
        assert_eq!(
            serde_json::to_value(RoboCourierCancelReason::CannotAccessCustomerLocation).unwrap(),
            json!("cannot_access_customer_location")
        );
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let status: DeliveryStatus = serde_json::from_value(json!("en_route_to_moon")).unwrap();
        assert_eq!(status, DeliveryStatus::Unknown);

        let status: DeliveryStatus = serde_json::from_value(json!("pickup_complete")).unwrap();
        assert_eq!(status, DeliveryStatus::PickupComplete);
        assert_eq!(status.to_string(), "pickup_complete");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(DeliveryStatus::Delivered.is_terminal());
        assert!(DeliveryStatus::Canceled.is_terminal());
        assert!(!DeliveryStatus::Pickup.is_terminal());
    }

    #[test]
    fn test_unknown_enum_values_are_rejected_elsewhere() {
        assert!(serde_json::from_value::<ProofOfDeliveryType>(json!("video")).is_err());
        assert!(serde_json::from_value::<RoboCourierMode>(json!("manual")).is_err());
    }
}
