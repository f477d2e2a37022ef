//! Simulated courier specifications for sandbox deliveries.
//!
//! A [`RoboCourier`] is selected by its `mode` tag. The `custom` variant
//! carries five progression timestamps that must describe a plausible trip;
//! they are checked in order, each against the fields accepted before it:
//!
//! 1. `enroute_for_pickup_at` is accepted as is.
//! 2. `pickup_at` must not be before `enroute_for_pickup_at`.
//! 3. `pickup_imminent_at` must not be after `pickup_at`.
//! 4. `dropoff_at` must be at most 8 hours after `pickup_at`.
//! 5. `dropoff_imminent_at` must not be after `dropoff_at`.
//!
//! Keys are written in lowerCamelCase and read in either lowerCamelCase or
//! snake_case.

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::RoboCourierCancelReason;
use crate::fields::Timestamp;
use crate::validation::{deserialize_validated, ValidationError};

/// Longest allowed gap between pickup and dropoff.
pub const MAX_PICKUP_TO_DROPOFF_HOURS: i64 = 8;

/// Simulated courier behavior, tagged by `mode`.
///
/// # Example
///
/// ```rust
/// use uberdirect::models::RoboCourier;
///
/// let courier: RoboCourier = serde_json::from_str(r#"{"mode": "auto"}"#).unwrap();
/// assert_eq!(courier, RoboCourier::auto());
///
/// let unknown = serde_json::from_str::<RoboCourier>(r#"{"mode": "manual"}"#);
/// assert!(unknown.is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RoboCourier {
    /// The simulator advances on its own.
    Auto(RoboCourierAuto),
    /// The simulator follows caller-supplied timestamps.
    Custom(RoboCourierCustom),
}

impl RoboCourier {
    /// An automatic courier that completes the delivery.
    #[must_use]
    pub const fn auto() -> Self {
        Self::Auto(RoboCourierAuto { cancel_reason: None })
    }

    /// An automatic courier that cancels with `reason`.
    #[must_use]
    pub const fn auto_canceled(reason: RoboCourierCancelReason) -> Self {
        Self::Auto(RoboCourierAuto {
            cancel_reason: Some(reason),
        })
    }
}

impl From<RoboCourierCustom> for RoboCourier {
    fn from(custom: RoboCourierCustom) -> Self {
        Self::Custom(custom)
    }
}

/// Payload of the `auto` mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoboCourierAuto {
    /// Makes the simulated courier cancel for this reason.
    #[serde(default, alias = "cancel_reason", skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<RoboCourierCancelReason>,
}

/// Payload of the `custom` mode, validated on construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoboCourierCustom {
    enroute_for_pickup_at: Timestamp,
    pickup_at: Timestamp,
    pickup_imminent_at: Timestamp,
    dropoff_at: Timestamp,
    dropoff_imminent_at: Timestamp,
}

/// Raw `custom` payload before validation.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoboCourierCustomInput {
    #[serde(alias = "enroute_for_pickup_at")]
    enroute_for_pickup_at: Timestamp,
    #[serde(alias = "pickup_at")]
    pickup_at: Timestamp,
    #[serde(alias = "pickup_imminent_at")]
    pickup_imminent_at: Timestamp,
    #[serde(alias = "dropoff_at")]
    dropoff_at: Timestamp,
    #[serde(alias = "dropoff_imminent_at")]
    dropoff_imminent_at: Timestamp,
}

impl RoboCourierCustom {
    /// Creates a custom progression.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] whose field and kind name the first
    /// timestamp that breaks the ordering rules.
    pub fn new(
        enroute_for_pickup_at: Timestamp,
        pickup_at: Timestamp,
        pickup_imminent_at: Timestamp,
        dropoff_at: Timestamp,
        dropoff_imminent_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if pickup_at < enroute_for_pickup_at {
            return Err(ordering_error(
                "pickup_at",
                "must be greater than or equal to enroute_for_pickup_at",
            ));
        }
        if pickup_imminent_at > pickup_at {
            return Err(ordering_error(
                "pickup_imminent_at",
                "must be less than or equal to pickup_at",
            ));
        }
        if dropoff_at > pickup_at + Duration::hours(MAX_PICKUP_TO_DROPOFF_HOURS) {
            return Err(ordering_error(
                "dropoff_at",
                "must be at most 8 hours after pickup_at",
            ));
        }
        if dropoff_imminent_at > dropoff_at {
            return Err(ordering_error(
                "dropoff_imminent_at",
                "must be less than or equal to dropoff_at",
            ));
        }

        Ok(Self {
            enroute_for_pickup_at,
            pickup_at,
            pickup_imminent_at,
            dropoff_at,
            dropoff_imminent_at,
        })
    }

    /// When the courier starts heading to pickup.
    #[must_use]
    pub const fn enroute_for_pickup_at(&self) -> Timestamp {
        self.enroute_for_pickup_at
    }

    /// When the courier picks up.
    #[must_use]
    pub const fn pickup_at(&self) -> Timestamp {
        self.pickup_at
    }

    /// When the courier reports being close to pickup.
    #[must_use]
    pub const fn pickup_imminent_at(&self) -> Timestamp {
        self.pickup_imminent_at
    }

    /// When the courier drops off.
    #[must_use]
    pub const fn dropoff_at(&self) -> Timestamp {
        self.dropoff_at
    }

    /// When the courier reports being close to dropoff.
    #[must_use]
    pub const fn dropoff_imminent_at(&self) -> Timestamp {
        self.dropoff_imminent_at
    }
}

fn ordering_error(field: &str, message: &str) -> ValidationError {
    ValidationError::for_field(field, field, message)
}

impl<'de> Deserialize<'de> for RoboCourierCustom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated::<D, RoboCourierCustomInput, Self>(deserializer)
    }
}

impl TryFrom<RoboCourierCustomInput> for RoboCourierCustom {
    type Error = ValidationError;

    fn try_from(input: RoboCourierCustomInput) -> Result<Self, Self::Error> {
        Self::new(
            input.enroute_for_pickup_at,
            input.pickup_at,
            input.pickup_imminent_at,
            input.dropoff_at,
            input.dropoff_imminent_at,
        )
    }
}
