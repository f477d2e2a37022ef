//! Pickup and dropoff time windows with cross-field ordering rules.
//!
//! The four timestamps are validated by an ordered pipeline. Each step sees
//! the partially built [`TimeWindows`] holding only the fields accepted so
//! far, checks its own input against them and adds it:
//!
//! 1. `pickup_ready_dt` is accepted as is.
//! 2. `pickup_deadline_dt` must be at least 10 minutes after `pickup_ready_dt`.
//! 3. `dropoff_ready_dt` must not be after `pickup_deadline_dt`.
//! 4. `dropoff_deadline_dt` must be at least 20 minutes after `dropoff_ready_dt`
//!    and not before `pickup_deadline_dt`. Checked only when both are present.
//!
//! Rules are skipped when a timestamp they compare against is absent. A
//! violation is reported on the field being added, with the error kind set
//! to the name of the earlier field the rule relates to.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::{deserialize_validated, ValidationError};

/// A timezone-aware timestamp.
pub type Timestamp = DateTime<FixedOffset>;

/// Minimum gap between `pickup_ready_dt` and `pickup_deadline_dt`.
pub const MIN_PICKUP_WINDOW_MINUTES: i64 = 10;

/// Minimum gap between `dropoff_ready_dt` and `dropoff_deadline_dt`.
pub const MIN_DROPOFF_WINDOW_MINUTES: i64 = 20;

/// Validated pickup and dropoff windows.
///
/// Only obtainable through [`TimeWindows::builder`] or deserialization, both
/// of which run the validation pipeline. Flattened into quote and delivery
/// requests, so the four fields sit at the top level of the request body.
///
/// # Example
///
/// ```rust
/// use chrono::{DateTime, Duration};
/// use uberdirect::fields::TimeWindows;
///
/// let t = DateTime::parse_from_rfc3339("2024-05-01T12:00:00-06:00").unwrap();
///
/// let windows = TimeWindows::builder()
///     .pickup_ready_dt(t)
///     .pickup_deadline_dt(t + Duration::minutes(9))
///     .build();
/// assert_eq!(windows.unwrap_err().kind(), "pickup_ready_dt");
///
/// let windows = TimeWindows::builder()
///     .pickup_ready_dt(t)
///     .pickup_deadline_dt(t + Duration::minutes(10))
///     .dropoff_ready_dt(t)
///     .dropoff_deadline_dt(t + Duration::minutes(20))
///     .build();
/// assert!(windows.is_ok());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TimeWindows {
    #[serde(skip_serializing_if = "Option::is_none")]
    pickup_ready_dt: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pickup_deadline_dt: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dropoff_ready_dt: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dropoff_deadline_dt: Option<Timestamp>,
}

impl TimeWindows {
    /// Creates a builder with every timestamp unset.
    #[must_use]
    pub fn builder() -> TimeWindowsBuilder {
        TimeWindowsBuilder::default()
    }

    /// Beginning of the pickup window.
    #[must_use]
    pub const fn pickup_ready_dt(&self) -> Option<Timestamp> {
        self.pickup_ready_dt
    }

    /// End of the pickup window.
    #[must_use]
    pub const fn pickup_deadline_dt(&self) -> Option<Timestamp> {
        self.pickup_deadline_dt
    }

    /// Beginning of the dropoff window.
    #[must_use]
    pub const fn dropoff_ready_dt(&self) -> Option<Timestamp> {
        self.dropoff_ready_dt
    }

    /// End of the dropoff window.
    #[must_use]
    pub const fn dropoff_deadline_dt(&self) -> Option<Timestamp> {
        self.dropoff_deadline_dt
    }

    /// Returns `true` if no timestamp is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pickup_ready_dt.is_none()
            && self.pickup_deadline_dt.is_none()
            && self.dropoff_ready_dt.is_none()
            && self.dropoff_deadline_dt.is_none()
    }
}

/// Unvalidated time window input.
///
/// Also the raw deserialization shape of [`TimeWindows`]. Setting a value
/// never fails; [`TimeWindowsBuilder::build`] runs the pipeline.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct TimeWindowsBuilder {
    #[serde(default)]
    pickup_ready_dt: Option<Timestamp>,
    #[serde(default)]
    pickup_deadline_dt: Option<Timestamp>,
    #[serde(default)]
    dropoff_ready_dt: Option<Timestamp>,
    #[serde(default)]
    dropoff_deadline_dt: Option<Timestamp>,
}

impl TimeWindowsBuilder {
    /// Sets the beginning of the pickup window.
    #[must_use]
    pub const fn pickup_ready_dt(mut self, at: Timestamp) -> Self {
        self.pickup_ready_dt = Some(at);
        self
    }

    /// Sets the end of the pickup window.
    #[must_use]
    pub const fn pickup_deadline_dt(mut self, at: Timestamp) -> Self {
        self.pickup_deadline_dt = Some(at);
        self
    }

    /// Sets the beginning of the dropoff window.
    #[must_use]
    pub const fn dropoff_ready_dt(mut self, at: Timestamp) -> Self {
        self.dropoff_ready_dt = Some(at);
        self
    }

    /// Sets the end of the dropoff window.
    #[must_use]
    pub const fn dropoff_deadline_dt(mut self, at: Timestamp) -> Self {
        self.dropoff_deadline_dt = Some(at);
        self
    }

    /// Runs the validation pipeline.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] raised by the pipeline.
    pub fn build(self) -> Result<TimeWindows, ValidationError> {
        PIPELINE
            .iter()
            .try_fold(TimeWindows::default(), |partial, step| step(partial, &self))
    }
}

impl TryFrom<TimeWindowsBuilder> for TimeWindows {
    type Error = ValidationError;

    fn try_from(builder: TimeWindowsBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl<'de> Deserialize<'de> for TimeWindows {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_validated::<D, TimeWindowsBuilder, Self>(deserializer)
    }
}

type Step = fn(TimeWindows, &TimeWindowsBuilder) -> Result<TimeWindows, ValidationError>;

const PIPELINE: [Step; 4] = [
    accept_pickup_ready,
    accept_pickup_deadline,
    accept_dropoff_ready,
    accept_dropoff_deadline,
];

#[allow(clippy::unnecessary_wraps)]
fn accept_pickup_ready(
    mut partial: TimeWindows,
    input: &TimeWindowsBuilder,
) -> Result<TimeWindows, ValidationError> {
    partial.pickup_ready_dt = input.pickup_ready_dt;
    Ok(partial)
}

fn accept_pickup_deadline(
    mut partial: TimeWindows,
    input: &TimeWindowsBuilder,
) -> Result<TimeWindows, ValidationError> {
    if let (Some(ready), Some(deadline)) = (partial.pickup_ready_dt, input.pickup_deadline_dt) {
        if deadline - ready < Duration::minutes(MIN_PICKUP_WINDOW_MINUTES) {
            return Err(ValidationError::for_field(
                "pickup_deadline_dt",
                "pickup_ready_dt",
                "must be at least 10 mins later than pickup_ready_dt",
            ));
        }
    }
    partial.pickup_deadline_dt = input.pickup_deadline_dt;
    Ok(partial)
}

fn accept_dropoff_ready(
    mut partial: TimeWindows,
    input: &TimeWindowsBuilder,
) -> Result<TimeWindows, ValidationError> {
    if let (Some(pickup_deadline), Some(ready)) =
        (partial.pickup_deadline_dt, input.dropoff_ready_dt)
    {
        if ready > pickup_deadline {
            return Err(ValidationError::for_field(
                "dropoff_ready_dt",
                "pickup_deadline_dt",
                "must be less than or equal to pickup_deadline_dt",
            ));
        }
    }
    partial.dropoff_ready_dt = input.dropoff_ready_dt;
    Ok(partial)
}

fn accept_dropoff_deadline(
    mut partial: TimeWindows,
    input: &TimeWindowsBuilder,
) -> Result<TimeWindows, ValidationError> {
    if let (Some(ready), Some(pickup_deadline), Some(deadline)) = (
        partial.dropoff_ready_dt,
        partial.pickup_deadline_dt,
        input.dropoff_deadline_dt,
    ) {
        if deadline - ready < Duration::minutes(MIN_DROPOFF_WINDOW_MINUTES) {
            return Err(ValidationError::for_field(
                "dropoff_deadline_dt",
                "dropoff_ready_dt",
                "must be at least 20 mins later than dropoff_ready_dt",
            ));
        }
        if deadline < pickup_deadline {
            return Err(ValidationError::for_field(
                "dropoff_deadline_dt",
                "pickup_deadline_dt",
                "must be greater than or equal to pickup_deadline_dt",
            ));
        }
    }
    partial.dropoff_deadline_dt = input.dropoff_deadline_dt;
    Ok(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> Timestamp {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00").unwrap()
    }

    #[test]
    fn test_empty_and_partial_windows_are_valid() {
        assert!(TimeWindows::builder().build().unwrap().is_empty());

        let t = now();
        let windows = TimeWindows::builder()
            .pickup_ready_dt(t)
            .dropoff_deadline_dt(t)
            .build()
            .unwrap();
        assert_eq!(windows.pickup_ready_dt(), Some(t));
        assert_eq!(windows.dropoff_deadline_dt(), Some(t));
    }

    #[test]
    fn test_pickup_window_shorter_than_ten_minutes() {
        let t = now();
        let error = TimeWindows::builder()
            .pickup_ready_dt(t)
            .pickup_deadline_dt(t + Duration::minutes(9))
            .build()
            .unwrap_err();
        assert_eq!(error.kind(), "pickup_ready_dt");
        assert_eq!(error.field(), "pickup_deadline_dt");

        assert!(TimeWindows::builder()
            .pickup_ready_dt(t)
            .pickup_deadline_dt(t + Duration::minutes(10))
            .build()
            .is_ok());
    }

    #[test]
    fn test_dropoff_ready_after_pickup_deadline() {
        let t = now();
        let deadline = t + Duration::minutes(10);
        let error = TimeWindows::builder()
            .pickup_ready_dt(t)
            .pickup_deadline_dt(deadline)
            .dropoff_ready_dt(deadline + Duration::seconds(1))
            .build()
            .unwrap_err();
        assert_eq!(error.kind(), "pickup_deadline_dt");
        assert_eq!(error.field(), "dropoff_ready_dt");
    }

    #[test]
    fn test_dropoff_window_shorter_than_twenty_minutes() {
        let t = now();
        let error = TimeWindows::builder()
            .pickup_ready_dt(t)
            .pickup_deadline_dt(t + Duration::minutes(10))
            .dropoff_ready_dt(t)
            .dropoff_deadline_dt(t - Duration::minutes(19))
            .build()
            .unwrap_err();
        assert_eq!(error.kind(), "dropoff_ready_dt");
    }

    #[test]
    fn test_dropoff_deadline_before_pickup_deadline() {
        let t = now();
        let error = TimeWindows::builder()
            .pickup_ready_dt(t)
            .pickup_deadline_dt(t + Duration::minutes(60))
            .dropoff_ready_dt(t)
            .dropoff_deadline_dt(t + Duration::minutes(20))
            .build()
            .unwrap_err();
        assert_eq!(error.kind(), "pickup_deadline_dt");
        assert_eq!(error.field(), "dropoff_deadline_dt");
    }

    #[test]
    fn test_full_valid_chain() {
        let t = now();
        let windows = TimeWindows::builder()
            .pickup_ready_dt(t)
            .pickup_deadline_dt(t + Duration::minutes(10))
            .dropoff_ready_dt(t)
            .dropoff_deadline_dt(t + Duration::minutes(20))
            .build();
        assert!(windows.is_ok());
    }

    #[test]
    fn test_dropoff_deadline_rules_need_pickup_deadline() {
        let t = now();
        let windows = TimeWindows::builder()
            .dropoff_ready_dt(t)
            .dropoff_deadline_dt(t + Duration::minutes(1))
            .build();
        assert!(windows.is_ok());
    }

    #[test]
    fn test_comparisons_span_offsets() {
        let ready = DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00").unwrap();
        let deadline = DateTime::parse_from_rfc3339("2024-05-01T06:09:00-06:00").unwrap();
        let error = TimeWindows::builder()
            .pickup_ready_dt(ready)
            .pickup_deadline_dt(deadline)
            .build()
            .unwrap_err();
        assert_eq!(error.kind(), "pickup_ready_dt");
    }

    #[test]
    fn test_deserialization_runs_pipeline() {
        let windows: TimeWindows = serde_json::from_value(json!({
            "pickup_ready_dt": "2024-05-01T12:00:00Z",
            "pickup_deadline_dt": "2024-05-01T12:10:00Z"
        }))
        .unwrap();
        assert!(windows.pickup_deadline_dt().is_some());

        let result: Result<TimeWindows, _> = serde_json::from_value(json!({
            "pickup_ready_dt": "2024-05-01T12:00:00Z",
            "pickup_deadline_dt": "2024-05-01T12:09:00Z"
        }));
        let error = ValidationError::from_de_error(&result.unwrap_err());
        assert_eq!(error.field(), "pickup_deadline_dt");
        assert_eq!(error.kind(), "pickup_ready_dt");
    }

    #[test]
    fn test_naive_timestamps_are_rejected() {
        let result: Result<TimeWindows, _> =
            serde_json::from_value(json!({"pickup_ready_dt": "2024-05-01T12:00:00"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_omits_unset_fields() {
        let t = now();
        let windows = TimeWindows::builder().pickup_ready_dt(t).build().unwrap();
        let value = serde_json::to_value(windows).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        let emitted = object["pickup_ready_dt"].as_str().unwrap();
        assert_eq!(DateTime::parse_from_rfc3339(emitted).unwrap(), t);
    }
}
