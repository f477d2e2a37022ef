//! Delivery quote request and response records.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::fields::{Latitude, Longitude, Money, PhoneNumber, StructuredAddress, TimeWindows};
use crate::validation::{non_negative, Validate};

/// Body of `POST delivery_quotes`.
///
/// # Example
///
/// ```rust
/// use uberdirect::fields::StructuredAddress;
/// use uberdirect::models::QuoteRequest;
///
/// let pickup = StructuredAddress::new(["Av. Reforma 222"], "CDMX", "CDMX", "06600", "MX").unwrap();
/// let dropoff = StructuredAddress::new(["Durango 10"], "CDMX", "CDMX", "06700", "MX").unwrap();
/// let request = QuoteRequest::new(pickup, "5512345678".parse().unwrap(), dropoff);
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["pickup_phone_number"], "+525512345678");
/// assert!(body.get("dropoff_phone_number").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    /// Pickup address.
    pub pickup_address: StructuredAddress,
    /// Pickup latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_latitude: Option<Latitude>,
    /// Pickup longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_longitude: Option<Longitude>,
    /// Store contact at pickup.
    pub pickup_phone_number: PhoneNumber,
    /// Dropoff address.
    pub dropoff_address: StructuredAddress,
    /// Dropoff latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_latitude: Option<Latitude>,
    /// Dropoff longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_longitude: Option<Longitude>,
    /// Recipient contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_phone_number: Option<PhoneNumber>,
    /// Pickup and dropoff windows.
    #[serde(flatten)]
    pub time_windows: TimeWindows,
    /// Value of the items being delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "non_negative")]
    pub manifest_total_value: Option<Money>,
    /// Partner reference for the store. Must match the one used on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_store_id: Option<String>,
}

impl QuoteRequest {
    /// Creates a request with the required fields and no optional ones.
    #[must_use]
    pub fn new(
        pickup_address: StructuredAddress,
        pickup_phone_number: PhoneNumber,
        dropoff_address: StructuredAddress,
    ) -> Self {
        Self {
            pickup_address,
            pickup_latitude: None,
            pickup_longitude: None,
            pickup_phone_number,
            dropoff_address,
            dropoff_latitude: None,
            dropoff_longitude: None,
            dropoff_phone_number: None,
            time_windows: TimeWindows::default(),
            manifest_total_value: None,
            external_store_id: None,
        }
    }
}

/// A priced quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Quote identifier, prefixed `dqt_`.
    pub id: String,
    /// Object type, usually `delivery_quote`.
    pub kind: String,
    /// When the quote was created.
    pub created: DateTime<FixedOffset>,
    /// After this instant the quote is no longer accepted.
    pub expires: DateTime<FixedOffset>,
    /// Amount charged if a delivery is created from this quote.
    pub fee: Money,
    /// Upper-case ISO currency code.
    pub currency_type: String,
    /// Estimated dropoff.
    pub dropoff_eta: DateTime<FixedOffset>,
    /// Estimated minutes until dropoff.
    pub duration: i64,
    /// Estimated minutes until a courier reaches pickup.
    pub pickup_duration: i64,
    /// End of the dropoff window.
    pub dropoff_deadline: DateTime<FixedOffset>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{from_value, ValidationError};
    use chrono::Duration;
    use serde_json::json;

    fn address() -> StructuredAddress {
        StructuredAddress::new(["Street 1"], "CDMX", "VZ", "99999", "MX").unwrap()
    }

    fn request() -> QuoteRequest {
        QuoteRequest::new(address(), "5512345678".parse().unwrap(), address())
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let body = serde_json::to_value(request()).unwrap();
        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["dropoff_address", "pickup_address", "pickup_phone_number"]
        );
        assert_eq!(
            body["pickup_address"],
            json!(address().to_json_string())
        );
    }

    #[test]
    fn test_time_windows_are_flattened() {
        let t = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z").unwrap();
        let mut request = request();
        request.time_windows = TimeWindows::builder()
            .pickup_ready_dt(t)
            .pickup_deadline_dt(t + Duration::minutes(15))
            .build()
            .unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("pickup_ready_dt").is_some());
        assert!(body.get("pickup_deadline_dt").is_some());
        assert!(body.get("dropoff_ready_dt").is_none());
        assert!(body.get("time_windows").is_none());

        let parsed: QuoteRequest = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.time_windows, request.time_windows);
    }

    #[test]
    fn test_negative_manifest_value_fails() {
        let mut request = request();
        request.manifest_total_value = Some(Money::from_cents(-1));
        let error = ValidationError::from(request.validate().unwrap_err());
        assert_eq!(error.field(), "manifest_total_value");
        assert_eq!(error.kind(), "greater_than_equal");

        request.manifest_total_value = Some(Money::ZERO);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_parsing_reports_window_field_and_kind() {
        let mut body = serde_json::to_value(request()).unwrap();
        body["pickup_ready_dt"] = json!("2024-05-01T12:00:00Z");
        body["pickup_deadline_dt"] = json!("2024-05-01T12:09:00Z");

        let error = from_value::<QuoteRequest>(body).unwrap_err();
        assert_eq!(error.field(), "pickup_deadline_dt");
        assert_eq!(error.kind(), "pickup_ready_dt");
    }

    #[test]
    fn test_parsing_reports_coordinate_field_and_kind() {
        let mut body = serde_json::to_value(request()).unwrap();
        body["pickup_latitude"] = json!(91.0);

        let error = from_value::<QuoteRequest>(body).unwrap_err();
        assert_eq!(error.field(), "pickup_latitude");
        assert_eq!(error.kind(), "out_of_range");
    }

    #[test]
    fn test_parsing_reports_money_field_and_kind() {
        let mut body = serde_json::to_value(request()).unwrap();
        body["manifest_total_value"] = json!("10.999");

        let error = from_value::<QuoteRequest>(body).unwrap_err();
        assert_eq!(error.field(), "manifest_total_value");
        assert_eq!(error.kind(), "decimal_places");
    }

    #[test]
    fn test_response_reads_cents() {
        let response: QuoteResponse = serde_json::from_value(json!({
            "id": "dqt_123",
            "kind": "delivery_quote",
            "created": "2024-05-01T12:00:00Z",
            "expires": "2024-05-01T12:15:00Z",
            "fee": 5000,
            "currency_type": "MXN",
            "dropoff_eta": "2024-05-01T12:45:00Z",
            "duration": 45,
            "pickup_duration": 10,
            "dropoff_deadline": "2024-05-01T13:30:00Z"
        }))
        .unwrap();
        assert_eq!(response.fee, Money::from_cents(5000));
        assert_eq!(response.duration, 45);
    }
}
