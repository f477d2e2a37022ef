//! Proof-of-delivery request and response records.

use base64::prelude::*;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::constants::{ProofOfDeliveryType, ProofOfDeliveryWaypoint};
use crate::validation::Validate;

/// Body of `POST deliveries/{id}/proof-of-delivery`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProofOfDeliveryRequest {
    /// Waypoint at which the proof was collected.
    pub waypoint: ProofOfDeliveryWaypoint,
    /// Kind of proof.
    #[serde(rename = "type")]
    pub kind: ProofOfDeliveryType,
}

impl ProofOfDeliveryRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(waypoint: ProofOfDeliveryWaypoint, kind: ProofOfDeliveryType) -> Self {
        Self { waypoint, kind }
    }
}

/// The proof document, decoded from base64.
///
/// # Example
///
/// ```rust
/// use uberdirect::models::ProofOfDeliveryResponse;
///
/// let response: ProofOfDeliveryResponse =
///     serde_json::from_str(r#"{"document": "aGVsbG8="}"#).unwrap();
/// assert_eq!(response.document, b"hello");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfDeliveryResponse {
    /// Raw document bytes, usually an image.
    #[serde(serialize_with = "encode_document", deserialize_with = "decode_document")]
    pub document: Vec<u8>,
}

fn encode_document<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
}

fn decode_document<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    BASE64_STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| de::Error::custom(format!("invalid base64 document: {e}")))
}
