//! The `deliveries` resource.

use crate::clients::HttpClient;
use crate::models::{
    Delivery, DeliveryCreateRequest, DeliveryUpdateRequest, ProofOfDeliveryRequest,
    ProofOfDeliveryResponse,
};
use crate::resources::{decode, encode, ApiError};

const RESOURCE: &str = "Delivery";
const PROOF_RESOURCE: &str = "ProofOfDelivery";

/// Handle for delivery operations.
///
/// Obtained from [`UberDirect::deliveries`](crate::resources::UberDirect::deliveries).
/// Delivery ids are percent-encoded into the path.
#[derive(Clone, Debug)]
pub struct Deliveries {
    client: HttpClient,
}

impl Deliveries {
    /// Creates a handle over an existing executor.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Creates a delivery.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything if the
    /// request is invalid, [`ApiError::Http`] if the call fails, and
    /// [`ApiError::Decode`] if the response is not a delivery.
    pub async fn create_delivery(
        &self,
        request: &DeliveryCreateRequest,
    ) -> Result<Delivery, ApiError> {
        let body = encode(RESOURCE, request)?;
        tracing::debug!(items = request.manifest_items.len(), "Creating delivery");
        let response = self.client.post(["deliveries"], body).await?;
        decode(RESOURCE, response)
    }

    /// Fetches a delivery by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the call fails and [`ApiError::Decode`]
    /// if the response is not a delivery.
    pub async fn get_delivery(&self, delivery_id: &str) -> Result<Delivery, ApiError> {
        tracing::debug!(delivery_id, "Fetching delivery");
        let response = self.client.get(["deliveries", delivery_id], None).await?;
        decode(RESOURCE, response)
    }

    /// Updates the mutable fields of a delivery.
    ///
    /// # Errors
    ///
    /// Same as [`Deliveries::create_delivery`].
    pub async fn update_delivery(
        &self,
        delivery_id: &str,
        request: &DeliveryUpdateRequest,
    ) -> Result<Delivery, ApiError> {
        let body = encode(RESOURCE, request)?;
        tracing::debug!(delivery_id, "Updating delivery");
        let response = self.client.post(["deliveries", delivery_id], body).await?;
        decode(RESOURCE, response)
    }

    /// Cancels a delivery.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the call fails and [`ApiError::Decode`]
    /// if the response is not a delivery.
    pub async fn cancel_delivery(&self, delivery_id: &str) -> Result<Delivery, ApiError> {
        tracing::debug!(delivery_id, "Canceling delivery");
        let response = self
            .client
            .post(
                ["deliveries", delivery_id, "cancel"],
                serde_json::Value::Object(serde_json::Map::new()),
            )
            .await?;
        decode(RESOURCE, response)
    }

    /// Retrieves the proof collected at a waypoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the call fails and [`ApiError::Decode`]
    /// if the document is missing or not valid base64.
    pub async fn proof_of_delivery(
        &self,
        delivery_id: &str,
        request: &ProofOfDeliveryRequest,
    ) -> Result<ProofOfDeliveryResponse, ApiError> {
        let body = encode(PROOF_RESOURCE, request)?;
        tracing::debug!(delivery_id, "Fetching proof of delivery");
        let response = self
            .client
            .post(["deliveries", delivery_id, "proof-of-delivery"], body)
            .await?;
        decode(PROOF_RESOURCE, response)
    }
}
