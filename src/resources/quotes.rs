//! The `delivery_quotes` resource.

use crate::clients::HttpClient;
use crate::models::{QuoteRequest, QuoteResponse};
use crate::resources::{decode, encode, ApiError};

const RESOURCE: &str = "Quote";

/// Handle for quote operations.
///
/// Obtained from [`UberDirect::quotes`](crate::resources::UberDirect::quotes).
#[derive(Clone, Debug)]
pub struct Quotes {
    client: HttpClient,
}

impl Quotes {
    /// Creates a handle over an existing executor.
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Prices a delivery between two addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything if the
    /// request is invalid, [`ApiError::Http`] if the call fails, and
    /// [`ApiError::Decode`] if the response is not a quote.
    pub async fn create_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, ApiError> {
        let body = encode(RESOURCE, request)?;
        tracing::debug!("Creating delivery quote");
        let response = self.client.post(["delivery_quotes"], body).await?;
        decode(RESOURCE, response)
    }
}
