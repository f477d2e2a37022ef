//! OAuth 2.0 Client Credentials Grant for Uber Direct.
//!
//! Exchanges a client id and secret for a bearer token carrying the
//! `eats.deliveries` scope. The call is stateless: nothing is cached and no
//! refresh is scheduled. Callers that need refresh wrap this in an
//! [`AccessToken::supplier`](crate::AccessToken::supplier) of their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use uberdirect::{ClientId, ClientSecret, HostUrl, OAuthVersion};
//! use uberdirect::auth::oauth::get_access_token;
//! use uberdirect::config::DEFAULT_AUTH_HOST;
//!
//! let token = get_access_token(
//!     &HostUrl::new(DEFAULT_AUTH_HOST)?,
//!     &OAuthVersion::V2,
//!     &ClientId::new("client-id")?,
//!     &ClientSecret::new("client-secret")?,
//! )
//! .await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::auth::oauth::OAuthError;
use crate::config::{ClientId, ClientSecret, HostUrl, OAuthVersion};

/// Grant type for client credentials.
const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Scope requested for delivery management.
pub const DELIVERIES_SCOPE: &str = "eats.deliveries";

/// Form body for the token request.
#[derive(Debug, Serialize)]
struct ClientCredentialsRequest<'a> {
    scope: &'a str,
    client_id: &'a str,
    grant_type: &'a str,
    client_secret: &'a str,
}

/// Token endpoint response.
///
/// Only `access_token` is required for success; the other fields are kept
/// when the endpoint sends them.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AccessTokenResponse {
    /// The bearer token.
    pub access_token: String,
    /// Token type, normally `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Granted scope.
    #[serde(default)]
    pub scope: Option<String>,
}

/// Returns the token endpoint URL: `{auth_host}/oauth/{version}/token`.
#[must_use]
pub fn token_url(auth_host: &HostUrl, version: &OAuthVersion) -> String {
    format!("{}/oauth/{version}/token", auth_host.as_ref())
}

/// Requests a token and returns the full token response.
///
/// # Errors
///
/// - [`OAuthError::TokenRequestFailed`] with status `0` if the endpoint cannot be reached
/// - [`OAuthError::TokenRequestFailed`] with the response status on any non-2xx answer
/// - [`OAuthError::MissingAccessToken`] if a 2xx body lacks `access_token`
pub async fn request_access_token(
    auth_host: &HostUrl,
    version: &OAuthVersion,
    client_id: &ClientId,
    client_secret: &ClientSecret,
) -> Result<AccessTokenResponse, OAuthError> {
    let url = token_url(auth_host, version);

    let form = ClientCredentialsRequest {
        scope: DELIVERIES_SCOPE,
        client_id: client_id.as_ref(),
        grant_type: CLIENT_CREDENTIALS_GRANT_TYPE,
        client_secret: client_secret.as_ref(),
    };

    tracing::debug!(url = %url, "Requesting Uber Direct access token");

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .form(&form)
        .send()
        .await
        .map_err(|e| OAuthError::TokenRequestFailed {
            status: 0,
            message: format!("Network error: {e}"),
        })?;

    let status = response.status().as_u16();

    if !response.status().is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(OAuthError::TokenRequestFailed {
            status,
            message: error_body,
        });
    }

    let body: serde_json::Value =
        response
            .json()
            .await
            .map_err(|e| OAuthError::TokenRequestFailed {
                status,
                message: format!("Failed to parse token response: {e}"),
            })?;

    if body.get("access_token").and_then(serde_json::Value::as_str).is_none() {
        return Err(OAuthError::MissingAccessToken);
    }

    let token_response: AccessTokenResponse =
        serde_json::from_value(body).map_err(|e| OAuthError::TokenRequestFailed {
            status,
            message: format!("Failed to parse token response: {e}"),
        })?;

    tracing::debug!(url = %url, expires_in = ?token_response.expires_in, "Access token acquired");

    Ok(token_response)
}

/// Requests a token and returns only the bearer string.
///
/// # Errors
///
/// See [`request_access_token`].
pub async fn get_access_token(
    auth_host: &HostUrl,
    version: &OAuthVersion,
    client_id: &ClientId,
    client_secret: &ClientSecret,
) -> Result<String, OAuthError> {
    request_access_token(auth_host, version, client_id, client_secret)
        .await
        .map(|response| response.access_token)
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientCredentialsRequest<'_>>();
    assert_send_sync::<AccessTokenResponse>();
};
