//! OAuth 2.0 client credentials flow for Uber Direct.
//!
//! - [`get_access_token`]: Exchange a client id and secret for a bearer token
//! - [`request_access_token`]: Same exchange, returning the full [`AccessTokenResponse`]
//! - [`OAuthError`]: Failures of the exchange
//!
//! The token endpoint is `{auth_host}/oauth/{version}/token` and the
//! requested scope is always `eats.deliveries`.

mod client_credentials;
mod error;

pub use client_credentials::{
    get_access_token, request_access_token, token_url, AccessTokenResponse, DELIVERIES_SCOPE,
};
pub use error::OAuthError;
