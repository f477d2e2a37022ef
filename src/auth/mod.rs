//! Authentication for the Uber Direct SDK.
//!
//! Every API call carries `Authorization: Bearer <token>`. Tokens come from
//! the OAuth client credentials grant in [`oauth`]; how they are stored and
//! refreshed is up to the caller, typically through
//! [`AccessToken::supplier`](crate::AccessToken::supplier).
//!
//! # Example
//!
//! ```rust,ignore
//! use uberdirect::auth::oauth::get_access_token;
//! use uberdirect::{AccessToken, ClientId, ClientSecret, HostUrl, OAuthVersion};
//!
//! let token = get_access_token(
//!     &HostUrl::new("https://auth.uber.com")?,
//!     &OAuthVersion::V2,
//!     &ClientId::new("client-id")?,
//!     &ClientSecret::new("client-secret")?,
//! )
//! .await?;
//!
//! let access_token = AccessToken::from(token);
//! ```

pub mod oauth;
