//! HTTP client for Uber Direct API communication.
//!
//! This module provides the [`HttpClient`] type: the request executor that
//! builds URLs, attaches bearer authentication, retries transient failures
//! and classifies errors.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::errors::{
    HttpError, HttpResponseError, InvalidJsonError, MaxHttpRetriesExceededError,
};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::config::UberDirectConfig;
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request executor for the Uber Direct API.
///
/// The client handles:
/// - Resource URL construction under `{api_host}/{version}/customers/{customer_id}`
/// - Default headers including User-Agent
/// - A bearer token resolved on every attempt, so refreshed tokens are used on retries
/// - Capped exponential backoff for retriable status codes
///
/// Cloning is cheap: the configuration sits behind an `Arc` and the
/// underlying `reqwest::Client` is a pooled handle.
///
/// # Example
///
/// ```rust,ignore
/// use uberdirect::{UberDirectConfig, CustomerId};
/// use uberdirect::clients::HttpClient;
///
/// let config = UberDirectConfig::builder()
///     .customer_id(CustomerId::new("cus_123").unwrap())
///     .access_token("token")
///     .build()?;
///
/// let client = HttpClient::new(config)?;
/// let delivery = client.get(["deliveries", "del_123"], None).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Shared, immutable configuration.
    config: Arc<UberDirectConfig>,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new executor from the given configuration.
    ///
    /// Reuses the shared `reqwest::Client` from the configuration when one
    /// was injected, otherwise creates a new one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the transport cannot be created.
    pub fn new(config: UberDirectConfig) -> Result<Self, ConfigError> {
        Self::from_shared(Arc::new(config))
    }

    /// Creates a new executor sharing an existing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the transport cannot be created.
    pub fn from_shared(config: Arc<UberDirectConfig>) -> Result<Self, ConfigError> {
        let client = match config.http_client() {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .use_rustls_tls()
                .build()
                .map_err(|e| ConfigError::HttpClientBuild {
                    reason: e.to_string(),
                })?,
        };

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}UberDirect Rust Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Ok(Self {
            client,
            config,
            default_headers,
        })
    }

    /// Returns the configuration used by this client.
    #[must_use]
    pub fn config(&self) -> &UberDirectConfig {
        &self.config
    }

    /// Returns the versioned, customer-scoped resource root.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL the request will be sent to.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        format!("{}/{}", self.base_url(), request.path())
    }

    /// Sends a GET request to the given resource path.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get<I, S>(
        &self,
        segments: I,
        query: Option<HashMap<String, String>>,
    ) -> Result<serde_json::Value, HttpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = HttpRequest::builder(HttpMethod::Get, segments);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        self.request(builder.build()?).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post<I, S>(
        &self,
        segments: I,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, HttpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_with_body(HttpMethod::Post, segments, body).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put<I, S>(
        &self,
        segments: I,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, HttpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_with_body(HttpMethod::Put, segments, body).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn patch<I, S>(
        &self,
        segments: I,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, HttpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_with_body(HttpMethod::Patch, segments, body).await
    }

    /// Sends a DELETE request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete<I, S>(
        &self,
        segments: I,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, HttpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = HttpRequest::builder(HttpMethod::Delete, segments);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        self.request(builder.build()?).await
    }

    async fn send_with_body<I, S>(
        &self,
        method: HttpMethod,
        segments: I,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, HttpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = HttpRequest::builder(method, segments).body(body).build()?;
        self.request(request).await
    }

    /// Sends an HTTP request and returns the parsed JSON body.
    ///
    /// The access token is resolved and attached on every attempt. A non-2xx
    /// response whose status is in the retriable set is retried after
    /// `min(base * 2^attempt, cap)`; any other non-2xx status fails at once.
    /// Transport failures are never retried.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-retriable non-2xx response received (`Response`)
    /// - Retriable responses persist past the retry budget (`MaxRetries`)
    /// - A 2xx body is not valid JSON (`Decode`)
    pub async fn request(&self, request: HttpRequest) -> Result<serde_json::Value, HttpError> {
        request.verify()?;

        let url = self.url_for(&request);
        let policy = self.config.retry_policy();

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut attempt: u32 = 0;
        loop {
            let mut req_builder = self
                .client
                .request(request.http_method.as_reqwest(), &url);

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            // Resolved per attempt so a supplier can hand out a refreshed token
            let token = self.config.access_token().resolve();
            req_builder = req_builder.header("Authorization", format!("Bearer {token}"));

            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }
            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }
            if let Some(timeout) = self.config.timeout() {
                req_builder = req_builder.timeout(timeout);
            }

            tracing::debug!(
                method = %request.http_method,
                url = %url,
                attempt,
                "Sending Uber Direct API request"
            );

            let res = req_builder.send().await?;
            let code = res.status().as_u16();
            let body_text = res.text().await?;

            if (200..300).contains(&code) {
                tracing::debug!(status = code, url = %url, "Uber Direct API request succeeded");
                return Self::parse_success_body(code, body_text);
            }

            let body = serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }));
            let message = Self::serialize_error(&body);

            if !policy.is_retriable(code) {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    body,
                }));
            }

            if attempt >= policy.max_retries() {
                tracing::warn!(
                    status = code,
                    tries = attempt + 1,
                    url = %url,
                    "Retries exhausted for Uber Direct API request"
                );
                if policy.max_retries() == 0 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message,
                        body,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: attempt + 1,
                    message,
                    body,
                }));
            }

            let delay = policy.delay_for(attempt);
            tracing::warn!(
                status = code,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                url = %url,
                "Retriable response from Uber Direct API, backing off"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn parse_success_body(code: u16, body_text: String) -> Result<serde_json::Value, HttpError> {
        if body_text.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        serde_json::from_str(&body_text).map_err(|source| {
            HttpError::Decode(InvalidJsonError {
                code,
                body: body_text,
                source,
            })
        })
    }

    /// Serializes the provider's error fields to compact JSON.
    fn serialize_error(body: &serde_json::Value) -> String {
        let mut error_body = serde_json::Map::new();
        for key in ["code", "message", "metadata", "error", "error_description"] {
            if let Some(value) = body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }

        if error_body.is_empty() {
            if let Some(raw) = body.get("raw_body").and_then(serde_json::Value::as_str) {
                return raw.to_string();
            }
            return body.to_string();
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CustomerId, HostUrl};
    use serde_json::json;

    fn create_test_config() -> UberDirectConfig {
        UberDirectConfig::builder()
            .customer_id(CustomerId::new("cus_test").unwrap())
            .access_token("test-access-token")
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_uses_customer_scoped_base() {
        let client = HttpClient::new(create_test_config()).unwrap();
        assert_eq!(
            client.base_url(),
            "https://api.uber.com/v1/customers/cus_test"
        );
    }

    #[test]
    fn test_url_for_joins_segments() {
        let client = HttpClient::new(create_test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Post, ["deliveries", "del_1", "cancel"])
            .body(json!({}))
            .build()
            .unwrap();

        assert_eq!(
            client.url_for(&request),
            "https://api.uber.com/v1/customers/cus_test/deliveries/del_1/cancel"
        );
    }

    #[test]
    fn test_api_host_override() {
        let config = UberDirectConfig::builder()
            .customer_id(CustomerId::new("cus_test").unwrap())
            .access_token("t")
            .api_host(HostUrl::new("http://127.0.0.1:1234").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:1234/v1/customers/cus_test");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(create_test_config()).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("UberDirect Rust Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = UberDirectConfig::builder()
            .customer_id(CustomerId::new("cus_test").unwrap())
            .access_token("t")
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(config).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_token_is_not_a_default_header() {
        let client = HttpClient::new(create_test_config()).unwrap();
        assert!(client.default_headers().get("Authorization").is_none());
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_serialize_error_picks_provider_fields() {
        let body = json!({
            "code": "invalid_params",
            "message": "The parameters of your request were invalid.",
            "kind": "error",
            "metadata": {"pickup_phone_number": "Invalid phone number"}
        });
        let message = HttpClient::serialize_error(&body);
        let parsed: serde_json::Value = serde_json::from_str(&message).unwrap();
        assert_eq!(parsed["code"], "invalid_params");
        assert!(parsed.get("kind").is_none());
        assert!(parsed.get("metadata").is_some());
    }

    #[test]
    fn test_serialize_error_falls_back_to_raw_body() {
        let body = json!({"raw_body": "<html>Bad Gateway</html>"});
        assert_eq!(
            HttpClient::serialize_error(&body),
            "<html>Bad Gateway</html>"
        );
    }

    #[test]
    fn test_empty_success_body_parses_as_empty_object() {
        let value = HttpClient::parse_success_body(204, String::new()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let result = HttpClient::parse_success_body(200, "{not json".to_string());
        assert!(matches!(result, Err(HttpError::Decode(e)) if e.code == 200));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
