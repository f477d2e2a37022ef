//! HTTP request types for the Uber Direct SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests against the customer-scoped API root.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods supported by the executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and triggering actions.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    pub(crate) const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// An HTTP request to be sent to the Uber Direct API.
///
/// The resource path is kept as individual segments; each segment is
/// percent-encoded when the URL is built.
///
/// # Example
///
/// ```rust
/// use uberdirect::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, ["deliveries", "del_1", "cancel"])
///     .body(json!({}))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path(), "deliveries/del_1/cancel");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// Path segments below the customer-scoped root.
    pub segments: Vec<String>,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder<I, S>(method: HttpMethod, segments: I) -> HttpRequestBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HttpRequestBuilder::new(method, segments)
    }

    /// Returns the percent-encoded path joined with `/`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - no path segment is given, or a segment is empty
    /// - `http_method` is `Post`, `Put` or `Patch` but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.segments.is_empty() || self.segments.iter().any(String::is_empty) {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.segments.join("/"),
            });
        }

        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    segments: Vec<String>,
    body: Option<serde_json::Value>,
    query: Option<HashMap<String, String>>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new<I, S>(method: HttpMethod, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            http_method: method,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
            query: None,
            extra_headers: None,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            segments: self.segments,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
