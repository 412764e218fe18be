//! Declarative HTTP request construction
//!
//! Requests are assembled through [`RequestBuilder`] into an immutable
//! [`RequestSpec`]: method, fully-formed URL (percent-encoded path segments,
//! ordered query string), headers, and one of the supported body kinds.
//! Construction is pure; the spec is consumed exactly once by the transport.

use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use crate::multipart;
use crate::{ClientError, Result};

/// HTTP method for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// PUT request
    Put,
    /// PATCH request
    Patch,
    /// DELETE request
    Delete,
}

impl HttpMethod {
    /// Get the method name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One named segment of a `multipart/form-data` body
///
/// Header order and part order are significant and preserved through
/// encoding. Every part must carry a `Content-Disposition` header naming
/// its form field; [`RequestBuilder::multipart_body`] enforces this before
/// the encoder runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    /// Part headers, in encoding order
    pub headers: Vec<(String, String)>,
    /// Raw payload bytes
    pub body: Vec<u8>,
}

impl MultipartPart {
    /// Create a part from headers and a byte payload
    pub fn new<I, K, V>(headers: I, body: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            body,
        }
    }

    /// Look up a header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Request body variants
#[derive(Debug, Clone)]
pub enum Body {
    /// No body
    None,
    /// JSON-encoded bytes (`application/json`)
    Json(Vec<u8>),
    /// URL-encoded bytes (`application/x-www-form-urlencoded`)
    Form(Vec<u8>),
    /// Multipart parts with the boundary chosen at build time
    Multipart {
        /// Ordered parts
        parts: Vec<MultipartPart>,
        /// Random boundary token, fresh per request
        boundary: String,
    },
}

/// Immutable, fully-formed request ready for the transport
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// Complete request URL including path and query
    pub url: Url,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: Body,
}

/// Builder for [`RequestSpec`]
///
/// # Examples
/// ```
/// use toot_client::request::{HttpMethod, RequestBuilder};
///
/// let spec = RequestBuilder::new("https://mastodon.example")
///     .method(HttpMethod::Get)
///     .path(["api", "v1", "instance"])
///     .query("limit", "20")
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.url.as_str(), "https://mastodon.example/api/v1/instance?limit=20");
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    method: HttpMethod,
    path: Vec<String>,
    headers: HashMap<String, String>,
    query: Vec<(String, String)>,
    body: Body,
}

impl RequestBuilder {
    /// Start a builder against a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            method: HttpMethod::Get,
            path: Vec::new(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: Body::None,
        }
    }

    /// Set the HTTP method
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Append path segments, each percent-encoded and joined with `/`
    pub fn path<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path.extend(segments.into_iter().map(Into::into));
        self
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter; order is preserved in the final URL
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a JSON body serialized from `value`
    pub fn json_body<T: Serialize>(mut self, value: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| ClientError::InvalidRequest(format!("failed to serialize JSON body: {e}")))?;
        self.body = Body::Json(bytes);
        Ok(self)
    }

    /// Set a URL-encoded form body from key/value pairs
    pub fn form_body<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        self.body = Body::Form(serializer.finish().into_bytes());
        self
    }

    /// Set a multipart body
    ///
    /// Validates that every part carries a `Content-Disposition` header and
    /// picks a fresh random boundary, so the encoder can assume well-formed
    /// input and the boundary cannot collide with payload content.
    pub fn multipart_body(mut self, parts: Vec<MultipartPart>) -> Result<Self> {
        for (index, part) in parts.iter().enumerate() {
            if part.header("Content-Disposition").is_none() {
                return Err(ClientError::Encoding(format!(
                    "multipart part {index} is missing a Content-Disposition header"
                )));
            }
        }
        let boundary = multipart::random_boundary();
        self.body = Body::Multipart { parts, boundary };
        Ok(self)
    }

    /// Produce the immutable [`RequestSpec`]
    ///
    /// Fails with [`ClientError::InvalidRequest`] if the URL cannot be formed.
    pub fn build(self) -> Result<RequestSpec> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::InvalidRequest("base URL is empty".to_string()));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("invalid base URL: {e}")))?;

        if self.path.iter().any(|segment| segment.is_empty()) {
            return Err(ClientError::InvalidRequest("empty path segment".to_string()));
        }

        if !self.path.is_empty() {
            url.path_segments_mut()
                .map_err(|_| {
                    ClientError::InvalidRequest("base URL cannot take path segments".to_string())
                })?
                .pop_if_empty()
                .extend(&self.path);
        }

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(RequestSpec {
            url,
            method: self.method,
            headers: self.headers,
            body: self.body,
        })
    }
}
