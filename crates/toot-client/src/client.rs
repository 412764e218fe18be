//! Client configuration and the transport/decoder
//!
//! [`TootClient`] executes a built [`RequestSpec`] over HTTP and decodes the
//! response into a typed value. Decoding consults the flavour override table
//! first, so server dialect quirks are handled as named branches rather than
//! silent special cases. Transport failures surface as
//! [`ClientError::Network`] and are never retried here.

use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::flavour::{decode_override, DecodeOverride, EndpointClass, Flavour};
use crate::multipart;
use crate::request::{Body, HttpMethod, RequestBuilder, RequestSpec};
use crate::{ClientError, Result};

/// Configuration for [`TootClient`]
#[derive(Debug, Clone)]
pub struct TootClientConfig {
    /// Base server URL (e.g., "https://mastodon.social")
    pub base_url: String,
    /// Server flavour, drives decode quirks
    pub flavour: Flavour,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
    /// Bearer token attached to every request when present
    pub access_token: Option<String>,
}

impl Default for TootClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mastodon.social".to_string(),
            flavour: Flavour::Mastodon,
            timeout: Duration::from_secs(30),
            user_agent: format!("Tootkit/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
            access_token: None,
        }
    }
}

impl TootClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the server flavour
    pub fn with_flavour(mut self, flavour: Flavour) -> Self {
        self.flavour = flavour;
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the bearer access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Raw transport response: status, headers, body bytes
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Check whether the status is in the success range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client for one server instance
///
/// Cheap to clone; clones share the underlying connection pool. The client
/// is an explicit value passed to every operation that needs it - there is
/// no process-global session.
///
/// # Examples
/// ```rust,no_run
/// use toot_client::{TootClient, TootClientConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = TootClientConfig::new("https://mastodon.social")
///         .with_access_token("token");
///     let client = TootClient::new(config)?;
///
///     let instance = client.get_instance_info().await?;
///     println!("connected to {}", instance.title);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TootClient {
    /// HTTP client
    http: ReqwestClient,
    /// Configuration
    config: TootClientConfig,
}

impl TootClient {
    /// Create a new client
    pub fn new(config: TootClientConfig) -> Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { http, config })
    }

    /// Start a request builder against this client's base URL
    pub fn request(&self, method: HttpMethod) -> RequestBuilder {
        RequestBuilder::new(&self.config.base_url).method(method)
    }

    /// Execute a request spec over HTTP
    ///
    /// Attaches the configured default headers and bearer token, encodes the
    /// body, and returns the raw status/headers/bytes. Fails with
    /// [`ClientError::Network`] on transport errors, propagated verbatim.
    pub async fn send(&self, spec: RequestSpec) -> Result<HttpResponse> {
        let RequestSpec { url, method, headers, body } = spec;

        tracing::debug!(method = method.as_str(), url = %url, "sending request");

        let method = match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut req = self.http.request(method, url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(token) = &self.config.access_token {
            req = req.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        for (key, value) in &headers {
            req = req.header(key.as_str(), value.as_str());
        }

        req = match body {
            Body::None => req,
            Body::Json(bytes) => req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes),
            Body::Form(bytes) => req
                .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(bytes),
            Body::Multipart { parts, boundary } => req
                .header(
                    reqwest::header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(multipart::encode(&parts, &boundary)),
        };

        let response = req.send().await?;

        let status = response.status().as_u16();
        let mut response_headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                response_headers.insert(key.to_string(), value.to_string());
            }
        }
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, headers: response_headers, body })
    }

    /// Decode response bytes into a target type
    ///
    /// Fails with [`ClientError::Decode`] carrying the raw bytes.
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        serde_json::from_slice(body)
            .map_err(|source| ClientError::Decode { source, body: body.to_vec() })
    }

    /// Execute a request and decode a successful response
    pub async fn fetch<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T> {
        let response = self.send(spec).await?;
        self.expect_success(&response)?;
        self.decode(&response.body)
    }

    /// Execute a request and decode, applying the flavour override table
    ///
    /// When the table maps this (flavour, endpoint class, status) to
    /// [`DecodeOverride::NoContentYet`] the result is `Ok(None)` instead of
    /// an attempted decode. Flavours without an override decode normally.
    pub async fn fetch_with_class<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
        class: EndpointClass,
    ) -> Result<Option<T>> {
        let response = self.send(spec).await?;

        if let Some(DecodeOverride::NoContentYet) =
            decode_override(self.config.flavour, class, response.status)
        {
            tracing::debug!(status = response.status, "flavour override: content not ready yet");
            return Ok(None);
        }

        self.expect_success(&response)?;
        self.decode(&response.body).map(Some)
    }

    fn expect_success(&self, response: &HttpResponse) -> Result<()> {
        if !response.is_success() {
            return Err(ClientError::Api {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        Ok(())
    }

    /// Get the client configuration
    pub fn config(&self) -> &TootClientConfig {
        &self.config
    }

    /// Get the server flavour
    pub fn flavour(&self) -> Flavour {
        self.config.flavour
    }

    /// Get the base server URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Replace the bearer access token
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.config.access_token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TootClientConfig::default();
        assert_eq!(config.base_url, "https://mastodon.social");
        assert_eq!(config.flavour, Flavour::Mastodon);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("Tootkit/"));
    }

    #[test]
    fn test_config_builder() {
        let config = TootClientConfig::new("https://pleroma.example")
            .with_flavour(Flavour::Pleroma)
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("CustomAgent/1.0")
            .with_header("X-Custom", "value")
            .with_access_token("secret");

        assert_eq!(config.base_url, "https://pleroma.example");
        assert_eq!(config.flavour, Flavour::Pleroma);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "CustomAgent/1.0");
        assert_eq!(config.default_headers.get("X-Custom"), Some(&"value".to_string()));
        assert_eq!(config.access_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_client_new() {
        let client = TootClient::new(TootClientConfig::new("https://mastodon.example")).unwrap();
        assert_eq!(client.base_url(), "https://mastodon.example");
        assert_eq!(client.flavour(), Flavour::Mastodon);
    }

    #[test]
    fn test_decode_error_carries_body() {
        let client = TootClient::new(TootClientConfig::default()).unwrap();
        let err = client.decode::<crate::models::Instance>(b"oops").unwrap_err();
        match err {
            ClientError::Decode { body, .. } => assert_eq!(body, b"oops"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_set_access_token() {
        let mut client = TootClient::new(TootClientConfig::default()).unwrap();
        assert!(client.config().access_token.is_none());
        client.set_access_token(Some("token".to_string()));
        assert_eq!(client.config().access_token.as_deref(), Some("token"));
    }
}
