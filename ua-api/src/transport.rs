//! HTTP transport for the Urban Airship REST API.
//!
//! The client never talks to reqwest directly: every call is an [`ApiRequest`]
//! handed to a [`Transport`], which answers with the raw status and body.
//! [`HttpTransport`] is the production implementation; tests substitute a
//! scripted one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, Method};
use tracing::debug;

use ua_core::config::ApiConfig;
use ua_core::constants;
use ua_core::error::{AirshipError, AirshipResult};

/// A fully resolved request: absolute URL, optional body and its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
    /// Sent as the `Content-Type` header only when present.
    pub content_type: Option<&'static str>,
}

impl ApiRequest {
    /// A request with no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            content_type: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Attach a JSON body. `None` leaves the request bodyless and without a
    /// content type.
    pub fn with_json(mut self, body: Option<String>) -> Self {
        self.content_type = body.as_ref().map(|_| constants::JSON_CONTENT_TYPE);
        self.body = body;
        self
    }
}

/// Status code and undecoded body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues authenticated requests and returns `(status, body)`.
///
/// Implementations must not interpret the status: a 404 or 401 is a successful
/// transport round trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> AirshipResult<RawResponse>;
}

/// reqwest-backed transport authenticating with HTTP basic auth.
#[derive(Clone)]
pub struct HttpTransport {
    inner: Client,
    key: String,
    secret: String,
}

impl HttpTransport {
    /// Build a transport from API configuration.
    pub fn new(config: &ApiConfig) -> AirshipResult<Self> {
        // Redirects are surfaced as statuses: user deletion answers 301 on success.
        let inner = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_secs(15))
            .redirect(redirect::Policy::none())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AirshipError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            key: config.key.clone(),
            secret: config.secret.clone(),
        })
    }

    /// Classify a reqwest error into an AirshipError variant.
    fn classify_error(e: reqwest::Error) -> AirshipError {
        if e.is_timeout() {
            AirshipError::Timeout(e.to_string())
        } else if e.is_connect() {
            AirshipError::Http(format!("connection failed: {e}"))
        } else {
            AirshipError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> AirshipResult<RawResponse> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .inner
            .request(request.method, &request.url)
            .basic_auth(&self.key, Some(&self.secret));
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(Self::classify_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(Self::classify_error)?;

        debug!("status {status}, {} bytes", body.len());
        Ok(RawResponse { status, body })
    }
}
