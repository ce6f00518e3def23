//! Client facade for the Urban Airship REST API.
//!
//! `AirshipClient` owns the resolved endpoint table and a shared transport.
//! It keeps no other state, so every operation is independent and the client
//! is cheap to clone. The operations themselves live in [`crate::endpoints`].

use std::sync::Arc;

use reqwest::{Method, Url};
use tracing::debug;

use ua_core::config::{ApiConfig, Endpoints};
use ua_core::error::{AirshipError, AirshipResult};

use crate::request::JsonBody;
use crate::response::check_status;
use crate::transport::{ApiRequest, HttpTransport, RawResponse, Transport};

/// HTTP client for the Urban Airship API.
#[derive(Clone)]
pub struct AirshipClient {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
}

impl AirshipClient {
    /// Create a client for the configured credential pair and API root.
    pub fn new(config: &ApiConfig) -> AirshipResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(config.endpoints(), Arc::new(transport)))
    }

    /// Create a client over any transport.
    pub fn with_transport(endpoints: Endpoints, transport: Arc<dyn Transport>) -> Self {
        debug!("airship client targeting {}", endpoints.base);
        Self {
            transport,
            endpoints,
        }
    }

    /// Resolved endpoint URLs.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send a request and check its status against `accepted`.
    pub(crate) async fn execute(
        &self,
        request: ApiRequest,
        accepted: &[u16],
    ) -> AirshipResult<RawResponse> {
        let response = self.transport.send(request).await?;
        check_status(response, accepted)
    }

    /// Send `body` as JSON, even when it has no fields.
    pub(crate) async fn send_json(
        &self,
        method: Method,
        url: &str,
        body: &JsonBody,
        accepted: &[u16],
    ) -> AirshipResult<RawResponse> {
        let request = ApiRequest::new(method, url).with_json(Some(body.encode()?));
        self.execute(request, accepted).await
    }
}

/// Append one percent-encoded path segment to an endpoint URL.
pub(crate) fn join_segment(endpoint: &str, segment: &str) -> AirshipResult<String> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| AirshipError::Config(format!("invalid endpoint {endpoint}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| AirshipError::Config(format!("endpoint cannot take a path: {endpoint}")))?
        .pop_if_empty()
        .push(segment);
    Ok(url.into())
}

/// Resolve a possibly relative reference against the URL it was served from.
pub(crate) fn resolve_reference(base: &str, reference: &str) -> AirshipResult<String> {
    let base = Url::parse(base)
        .map_err(|e| AirshipError::Config(format!("invalid endpoint {base}: {e}")))?;
    let resolved = base
        .join(reference)
        .map_err(|e| AirshipError::Decode(format!("invalid page reference {reference}: {e}")))?;
    Ok(resolved.into())
}
