//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use ua_api::{AirshipClient, ApiRequest, RawResponse, Transport};
use ua_core::config::Endpoints;
use ua_core::error::{AirshipError, AirshipResult};

pub const BASE_URL: &str = "https://mock.airship.test/api";

/// Transport answering from a queue of canned responses and recording every
/// request it receives.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new(responses: impl IntoIterator<Item = RawResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> AirshipResult<RawResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AirshipError::Http("no scripted response left".into()))
    }
}

/// Build a client over a mock transport scripted with `responses`.
pub fn mock_client(
    responses: impl IntoIterator<Item = RawResponse>,
) -> (AirshipClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new(responses));
    let client = AirshipClient::with_transport(Endpoints::new(BASE_URL), transport.clone());
    (client, transport)
}

/// A listing page response with `size` records named `{prefix}-{i}`.
pub fn page_response(
    prefix: &str,
    size: usize,
    count: u64,
    next_page: Option<&str>,
) -> RawResponse {
    let tokens: Vec<Value> = (0..size)
        .map(|i| json!({"device_token": format!("{prefix}-{i}"), "active": true}))
        .collect();
    let mut body = json!({
        "device_tokens": tokens,
        "device_tokens_count": count,
    });
    if let Some(next) = next_page {
        body["next_page"] = json!(next);
    }
    RawResponse::new(200, body.to_string())
}

/// URL of the `n`th listing page as the mock server would link it.
pub fn page_url(n: usize) -> String {
    format!("{BASE_URL}/device_tokens/?page={n}")
}

pub fn token_of(record: &Value) -> &str {
    record["device_token"].as_str().unwrap_or_default()
}
