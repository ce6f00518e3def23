//! Response interpretation and listing page types.
//!
//! Every response is checked the same way: a 401 is `Unauthorized` whatever
//! the endpoint, then the status must be in the operation's accepted set or the
//! call fails with `AirshipFailure` carrying the raw body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use ua_core::constants::status;
use ua_core::error::{AirshipError, AirshipResult};

use crate::transport::RawResponse;

/// A device token as returned by the listing and info endpoints, passed
/// through undecoded.
pub type DeviceTokenRecord = serde_json::Value;

/// Check a response against the statuses an operation accepts.
pub fn check_status(response: RawResponse, accepted: &[u16]) -> AirshipResult<RawResponse> {
    if response.status == status::UNAUTHORIZED {
        warn!("request rejected with 401");
        return Err(AirshipError::Unauthorized);
    }

    if !accepted.contains(&response.status) {
        warn!(
            "unexpected status {} (accepted: {:?})",
            response.status, accepted
        );
        return Err(AirshipError::AirshipFailure {
            status: response.status,
            body: response.body,
        });
    }

    Ok(response)
}

impl RawResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> AirshipResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| AirshipError::Decode(format!("failed to parse response: {e}")))
    }
}

/// One page of the device token listing.
///
/// ```json
/// { "device_tokens": [ ... ], "device_tokens_count": 1234, "next_page": "https://..." }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceTokenPage {
    /// Required: a body without it is not a listing page.
    pub device_tokens: Vec<DeviceTokenRecord>,
    /// Total count as reported by the server on this page.
    #[serde(default)]
    pub device_tokens_count: u64,
    /// Reference to the following page, absolute or relative to this page's
    /// URL. Empty strings count as absent.
    #[serde(default, deserialize_with = "non_empty_string")]
    pub next_page: Option<String>,
}

impl DeviceTokenPage {
    pub fn len(&self) -> usize {
        self.device_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.device_tokens.is_empty()
    }

    /// Append a later page. Records accumulate, but the reported count and the
    /// next-page reference are replaced by the later page's values.
    pub fn merge(&mut self, next: DeviceTokenPage) {
        self.device_tokens.extend(next.device_tokens);
        self.device_tokens_count = next.device_tokens_count;
        self.next_page = next.next_page;
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
