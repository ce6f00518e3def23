//! Feedback endpoint: device tokens that became inactive.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ua_core::constants::status;
use ua_core::error::{AirshipError, AirshipResult};

use crate::client::AirshipClient;
use crate::transport::ApiRequest;

/// Zone-less layouts the server may use; they are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A device token reported inactive, e.g. because the app was uninstalled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackEntry {
    pub device_token: Option<String>,
    pub alias: Option<String>,
    pub marked_inactive_on: DateTime<Utc>,
    /// Any further fields of the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawFeedbackEntry {
    #[serde(default)]
    device_token: Option<String>,
    #[serde(default)]
    alias: Option<String>,
    marked_inactive_on: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawFeedbackEntry> for FeedbackEntry {
    type Error = AirshipError;

    fn try_from(raw: RawFeedbackEntry) -> AirshipResult<Self> {
        Ok(Self {
            marked_inactive_on: parse_utc_timestamp(&raw.marked_inactive_on)?,
            device_token: raw.device_token,
            alias: raw.alias,
            extra: raw.extra,
        })
    }
}

/// Parse a timestamp as an instant in UTC.
///
/// RFC 3339 values keep their offset and are converted; values without an
/// offset are taken to be UTC already.
pub fn parse_utc_timestamp(value: &str) -> AirshipResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AirshipError::InvalidTimestamp(value.to_string()))
}

/// Feedback URL with `since` as an ISO 8601 query parameter.
fn feedback_url(endpoint: &str, since: DateTime<Utc>) -> AirshipResult<String> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| AirshipError::Config(format!("invalid endpoint {endpoint}: {e}")))?;
    url.query_pairs_mut()
        .append_pair("since", &since.to_rfc3339_opts(SecondsFormat::Secs, false));
    Ok(url.into())
}

impl AirshipClient {
    /// Device tokens marked inactive since `since`.
    pub async fn feedback(&self, since: DateTime<Utc>) -> AirshipResult<Vec<FeedbackEntry>> {
        let url = feedback_url(&self.endpoints().feedback, since)?;
        let resp = self.execute(ApiRequest::get(url), &[status::OK]).await?;
        let raw: Vec<RawFeedbackEntry> = resp.json()?;
        raw.into_iter().map(FeedbackEntry::try_from).collect()
    }
}
