//! Native push and broadcast endpoints.

use reqwest::Method;
use serde_json::Value;

use ua_core::constants::status;
use ua_core::error::AirshipResult;

use crate::client::AirshipClient;
use crate::request::JsonBody;

/// Optional targeting merged into a push payload. Empty lists are not sent.
#[derive(Debug, Clone, Default)]
pub struct PushTargets {
    pub device_tokens: Vec<String>,
    pub aliases: Vec<String>,
    pub tags: Vec<String>,
}

impl PushTargets {
    pub fn device_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            device_tokens: tokens.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    fn apply(&self, payload: JsonBody) -> AirshipResult<JsonBody> {
        payload
            .field("device_tokens", &self.device_tokens)?
            .field("aliases", &self.aliases)?
            .field("tags", &self.tags)
    }
}

/// Build the body of a push request.
fn push_body(payload: Value, targets: &PushTargets) -> AirshipResult<JsonBody> {
    targets.apply(JsonBody::from_payload(payload)?)
}

/// Build the body of a broadcast request.
fn broadcast_body(payload: Value, exclude_tokens: &[String]) -> AirshipResult<JsonBody> {
    JsonBody::from_payload(payload)?.field("exclude_tokens", exclude_tokens)
}

impl AirshipClient {
    /// Push `payload` (e.g. `{"aps": {"alert": "Hello"}}`) to the given
    /// device tokens, aliases and tags.
    pub async fn push(&self, payload: Value, targets: &PushTargets) -> AirshipResult<()> {
        let body = push_body(payload, targets)?;
        self.send_json(Method::POST, &self.endpoints().push, &body, &[status::OK])
            .await?;
        Ok(())
    }

    /// Push `payload` to every device, except `exclude_tokens`.
    pub async fn broadcast(&self, payload: Value, exclude_tokens: &[String]) -> AirshipResult<()> {
        let body = broadcast_body(payload, exclude_tokens)?;
        self.send_json(Method::POST, &self.endpoints().broadcast, &body, &[status::OK])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_body_merges_targets() {
        let targets = PushTargets {
            device_tokens: vec!["T1".into()],
            aliases: vec![],
            tags: vec!["news".into()],
        };
        let body = push_body(json!({"aps": {"alert": "hi"}}), &targets).unwrap();
        assert_eq!(
            body.into_value(),
            json!({"aps": {"alert": "hi"}, "device_tokens": ["T1"], "tags": ["news"]})
        );
    }

    #[test]
    fn test_push_body_without_targets_is_payload() {
        let body = push_body(json!({"aps": {"badge": 1}}), &PushTargets::default()).unwrap();
        assert_eq!(body.into_value(), json!({"aps": {"badge": 1}}));
    }

    #[test]
    fn test_broadcast_body() {
        let body = broadcast_body(json!({"aps": {"alert": "all"}}), &["X".to_string()]).unwrap();
        assert_eq!(
            body.into_value(),
            json!({"aps": {"alert": "all"}, "exclude_tokens": ["X"]})
        );

        let body = broadcast_body(json!({"aps": {"alert": "all"}}), &[]).unwrap();
        assert!(body.get("exclude_tokens").is_none());
    }

    #[test]
    fn test_push_targets_from_tokens() {
        let targets = PushTargets::device_tokens(["a", "b"]);
        assert_eq!(targets.device_tokens, vec!["a", "b"]);
        assert!(targets.aliases.is_empty());
    }
}
