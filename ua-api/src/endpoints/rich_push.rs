//! Rich push (airmail) and rich push user endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ua_core::constants::{self, status};
use ua_core::error::AirshipResult;

use crate::client::{join_segment, AirshipClient};
use crate::request::JsonBody;
use crate::transport::ApiRequest;

/// A rich push message addressed to users, tags or aliases.
///
/// The server requires at least one of `tags`, `users` or `aliases`; the
/// client sends whatever it is given.
#[derive(Debug, Clone)]
pub struct RichPushMessage {
    /// Message body, interpreted according to `content_type`.
    pub message: String,
    /// Optional native push sent alongside the message.
    pub push: Option<Value>,
    pub aliases: Vec<String>,
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub users: Vec<String>,
    pub content_type: String,
    pub extra: Option<Value>,
}

impl RichPushMessage {
    /// A message with the default `text/html` content type and no recipients.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            push: None,
            aliases: Vec::new(),
            title: None,
            tags: Vec::new(),
            users: Vec::new(),
            content_type: constants::DEFAULT_RICH_PUSH_CONTENT_TYPE.to_string(),
            extra: None,
        }
    }

    fn body(&self) -> AirshipResult<JsonBody> {
        JsonBody::new()
            .field("push", &self.push)?
            .field("tags", &self.tags)?
            .field("users", &self.users)?
            .field("aliases", &self.aliases)?
            .field("title", &self.title)?
            .field("message", &self.message)?
            .field("content-type", &self.content_type)?
            .field("extra", &self.extra)
    }
}

/// Parameters for creating a rich push user.
#[derive(Debug, Clone, Default)]
pub struct NewRichPushUser {
    /// Tokens used to alert the user through native push when mail arrives.
    pub device_tokens: Vec<String>,
    pub alias: Option<String>,
    /// Tags that do not exist yet are created.
    pub tags: Vec<String>,
    /// Caller-side identifier for the user.
    pub udid: Option<String>,
}

impl NewRichPushUser {
    fn body(&self) -> AirshipResult<JsonBody> {
        JsonBody::new()
            .field("device_tokens", &self.device_tokens)?
            .field("alias", &self.alias)?
            .field("tags", &self.tags)?
            .field("udid", &self.udid)
    }
}

/// A created rich push user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichPushUser {
    pub username: String,
    pub password: String,
    /// Any further fields the server returns (e.g. `user_url`).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl AirshipClient {
    /// Send a rich push message. Empty fields are left out of the request.
    pub async fn rich_push(&self, message: &RichPushMessage) -> AirshipResult<()> {
        let body = message.body()?;
        self.send_json(Method::POST, &self.endpoints().rich_push, &body, &[status::OK])
            .await?;
        Ok(())
    }

    /// Create a rich push user and return its generated credentials.
    pub async fn create_rich_push_user(
        &self,
        user: &NewRichPushUser,
    ) -> AirshipResult<RichPushUser> {
        let body = user.body()?;
        let resp = self
            .send_json(Method::POST, &self.endpoints().user, &body, &[status::CREATED])
            .await?;
        resp.json()
    }

    /// Delete a rich push user. The endpoint answers 301 on success.
    pub async fn delete_rich_push_user(&self, username: &str) -> AirshipResult<()> {
        let url = join_segment(&self.endpoints().user, username)?;
        self.execute(ApiRequest::delete(url), &[status::MOVED_PERMANENTLY])
            .await?;
        Ok(())
    }
}
