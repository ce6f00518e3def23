//! Device token endpoints.

use reqwest::Method;

use ua_core::constants::status;
use ua_core::error::AirshipResult;

use crate::client::{join_segment, resolve_reference, AirshipClient};
use crate::cursor::DeviceTokenCursor;
use crate::request::JsonBody;
use crate::response::{DeviceTokenPage, DeviceTokenRecord};
use crate::transport::ApiRequest;

/// Optional attributes sent when registering a device token.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub alias: Option<String>,
    pub tags: Vec<String>,
    /// A badge of 0 counts as absent.
    pub badge: Option<u32>,
}

impl Registration {
    fn body(&self) -> AirshipResult<JsonBody> {
        JsonBody::new()
            .field("alias", &self.alias)?
            .field("tags", &self.tags)?
            .field("badge", self.badge)
    }
}

impl AirshipClient {
    /// Register a device token. Returns true when the token was newly created
    /// (201) and false when an existing registration was updated (200).
    ///
    /// With no alias, tags or badge the request carries no body and no
    /// content type.
    pub async fn register(
        &self,
        device_token: &str,
        registration: &Registration,
    ) -> AirshipResult<bool> {
        let url = join_segment(&self.endpoints().device_tokens, device_token)?;
        let body = registration.body()?.encode_if_present()?;
        let request = ApiRequest::new(Method::PUT, url).with_json(body);
        let resp = self
            .execute(request, &[status::OK, status::CREATED])
            .await?;
        Ok(resp.status == status::CREATED)
    }

    /// Mark a device token as inactive.
    pub async fn deregister(&self, device_token: &str) -> AirshipResult<()> {
        let url = join_segment(&self.endpoints().device_tokens, device_token)?;
        self.execute(ApiRequest::delete(url), &[status::NO_CONTENT])
            .await?;
        Ok(())
    }

    /// Get everything the server knows about a device token.
    pub async fn device_token_info(&self, device_token: &str) -> AirshipResult<DeviceTokenRecord> {
        let url = join_segment(&self.endpoints().device_tokens, device_token)?;
        let resp = self.execute(ApiRequest::get(url), &[status::OK]).await?;
        resp.json()
    }

    /// Open a cursor over every device token. Nothing is fetched until the
    /// cursor is first used.
    pub fn device_tokens(&self) -> DeviceTokenCursor {
        DeviceTokenCursor::new(self.clone(), self.endpoints().device_tokens.clone())
    }

    /// Fetch and decode one listing page. A relative `next_page` is resolved
    /// against `url`, so buffered pages only ever hold absolute references.
    pub(crate) async fn fetch_device_token_page(&self, url: &str) -> AirshipResult<DeviceTokenPage> {
        let resp = self.execute(ApiRequest::get(url), &[status::OK]).await?;
        let mut page: DeviceTokenPage = resp.json()?;
        if let Some(next) = page.next_page.take() {
            page.next_page = Some(resolve_reference(url, &next)?);
        }
        Ok(page)
    }
}
