//! Lazy, forward-only cursor over the paginated device token listing.
//!
//! The cursor fetches the origin page on first access and only fetches the
//! next page when traversal runs past the last buffered record. Later pages
//! are appended to the buffer, so `restart` replays everything fetched so far
//! without touching the network.
//!
//! ```text
//!   Fresh ──first access──▶ Buffered ──past end, no next_page──▶ Exhausted
//!                            │    ▲
//!                            └────┘ past end, next_page: fetch + append
//! ```
//!
//! A `next_page` that points back at an earlier page is followed as-is; the
//! cursor does not detect cycles.

use tracing::debug;

use ua_core::error::{AirshipError, AirshipResult};

use crate::client::AirshipClient;
use crate::response::{DeviceTokenPage, DeviceTokenRecord};

/// Observable phase of a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing fetched yet.
    Fresh,
    /// Holds fetched records and may fetch more.
    Buffered,
    /// Past the last record with no page left to fetch.
    Exhausted,
}

enum Buffer {
    Fresh,
    Buffered(DeviceTokenPage),
    Exhausted(DeviceTokenPage),
}

enum Step {
    Ready,
    FetchOrigin,
    FetchNext(String),
    Exhaust,
    Done,
}

/// Cursor over every device token of the application.
///
/// Not meant for shared traversal: callers that need concurrent enumeration
/// should open independent cursors.
pub struct DeviceTokenCursor {
    client: AirshipClient,
    origin: String,
    buffer: Buffer,
    position: usize,
}

impl DeviceTokenCursor {
    pub(crate) fn new(client: AirshipClient, origin: String) -> Self {
        Self {
            client,
            origin,
            buffer: Buffer::Fresh,
            position: 0,
        }
    }

    /// URL of the first page.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn state(&self) -> CursorState {
        match self.buffer {
            Buffer::Fresh => CursorState::Fresh,
            Buffer::Buffered(_) => CursorState::Buffered,
            Buffer::Exhausted(_) => CursorState::Exhausted,
        }
    }

    /// Index of the record `current` would return.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of records fetched so far.
    pub fn buffered(&self) -> usize {
        self.page().map_or(0, DeviceTokenPage::len)
    }

    /// Whether a record exists at the current position, fetching pages as
    /// needed to find out.
    ///
    /// A failed fetch leaves the cursor where it was, so the call can be
    /// repeated.
    pub async fn has_next(&mut self) -> AirshipResult<bool> {
        loop {
            match self.next_step() {
                Step::Ready => return Ok(true),
                Step::Done => return Ok(false),
                Step::Exhaust => {
                    self.exhaust();
                    return Ok(false);
                }
                Step::FetchOrigin => {
                    let page = self.client.fetch_device_token_page(&self.origin).await?;
                    debug!(
                        "device token cursor: origin page with {} records",
                        page.len()
                    );
                    self.buffer = Buffer::Buffered(page);
                }
                Step::FetchNext(url) => {
                    let page = self.client.fetch_device_token_page(&url).await?;
                    debug!(
                        "device token cursor: appending {} records at position {}",
                        page.len(),
                        self.position
                    );
                    if let Buffer::Buffered(buffered) = &mut self.buffer {
                        buffered.merge(page);
                    }
                }
            }
        }
    }

    fn next_step(&self) -> Step {
        match &self.buffer {
            Buffer::Fresh => Step::FetchOrigin,
            Buffer::Exhausted(_) => Step::Done,
            Buffer::Buffered(page) if self.position < page.len() => Step::Ready,
            Buffer::Buffered(page) => match &page.next_page {
                Some(url) => Step::FetchNext(url.clone()),
                None => Step::Exhaust,
            },
        }
    }

    fn exhaust(&mut self) {
        if let Buffer::Buffered(page) = std::mem::replace(&mut self.buffer, Buffer::Fresh) {
            debug!("device token cursor exhausted after {} records", page.len());
            self.buffer = Buffer::Exhausted(page);
        }
    }

    fn page(&self) -> Option<&DeviceTokenPage> {
        match &self.buffer {
            Buffer::Fresh => None,
            Buffer::Buffered(page) | Buffer::Exhausted(page) => Some(page),
        }
    }

    /// Record at the current position. Fails with `OutOfBounds` unless a
    /// preceding `has_next` returned true for this position.
    pub fn current(&self) -> AirshipResult<&DeviceTokenRecord> {
        let records = self.page().map_or(&[][..], |p| p.device_tokens.as_slice());
        records.get(self.position).ok_or(AirshipError::OutOfBounds {
            position: self.position,
            buffered: records.len(),
        })
    }

    /// Move to the next position. Never fetches.
    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// Total count reported by the most recently fetched page. The origin page
    /// is fetched first if nothing has been fetched yet.
    ///
    /// Each merged page replaces the count rather than adding to it.
    pub async fn count(&mut self) -> AirshipResult<u64> {
        if let Buffer::Fresh = self.buffer {
            let page = self.client.fetch_device_token_page(&self.origin).await?;
            self.buffer = Buffer::Buffered(page);
        }
        Ok(self.page().map_or(0, |p| p.device_tokens_count))
    }

    /// Count reported by the most recent page, without fetching.
    pub fn reported_count(&self) -> Option<u64> {
        self.page().map(|p| p.device_tokens_count)
    }

    /// Reset the position to zero. Buffered records are kept and nothing is
    /// re-fetched; an exhausted cursor becomes traversable again.
    pub fn restart(&mut self) {
        self.position = 0;
        self.buffer = match std::mem::replace(&mut self.buffer, Buffer::Fresh) {
            Buffer::Exhausted(page) => Buffer::Buffered(page),
            other => other,
        };
    }

    /// Return the current record and advance, or `None` once exhausted.
    pub async fn next_record(&mut self) -> AirshipResult<Option<DeviceTokenRecord>> {
        if !self.has_next().await? {
            return Ok(None);
        }
        let record = self.current()?.clone();
        self.advance();
        Ok(Some(record))
    }

    /// Drain the remaining records into a vector, fetching every page left.
    pub async fn collect_remaining(mut self) -> AirshipResult<Vec<DeviceTokenRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record().await? {
            records.push(record);
        }
        Ok(records)
    }
}
