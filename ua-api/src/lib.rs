//! Urban Airship API - HTTP client for the push notification REST API.
//!
//! This crate provides a typed client for device token registration, native
//! push, broadcast, rich push (airmail) and rich push users, and the feedback
//! report. The device token listing is exposed as a lazily fetched cursor that
//! walks the server's pages on demand.
//!
//! Requests flow through a [`Transport`], so the client can be driven by a
//! scripted transport in tests or by [`HttpTransport`] against the live API.

pub mod client;
pub mod cursor;
pub mod endpoints;
pub mod request;
pub mod response;
pub mod transport;

// Re-export key types
pub use client::AirshipClient;
pub use cursor::{CursorState, DeviceTokenCursor};
pub use endpoints::device_tokens::Registration;
pub use endpoints::feedback::FeedbackEntry;
pub use endpoints::push::PushTargets;
pub use endpoints::rich_push::{NewRichPushUser, RichPushMessage, RichPushUser};
pub use request::JsonBody;
pub use response::{DeviceTokenPage, DeviceTokenRecord};
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};
