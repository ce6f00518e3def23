//! API endpoint modules organized by category.
//!
//! Each module provides typed methods on [`crate::AirshipClient`] for a group
//! of related endpoints.

pub mod device_tokens;
pub mod push;
pub mod rich_push;
pub mod feedback;
