//! Urban Airship Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the API client and the CLI:
//! - Client configuration (base URL, application key and master secret)
//! - The unified error type surfaced by every API operation
//! - Structured logging with tracing
//! - Platform directory lookup and common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, Endpoints};
pub use error::{AirshipError, AirshipResult};
pub use logging::{init_logging, init_logging_or_console};
pub use platform::Platform;
