//! Error types for the Urban Airship client.
//!
//! Every failure an operation can surface is a variant of `AirshipError`.
//! Nothing in this layer retries, so each variant reaches the caller as-is.

use thiserror::Error;

/// Convenience type alias for Results using AirshipError.
pub type AirshipResult<T> = Result<T, AirshipError>;

/// Unified error type covering all error categories of the client.
#[derive(Error, Debug)]
pub enum AirshipError {
    // -- Response errors --
    /// The server rejected the credential pair (HTTP 401), whatever the operation.
    #[error("unauthorized: the application key or secret was rejected")]
    Unauthorized,

    /// The server answered with a status outside the operation's accepted set.
    #[error("airship failure (status {status}): {body}")]
    AirshipFailure {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for caller diagnostics.
        body: String,
    },

    /// A success response carried a body that could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A feedback record carried an unparseable timestamp.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // -- Caller errors --
    /// A push payload was not a JSON object.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A cursor was read at a position with no buffered record.
    #[error("cursor position {position} is out of bounds ({buffered} records buffered)")]
    OutOfBounds {
        /// Requested position.
        position: usize,
        /// Number of records currently buffered.
        buffered: usize,
    },

    // -- Network errors --
    /// HTTP request failed.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    // -- Configuration errors --
    /// Failed to load or parse client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Generic --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AirshipError {
    /// HTTP status carried by response-derived errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            AirshipError::Unauthorized => Some(401),
            AirshipError::AirshipFailure { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of an `AirshipFailure`.
    pub fn body(&self) -> Option<&str> {
        match self {
            AirshipError::AirshipFailure { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AirshipError {
    fn from(e: serde_json::Error) -> Self {
        AirshipError::Decode(e.to_string())
    }
}

impl From<toml::de::Error> for AirshipError {
    fn from(e: toml::de::Error) -> Self {
        AirshipError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display_includes_status_and_body() {
        let err = AirshipError::AirshipFailure {
            status: 400,
            body: "bad token".into(),
        };
        assert_eq!(err.to_string(), "airship failure (status 400): bad token");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body(), Some("bad token"));
    }

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(AirshipError::Unauthorized.status(), Some(401));
        assert!(AirshipError::Unauthorized.body().is_none());
    }

    #[test]
    fn test_serde_error_maps_to_decode() {
        let err: AirshipError = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, AirshipError::Decode(_)));
    }

    #[test]
    fn test_config_error_display() {
        let err = AirshipError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }
}
