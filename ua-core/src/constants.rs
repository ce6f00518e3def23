//! Application-wide constants.

/// Application name, used for platform directories and log files.
pub const APP_NAME: &str = "UrbanAirship";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://go.urbanairship.com/api";

/// Default request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Content type sent with every JSON request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Default content type of a rich push message body.
pub const DEFAULT_RICH_PUSH_CONTENT_TYPE: &str = "text/html";

/// Environment variables that override values from the config file.
pub mod env {
    pub const KEY: &str = "AIRSHIP_KEY";
    pub const SECRET: &str = "AIRSHIP_SECRET";
    pub const BASE_URL: &str = "AIRSHIP_BASE_URL";
}

/// Endpoint paths relative to the API root. Trailing slashes are part of the
/// wire contract.
pub mod paths {
    pub const DEVICE_TOKENS: &str = "device_tokens/";
    pub const PUSH: &str = "push/";
    pub const BROADCAST: &str = "push/broadcast/";
    pub const FEEDBACK: &str = "device_tokens/feedback/";
    pub const RICH_PUSH: &str = "airmail/send/";
    pub const USER: &str = "user/";
}

/// Accepted success statuses per operation.
pub mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const NO_CONTENT: u16 = 204;
    /// Returned by the user deletion endpoint on success.
    pub const MOVED_PERMANENTLY: u16 = 301;
    pub const UNAUTHORIZED: u16 = 401;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_keep_trailing_slash() {
        for path in [
            paths::DEVICE_TOKENS,
            paths::PUSH,
            paths::BROADCAST,
            paths::FEEDBACK,
            paths::RICH_PUSH,
            paths::USER,
        ] {
            assert!(path.ends_with('/'), "{path} must end with a slash");
            assert!(!path.starts_with('/'));
        }
    }
}
