//! CLI command implementations.

pub mod tokens;
pub mod push;
pub mod rich_push;
pub mod users;
pub mod feedback;
pub mod config;

use serde_json::Value;

use ua_api::AirshipClient;
use ua_core::config::AppConfig;
use ua_core::error::{AirshipError, AirshipResult};

/// Helper to create an API client from config.
pub fn create_api_client(config: &AppConfig) -> AirshipResult<AirshipClient> {
    AirshipClient::new(&config.api)
}

/// Parse a JSON command-line argument.
pub fn parse_json_arg(name: &str, raw: &str) -> AirshipResult<Value> {
    serde_json::from_str(raw)
        .map_err(|e| AirshipError::InvalidPayload(format!("--{name} is not valid JSON: {e}")))
}

/// Print a value as pretty JSON.
pub fn print_json(value: &Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Truncate a string to a maximum length, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Render a JSON scalar for a table cell.
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.is_empty() => "-".to_string(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer token", 10), "a much ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(&json!(null)), "-");
        assert_eq!(cell(&json!(["a", "b"])), "a, b");
        assert_eq!(cell(&json!(3)), "3");
        assert_eq!(cell(&json!(true)), "true");
    }

    #[test]
    fn test_parse_json_arg() {
        assert_eq!(parse_json_arg("payload", r#"{"a":1}"#).unwrap(), json!({"a": 1}));
        assert!(matches!(
            parse_json_arg("payload", "{oops"),
            Err(AirshipError::InvalidPayload(_))
        ));
    }
}
