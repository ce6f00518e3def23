//! Configuration commands.

use std::path::Path;

use clap::Subcommand;
use console::style;
use dialoguer::{Input, Password};

use ua_core::config::AppConfig;
use ua_core::error::{AirshipError, AirshipResult};
use ua_core::platform::Platform;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (the secret is masked).
    Show,
    /// Prompt for credentials and write the configuration file.
    Init {
        /// Application key (prompted for when omitted).
        #[arg(long)]
        key: Option<String>,
        /// API root, e.g. for a staging or mock server.
        #[arg(long)]
        base_url: Option<String>,
    },
}

/// `effective` carries environment overrides and is what `show` reports.
/// `init` starts from `stored`, the file contents alone, so values taken from
/// the environment are never written back to disk.
pub fn run(
    effective: AppConfig,
    stored: AppConfig,
    path: &Path,
    action: ConfigAction,
    format: OutputFormat,
) -> AirshipResult<()> {
    match action {
        ConfigAction::Show => {
            let config = effective;
            let secret = mask(&config.api.secret);
            match format {
                OutputFormat::Json => super::print_json(&serde_json::json!({
                    "path": path.display().to_string(),
                    "base_url": config.api.base_url,
                    "key": config.api.key,
                    "secret": secret,
                    "timeout_ms": config.api.timeout_ms,
                    "log_level": config.logging.level,
                    "configured": config.is_configured(),
                    "platform": Platform::current().name(),
                })),
                OutputFormat::Text => {
                    println!("{}", style(path.display()).bold());
                    if !config.is_configured() {
                        println!("  {} credentials not set, run `airship config init`",
                            style("!").yellow().bold());
                    }
                    println!("  {:<12} {}", style("base_url").dim(), config.api.base_url);
                    println!("  {:<12} {}", style("key").dim(), config.api.key);
                    println!("  {:<12} {}", style("secret").dim(), secret);
                    println!("  {:<12} {}", style("timeout_ms").dim(), config.api.timeout_ms);
                    println!("  {:<12} {}", style("log_level").dim(), config.logging.level);
                    println!("  {:<12} {}", style("platform").dim(), Platform::current());
                }
            }
        }
        ConfigAction::Init { key, base_url } => {
            let key = match key {
                Some(k) => k,
                None => Input::new()
                    .with_prompt("Application key")
                    .with_initial_text(stored.api.key.clone())
                    .interact_text()
                    .map_err(|e| AirshipError::Other(e.into()))?,
            };
            let secret = Password::new()
                .with_prompt("Master secret")
                .interact()
                .map_err(|e| AirshipError::Other(e.into()))?;

            let config = initialized(stored, key, secret, base_url.as_deref());
            config.api.validate()?;
            config.save_to_file(path)?;

            println!("  {} Saved {}", style("OK").green().bold(), path.display());
        }
    }
    Ok(())
}

/// The stored configuration with new credentials and, optionally, a new API root.
fn initialized(
    mut stored: AppConfig,
    key: String,
    secret: String,
    base_url: Option<&str>,
) -> AppConfig {
    stored.api.key = key;
    stored.api.secret = secret;
    if let Some(base_url) = base_url {
        stored.api.base_url = AppConfig::sanitize_base_url(base_url);
    }
    stored
}

/// Mask all but the last four characters of a secret.
fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return "(not set)".to_string();
    }
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = secret.chars().skip(count - 4).collect();
    format!("{}{visible}", "*".repeat(count - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    use ua_core::constants;

    #[test]
    fn test_init_ignores_environment_overrides() {
        let stored = AppConfig::default();
        let mut effective = stored.clone();
        effective.apply_overrides(|name| match name {
            constants::env::BASE_URL => Some("http://env.test/api".into()),
            constants::env::SECRET => Some("env-secret".into()),
            _ => None,
        });
        assert_eq!(effective.api.secret, "env-secret");

        let saved = initialized(stored, "typed-key".into(), "typed-secret".into(), None);
        assert_eq!(saved.api.key, "typed-key");
        assert_eq!(saved.api.secret, "typed-secret");
        assert_eq!(saved.api.base_url, constants::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_init_sanitizes_base_url() {
        let saved = initialized(
            AppConfig::default(),
            "k".into(),
            "s".into(),
            Some("  http://localhost:8080/api/  "),
        );
        assert_eq!(saved.api.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(""), "(not set)");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask("supersecret"), "*******cret");
    }
}
