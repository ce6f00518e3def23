//! Logging for the Airship client and CLI.
//!
//! Everything is written to stderr so stdout stays free for command output
//! (`--format json` is meant to be piped). When the log directory is usable a
//! daily rolling `airship.log` is written too; when it is not, logging falls
//! back to stderr alone instead of failing the command.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AirshipResult;

const LOG_FILE_NAME: &str = "airship.log";

/// HTTP stack targets held at `warn` unless the caller names them.
const NOISY_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "reqwest", "rustls"];

/// Keeps the file writer alive. Dropping it flushes the log file.
pub struct LogGuard {
    file: Option<WorkerGuard>,
}

impl LogGuard {
    /// Whether log lines also go to a file.
    pub fn writes_file(&self) -> bool {
        self.file.is_some()
    }
}

/// Filter directives for a configured level.
///
/// A bare level such as `debug` applies to this client while the HTTP stack
/// stays at `warn`. Anything containing `=` or `,` is taken as a full filter.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let level = if level.is_empty() { "info" } else { level };
    let mut directives = level.to_string();
    for target in NOISY_TARGETS {
        directives.push_str(&format!(",{target}=warn"));
    }
    directives
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(level))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives("info")))
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
}

/// Log to stderr and to a daily rolling file in `log_dir`.
///
/// Fails only when `log_dir` cannot be created. If a global subscriber is
/// already installed the call leaves it in place.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> AirshipResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_NAME));

    // Exactly one of the two file layers is present.
    let json_file = json_output.then(|| {
        fmt::layer()
            .with_writer(writer.clone())
            .json()
            .with_file(true)
            .with_line_number(true)
    });
    let plain_file = (!json_output).then(|| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
    });

    let installed = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer())
        .with(json_file)
        .with(plain_file)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("logging to stderr and {}", log_dir.join(LOG_FILE_NAME).display());
    }

    Ok(LogGuard { file: Some(guard) })
}

/// Log to stderr only.
pub fn init_console_logging(level: &str) -> LogGuard {
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer())
        .try_init();
    LogGuard { file: None }
}

/// File and stderr logging when possible, stderr alone otherwise. The reason
/// for a fallback is logged as a warning.
pub fn init_logging_or_console(level: &str, log_dir: &Path, json_output: bool) -> LogGuard {
    match init_logging(level, log_dir, json_output) {
        Ok(guard) => guard,
        Err(e) => {
            let guard = init_console_logging(level);
            tracing::warn!(
                "cannot write logs to {}: {e}; logging to stderr only",
                log_dir.display()
            );
            guard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_quiets_http_stack() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("hyper=warn"));
        assert!(directives.contains("reqwest=warn"));
        assert_eq!(filter_directives("  "), filter_directives("info"));
    }

    #[test]
    fn test_full_filter_is_kept() {
        assert_eq!(filter_directives("ua_api=trace,warn"), "ua_api=trace,warn");
    }

    #[test]
    fn test_unusable_log_dir_falls_back_to_console() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot be used as the log directory.
        let log_dir = file.path().join("logs");

        assert!(init_logging("info", &log_dir, false).is_err());
        let guard = init_logging_or_console("info", &log_dir, false);
        assert!(!guard.writes_file());
    }

    #[test]
    fn test_usable_log_dir_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let guard = init_logging_or_console("not-a-level", &log_dir, true);
        assert!(guard.writes_file());
        assert!(log_dir.is_dir());
    }
}
