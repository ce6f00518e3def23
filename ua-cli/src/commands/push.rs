//! Native push and broadcast commands.

use clap::Subcommand;
use console::style;

use ua_api::PushTargets;
use ua_core::config::AppConfig;
use ua_core::error::AirshipResult;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum PushAction {
    /// Push a payload to device tokens, aliases or tags.
    Send {
        /// Payload as JSON, e.g. '{"aps": {"alert": "Hello"}}'.
        payload: String,
        /// Device token to target (repeatable).
        #[arg(long = "token")]
        device_tokens: Vec<String>,
        /// Alias to target (repeatable).
        #[arg(long = "alias")]
        aliases: Vec<String>,
        /// Tag to target (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Push a payload to every device.
    Broadcast {
        /// Payload as JSON.
        payload: String,
        /// Device token to leave out (repeatable).
        #[arg(long = "exclude")]
        exclude_tokens: Vec<String>,
    },
}

pub async fn run(
    config: &AppConfig,
    action: PushAction,
    format: OutputFormat,
) -> AirshipResult<()> {
    let api = super::create_api_client(config)?;

    let kind = match action {
        PushAction::Send { payload, device_tokens, aliases, tags } => {
            let payload = super::parse_json_arg("payload", &payload)?;
            let targets = PushTargets { device_tokens, aliases, tags };
            api.push(payload, &targets).await?;
            "push"
        }
        PushAction::Broadcast { payload, exclude_tokens } => {
            let payload = super::parse_json_arg("payload", &payload)?;
            api.broadcast(payload, &exclude_tokens).await?;
            "broadcast"
        }
    };

    match format {
        OutputFormat::Json => super::print_json(&serde_json::json!({ "sent": kind })),
        OutputFormat::Text => println!("  {} {kind} accepted", style("OK").green().bold()),
    }
    Ok(())
}
