//! Rich push command.

use clap::Args;
use console::style;

use ua_api::RichPushMessage;
use ua_core::config::AppConfig;
use ua_core::constants;
use ua_core::error::AirshipResult;
use crate::OutputFormat;

#[derive(Args)]
pub struct RichPushArgs {
    /// Message body.
    message: String,
    /// Message title.
    #[arg(long)]
    title: Option<String>,
    /// Tag to address (repeatable).
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Rich push user to address (repeatable).
    #[arg(long = "user")]
    users: Vec<String>,
    /// Alias to address (repeatable).
    #[arg(long = "alias")]
    aliases: Vec<String>,
    /// Content type of the message body.
    #[arg(long, default_value = constants::DEFAULT_RICH_PUSH_CONTENT_TYPE)]
    content_type: String,
    /// Native push payload sent alongside, as JSON.
    #[arg(long)]
    push: Option<String>,
    /// Extra key/value data, as a JSON object.
    #[arg(long)]
    extra: Option<String>,
}

pub async fn run(
    config: &AppConfig,
    args: RichPushArgs,
    format: OutputFormat,
) -> AirshipResult<()> {
    if args.tags.is_empty() && args.users.is_empty() && args.aliases.is_empty() {
        tracing::warn!("no tags, users or aliases given; the server will likely reject this message");
    }

    let message = RichPushMessage {
        push: args.push.as_deref().map(|p| super::parse_json_arg("push", p)).transpose()?,
        extra: args.extra.as_deref().map(|e| super::parse_json_arg("extra", e)).transpose()?,
        aliases: args.aliases,
        title: args.title,
        tags: args.tags,
        users: args.users,
        content_type: args.content_type,
        message: args.message,
    };

    let api = super::create_api_client(config)?;
    api.rich_push(&message).await?;

    match format {
        OutputFormat::Json => super::print_json(&serde_json::json!({ "sent": "rich_push" })),
        OutputFormat::Text => println!("  {} rich push accepted", style("OK").green().bold()),
    }
    Ok(())
}
