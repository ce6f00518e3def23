//! Rich push user commands.

use clap::Subcommand;
use console::style;

use ua_api::NewRichPushUser;
use ua_core::config::AppConfig;
use ua_core::error::AirshipResult;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum UsersAction {
    /// Create a rich push user and print its credentials.
    Create {
        /// Device token used to notify the user (repeatable).
        #[arg(long = "token")]
        device_tokens: Vec<String>,
        /// Alias for the user.
        #[arg(long)]
        alias: Option<String>,
        /// Tag to apply (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Your own identifier for the user.
        #[arg(long)]
        udid: Option<String>,
    },
    /// Delete a rich push user.
    Delete {
        /// Username returned when the user was created.
        username: String,
    },
}

pub async fn run(
    config: &AppConfig,
    action: UsersAction,
    format: OutputFormat,
) -> AirshipResult<()> {
    let api = super::create_api_client(config)?;

    match action {
        UsersAction::Create { device_tokens, alias, tags, udid } => {
            let params = NewRichPushUser { device_tokens, alias, tags, udid };
            let user = api.create_rich_push_user(&params).await?;
            match format {
                OutputFormat::Json => super::print_json(&serde_json::to_value(&user)?),
                OutputFormat::Text => {
                    println!("  {} Created rich push user", style("OK").green().bold());
                    println!("  {:<10} {}", style("username").dim(), user.username);
                    println!("  {:<10} {}", style("password").dim(), user.password);
                }
            }
        }
        UsersAction::Delete { username } => {
            api.delete_rich_push_user(&username).await?;
            match format {
                OutputFormat::Json => {
                    super::print_json(&serde_json::json!({ "username": username, "deleted": true }));
                }
                OutputFormat::Text => {
                    println!("  {} Deleted {username}", style("OK").green().bold());
                }
            }
        }
    }
    Ok(())
}
