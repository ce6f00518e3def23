//! Device token commands.

use clap::Subcommand;
use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use ua_api::Registration;
use ua_core::config::AppConfig;
use ua_core::error::AirshipResult;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum TokensAction {
    /// List device tokens, walking the server's pages as needed.
    List {
        /// Stop after this many tokens.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show everything the server knows about a device token.
    Info {
        /// Device token.
        token: String,
    },
    /// Register or update a device token.
    Register {
        /// Device token.
        token: String,
        /// Alias to associate with the token.
        #[arg(short, long)]
        alias: Option<String>,
        /// Tag to apply (repeatable).
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Badge value.
        #[arg(short, long)]
        badge: Option<u32>,
    },
    /// Mark a device token as inactive.
    Deregister {
        /// Device token.
        token: String,
    },
}

pub async fn run(
    config: &AppConfig,
    action: TokensAction,
    format: OutputFormat,
) -> AirshipResult<()> {
    let api = super::create_api_client(config)?;

    match action {
        TokensAction::List { limit } => {
            let mut cursor = api.device_tokens();

            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(std::time::Duration::from_millis(100));

            let mut records: Vec<Value> = Vec::new();
            while limit.map_or(true, |l| records.len() < l) {
                match cursor.next_record().await {
                    Ok(Some(record)) => records.push(record),
                    Ok(None) => break,
                    Err(e) => {
                        pb.finish_and_clear();
                        return Err(e);
                    }
                }
                pb.set_message(format!("fetched {} tokens", records.len()));
            }
            pb.finish_and_clear();

            let reported = cursor.reported_count().unwrap_or(0);

            match format {
                OutputFormat::Json => {
                    super::print_json(&serde_json::json!({
                        "device_tokens": records,
                        "device_tokens_count": reported,
                    }));
                }
                OutputFormat::Text => {
                    if records.is_empty() {
                        println!("No device tokens found.");
                        return Ok(());
                    }

                    let mut table = Table::new();
                    table
                        .load_preset(UTF8_FULL)
                        .apply_modifier(UTF8_ROUND_CORNERS)
                        .set_content_arrangement(ContentArrangement::Dynamic);
                    table.set_header(vec!["Token", "Alias", "Tags", "Active"]);

                    for record in &records {
                        table.add_row(vec![
                            super::truncate(&super::cell(&record["device_token"]), 24),
                            super::cell(&record["alias"]),
                            super::cell(&record["tags"]),
                            super::cell(&record["active"]),
                        ]);
                    }

                    println!("{table}");
                    println!(
                        "\nShowing {} of {} device tokens",
                        records.len(),
                        reported
                    );
                }
            }
        }

        TokensAction::Info { token } => {
            let info = api.device_token_info(&token).await?;
            match format {
                OutputFormat::Json => super::print_json(&info),
                OutputFormat::Text => {
                    println!("{}", style(&token).bold());
                    if let Value::Object(fields) = &info {
                        for (key, value) in fields {
                            println!("  {:<20} {}", style(key).dim(), super::cell(value));
                        }
                    }
                }
            }
        }

        TokensAction::Register { token, alias, tags, badge } => {
            let registration = Registration { alias, tags, badge };
            let created = api.register(&token, &registration).await?;
            match format {
                OutputFormat::Json => {
                    super::print_json(&serde_json::json!({ "token": token, "created": created }));
                }
                OutputFormat::Text => {
                    let verb = if created { "Registered" } else { "Updated" };
                    println!("  {} {verb} {token}", style("OK").green().bold());
                }
            }
        }

        TokensAction::Deregister { token } => {
            api.deregister(&token).await?;
            match format {
                OutputFormat::Json => {
                    super::print_json(&serde_json::json!({ "token": token, "deregistered": true }));
                }
                OutputFormat::Text => {
                    println!("  {} Deregistered {token}", style("OK").green().bold());
                }
            }
        }
    }

    Ok(())
}
