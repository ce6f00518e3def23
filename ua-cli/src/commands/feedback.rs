//! Feedback command.

use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};

use ua_api::endpoints::feedback::parse_utc_timestamp;
use ua_core::config::AppConfig;
use ua_core::error::AirshipResult;
use crate::OutputFormat;

pub async fn run(config: &AppConfig, since: &str, format: OutputFormat) -> AirshipResult<()> {
    let since = parse_utc_timestamp(since)?;
    let api = super::create_api_client(config)?;
    let entries = api.feedback(since).await?;

    match format {
        OutputFormat::Json => super::print_json(&serde_json::to_value(&entries)?),
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No device tokens marked inactive since {}.", since.to_rfc3339());
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Token", "Alias", "Inactive since (UTC)"]);

            for entry in &entries {
                table.add_row(vec![
                    super::truncate(entry.device_token.as_deref().unwrap_or("-"), 24),
                    entry.alias.clone().unwrap_or_else(|| "-".to_string()),
                    entry.marked_inactive_on.format("%Y-%m-%d %H:%M:%S").to_string(),
                ]);
            }

            println!("{table}");
            println!("\n{} inactive device tokens", entries.len());
        }
    }
    Ok(())
}
