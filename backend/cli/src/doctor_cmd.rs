//! CLI Doctor Command
//!
//! Prints the resolved client configuration, validation findings, and the
//! result of a health probe.

use anyhow::{bail, Result};
use pic2word_client::{ClientConfig, ConversionClient};
use pic2word_config::validate;
use pic2word_logging::redact_url;

use crate::terminal_output::{note_error, note_info, note_success, note_warn};

pub async fn run(config: ClientConfig) -> Result<()> {
    println!("\n🔍 Running pic2word Doctor...\n");

    print_config(&config);

    let report = validate(&config);
    report.log();
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }

    let reachable = report.is_valid() && check_health(config).await;

    println!();
    if !reachable {
        note_error("Some checks failed! Please fix the errors above.");
        bail!("doctor checks failed");
    }
    note_success("All checks passed! Backend is reachable.");
    Ok(())
}

fn print_config(config: &ClientConfig) {
    println!("Configuration:");
    let base_url = if config.has_base_url() { redact_url(&config.base_url) } else { "<relative>".to_string() };
    println!("  base_url     = {base_url}");
    println!("  timeout      = {}s", config.timeout.as_secs());
    println!("  content_type = {}", config.content_type);
    println!("  user_agent   = {}", config.user_agent);
    println!();
}

async fn check_health(config: ClientConfig) -> bool {
    let client = match ConversionClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            note_error(&e.to_string());
            return false;
        }
    };
    match client.health().await {
        Ok(health) if health.is_ok() => {
            note_info(&format!("Health endpoint answered '{}'", health.status));
            true
        }
        Ok(health) => {
            note_warn(&format!("Health endpoint answered '{}'", health.status));
            false
        }
        Err(e) => {
            note_error(&format!("Health check failed: {e}"));
            false
        }
    }
}
