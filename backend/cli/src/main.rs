mod config;
mod convert_cmd;
mod doctor_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pic2word_client::{ClientConfig, ConversionClient, HealthStatus, DEFAULT_FORMAT, DEFAULT_LANGUAGE};
use pic2word_logging::{init_logger, init_logger_with_file, LogFormat};

use config::GlobalArgs;

#[derive(Parser)]
#[command(name = "pic2word")]
#[command(about = "Convert images into editable documents via a pic2word backend")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and save the converted document
    Convert {
        /// Image file to convert
        image: PathBuf,
        /// Output document format
        #[arg(short, long, default_value = DEFAULT_FORMAT)]
        format: String,
        /// Recognition language
        #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
        language: String,
        /// Where to write the document (defaults to the server-suggested name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List output formats supported by the backend
    Formats,
    /// List recognition languages supported by the backend
    Languages,
    /// Check that the backend is up
    Health,
    /// Show resolved configuration and validation findings
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.global.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            init_logger_with_file(dir, &cli.global.log_level);
        }
        None => {
            let format = if cli.global.json_logs { LogFormat::Json } else { LogFormat::Pretty };
            init_logger(&cli.global.log_level, format);
        }
    }

    let config = config::resolve(&cli.global)?;

    match cli.command {
        Commands::Convert { image, format, language, output } => {
            let client = build_client(config)?;
            convert_cmd::run(&client, image, format, language, output).await
        }
        Commands::Formats => {
            let client = build_client(config)?;
            let formats = client.get_supported_formats().await.context("Failed to fetch formats")?;
            println!("{}", serde_json::to_string_pretty(&formats)?);
            Ok(())
        }
        Commands::Languages => {
            let client = build_client(config)?;
            let languages = client.get_supported_languages().await.context("Failed to fetch languages")?;
            println!("{}", serde_json::to_string_pretty(&languages)?);
            Ok(())
        }
        Commands::Health => {
            let client = build_client(config)?;
            let health = client.health().await.context("Health check failed")?;
            report_health(&health)
        }
        Commands::Doctor => doctor_cmd::run(config).await,
    }
}

fn build_client(config: ClientConfig) -> Result<ConversionClient> {
    ConversionClient::new(config).context("Failed to create conversion client")
}

/// A non-"ok" status is a failure so the process exits non-zero.
fn report_health(health: &HealthStatus) -> Result<()> {
    if !health.is_ok() {
        terminal_output::note_warn(&format!("Backend reported status '{}'", health.status));
        bail!("backend is unhealthy: {}", health.status);
    }
    terminal_output::note_success(&format!("Backend is healthy ({})", health.status));
    Ok(())
}
