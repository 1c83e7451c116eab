use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use pic2word_client::ClientConfig;

/// Flags shared by every subcommand. They override the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Base URL of the conversion API, e.g. http://localhost:8080/api [env: PIC2WORD_API_URL]
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds [env: PIC2WORD_TIMEOUT_SECS]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Also write daily-rolling NDJSON logs into this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

/// Environment first, then command-line overrides.
pub fn resolve(args: &GlobalArgs) -> Result<ClientConfig> {
    resolve_with(args, &std::env::vars().collect())
}

fn resolve_with(args: &GlobalArgs, env: &HashMap<String, String>) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env_map(env).context("Failed to load configuration from environment")?;
    if let Some(api_url) = &args.api_url {
        config = config.with_base_url(api_url.as_str());
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment() {
        let env: HashMap<String, String> = [
            ("PIC2WORD_API_URL".to_string(), "http://from-env/api".to_string()),
            ("PIC2WORD_TIMEOUT_SECS".to_string(), "30".to_string()),
        ]
        .into_iter()
        .collect();
        let args = GlobalArgs {
            api_url: Some("http://from-flag:9000/api/".into()),
            timeout: Some(120),
            ..Default::default()
        };
        let config = resolve_with(&args, &env).unwrap();
        assert_eq!(config.base_url, "http://from-flag:9000/api");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn environment_used_without_flags() {
        let env: HashMap<String, String> =
            [("PIC2WORD_API_URL".to_string(), "http://from-env/api".to_string())].into_iter().collect();
        let config = resolve_with(&GlobalArgs::default(), &env).unwrap();
        assert_eq!(config.base_url, "http://from-env/api");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn bad_env_timeout_is_reported() {
        let env: HashMap<String, String> =
            [("PIC2WORD_TIMEOUT_SECS".to_string(), "abc".to_string())].into_iter().collect();
        assert!(resolve_with(&GlobalArgs::default(), &env).is_err());
    }
}
