//! Command-line / environment configuration.

use crate::error::{Result, ServerError};
use clap::{Parser, ValueEnum};
use mcp_jina_client::JinaConfig;
use mcp_jina_client::config::{DEFAULT_READ_PREFIX, DEFAULT_SEARCH_ENDPOINT};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// MCP stdio server for Jina AI web search and URL reading.
#[derive(Debug, Clone, Parser)]
#[command(name = "mcp-jina-fetch", version, about)]
pub struct Cli {
    /// Jina API key, sent as a bearer token.
    #[arg(long, env = "JINA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        env = "JINA_TIMEOUT",
        default_value_t = mcp_jina_client::config::DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    #[arg(long, env = "JINA_SEARCH_ENDPOINT", default_value = DEFAULT_SEARCH_ENDPOINT, hide = true)]
    pub search_endpoint: String,

    #[arg(long, env = "JINA_READ_PREFIX", default_value = DEFAULT_READ_PREFIX, hide = true)]
    pub read_prefix: String,

    /// Log level filter (overridden by `RUST_LOG`).
    #[arg(long, env = "JINA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "JINA_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Build the upstream client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero or an endpoint override is not an `http(s)` URL.
    pub fn jina_config(&self) -> Result<JinaConfig> {
        let cfg = JinaConfig::new(self.api_key.clone(), self.timeout)?
            .with_search_endpoint(&self.search_endpoint)?
            .with_read_prefix(&self.read_prefix)?;
        Ok(cfg)
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// stdout carries the protocol, so nothing else may write to it.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already installed.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| ServerError::Config(format!("invalid log level '{level}': {e}")))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    let res = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    res.map_err(|e| ServerError::Startup(format!("failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mcp-jina-fetch").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&["--api-key", "k", "--timeout", "30", "--log-format", "json"])
            .expect("parse");
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.log_format, LogFormat::Json);

        let cfg = cli.jina_config().expect("config");
        assert_eq!(cfg.timeout_secs(), 30);
    }

    #[test]
    fn malformed_or_zero_timeout_is_rejected() {
        assert!(parse(&["--timeout", "abc"]).is_err());
        assert!(parse(&["--timeout", "0"]).is_err());
        assert!(parse(&["--timeout", "-5"]).is_err());
    }

    #[test]
    fn bad_endpoint_override_is_a_config_error() {
        let cli = parse(&["--timeout", "5", "--read-prefix", "file:///tmp/"]).expect("parse");
        let err = cli.jina_config().unwrap_err();
        assert!(matches!(err, ServerError::Config(_)), "{err}");
    }
}
