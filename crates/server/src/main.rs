use anyhow::Context as _;
use clap::Parser as _;
use mcp_jina_fetch::config::{Cli, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format)?;

    let config = cli.jina_config().context("invalid configuration")?;
    tracing::debug!(?config, "resolved configuration");

    let result = mcp_jina_fetch::serve_until_interrupted(
        mcp_jina_fetch::run(config),
        tokio::signal::ctrl_c(),
    )
    .await
    .context("MCP server failed");

    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "exiting with error");
    }
    result
}
