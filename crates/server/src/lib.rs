//! MCP stdio server exposing Jina AI web search (`search`) and URL reading (`read`) as tools.
//!
//! The binary is a thin wrapper around [`run`]; the pieces are public so they can be embedded
//! or tested without spawning a process.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod service;

use crate::dispatch::Dispatcher;
use crate::error::{Result, ServerError};
use crate::service::JinaMcpService;
use mcp_jina_client::{JinaClient, JinaConfig};
use rmcp::ServiceExt as _;
use std::future::Future;
use tracing::info;

/// Serve the MCP protocol on stdin/stdout until the client disconnects.
///
/// # Errors
///
/// Returns an error if the MCP handshake fails or the transport terminates abnormally.
pub async fn run(config: JinaConfig) -> Result<()> {
    info!(
        timeout_secs = config.timeout_secs(),
        api_key_set = config.api_key.is_some(),
        "starting {}",
        error::SERVER_NAME
    );

    let service = JinaMcpService::new(Dispatcher::new(JinaClient::new(config)));
    let running = service
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServerError::Startup(format!("MCP initialization failed: {e}")))?;

    let reason = running
        .waiting()
        .await
        .map_err(|e| ServerError::Runtime(format!("MCP service task failed: {e}")))?;
    info!(?reason, "transport closed");
    Ok(())
}

/// Drive `server` until it finishes or `interrupt` resolves.
///
/// An interrupt ends the process cleanly; failing to listen for one is an error, not a
/// shutdown request.
///
/// # Errors
///
/// Returns the server's error, or a startup error if the interrupt listener fails.
pub async fn serve_until_interrupted<F, S>(server: F, interrupt: S) -> Result<()>
where
    F: Future<Output = Result<()>>,
    S: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        res = server => res,
        signal = interrupt => match signal {
            Ok(()) => {
                info!("received interrupt, shutting down");
                Ok(())
            }
            Err(e) => Err(ServerError::Startup(format!(
                "failed to listen for interrupt signal: {e}"
            ))),
        },
    }
}
