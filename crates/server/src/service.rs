//! rmcp server handler wiring the dispatcher to the protocol.

use crate::dispatch::{Dispatcher, Upstream};
use crate::error::SERVER_NAME;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use std::sync::Arc;
use tracing::{debug, warn};

const INSTRUCTIONS: &str = "Use `search` to look things up on the web and `read` to fetch a URL as markdown.";

/// MCP service exposing the `search` and `read` tools.
pub struct JinaMcpService<U> {
    dispatcher: Arc<Dispatcher<U>>,
}

impl<U> Clone for JinaMcpService<U> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<U: Upstream> JinaMcpService<U> {
    #[must_use]
    pub fn new(dispatcher: Dispatcher<U>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl<U: Upstream + 'static> ServerHandler for JinaMcpService<U> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = SERVER_NAME.into();
        info.server_info.version = env!("CARGO_PKG_VERSION").into();
        info.instructions = Some(INSTRUCTIONS.into());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self.dispatcher.list_tools();
        debug!("Listing {} tools", tools.len());
        Ok(ListToolsResult {
            tools,
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name = request.name.as_ref();
        self.dispatcher
            .call_tool(name, request.arguments.as_ref())
            .await
            .map_err(|e| {
                warn!(tool = %name, error = %e, "tool call rejected");
                ErrorData::from(e)
            })
    }
}
