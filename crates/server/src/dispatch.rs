//! Tool call dispatch.
//!
//! Validates arguments, routes to the upstream client, and turns the outcome into a single
//! text content item. This is the one place where upstream failures are flattened into
//! successful results.

use crate::error::InvocationError;
use crate::registry::{self, ToolName};
use async_trait::async_trait;
use mcp_jina_client::{JinaClient, ServiceOutcome, ServiceResult};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;
use tracing::debug;

/// Upstream operations the dispatcher routes to.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn search(&self, keywords: &str) -> ServiceOutcome;
    async fn read(&self, url: &str) -> ServiceOutcome;
}

#[async_trait]
impl Upstream for JinaClient {
    async fn search(&self, keywords: &str) -> ServiceOutcome {
        JinaClient::search(self, keywords).await
    }

    async fn read(&self, url: &str) -> ServiceOutcome {
        JinaClient::read(self, url).await
    }
}

/// Stateless router from tool invocations to upstream calls.
pub struct Dispatcher<U> {
    upstream: U,
}

impl<U: Upstream> Dispatcher<U> {
    #[must_use]
    pub fn new(upstream: U) -> Self {
        Self { upstream }
    }

    #[must_use]
    pub fn list_tools(&self) -> Vec<Tool> {
        registry::list_tools()
    }

    /// Execute one tool call.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool is unknown, its required argument is missing, empty or not
    /// a string, or the reply cannot be serialized. Upstream failures are not errors here.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<CallToolResult, InvocationError> {
        let tool =
            ToolName::parse(name).ok_or_else(|| InvocationError::UnknownTool(name.to_string()))?;
        let arg = required_string(arguments, tool.required_argument())?;
        debug!(tool = %tool, "dispatching tool call");

        let outcome = match tool {
            ToolName::Search => self.upstream.search(arg).await,
            ToolName::Read => self.upstream.read(arg).await,
        };

        let text = render(&ServiceResult::from(outcome))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

fn required_string<'a>(
    arguments: Option<&'a JsonObject>,
    name: &'static str,
) -> Result<&'a str, InvocationError> {
    match arguments.and_then(|args| args.get(name)) {
        None | Some(Value::Null) => Err(InvocationError::MissingArgument(name)),
        Some(Value::String(s)) if s.is_empty() => Err(InvocationError::MissingArgument(name)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(InvocationError::InvalidArgument { name }),
    }
}

/// Pretty JSON (2-space indent); `serde_json` leaves non-ASCII unescaped.
fn render(result: &ServiceResult) -> Result<String, InvocationError> {
    serde_json::to_string_pretty(result).map_err(|e| InvocationError::Internal(e.to_string()))
}
