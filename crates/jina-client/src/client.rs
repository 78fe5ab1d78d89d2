//! Search and read calls against the Jina endpoints.

use crate::config::JinaConfig;
use crate::error::UpstreamError;
use crate::safety::{describe_reqwest_error, redact_url, strip_credentials, truncate_body};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Token budget requested from the reader endpoint.
pub const READ_TOKEN_BUDGET: u32 = 20_000;

/// Outcome of one upstream call: the response body, or why there is none.
pub type ServiceOutcome = std::result::Result<String, UpstreamError>;

/// Protocol-facing result of a call.
///
/// Upstream failures are folded into `content` as text; see [`ServiceResult::from`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResult {
    pub content: String,
}

impl From<ServiceOutcome> for ServiceResult {
    fn from(outcome: ServiceOutcome) -> Self {
        match outcome {
            Ok(content) => Self { content },
            Err(e) => Self {
                content: format!("Error querying Jina endpoint: {e}"),
            },
        }
    }
}

/// Client for the search and reader endpoints.
///
/// Holds configuration only; every call builds its own HTTP client so that no connection
/// outlives the call that opened it.
#[derive(Debug, Clone)]
pub struct JinaClient {
    config: JinaConfig,
}

impl JinaClient {
    #[must_use]
    pub fn new(config: JinaConfig) -> Self {
        Self { config }
    }

    /// Run a web search for `keywords`.
    pub async fn search(&self, keywords: &str) -> ServiceOutcome {
        info!(
            keywords = %keywords,
            timeout_secs = self.config.timeout_secs(),
            "searching"
        );
        let target = redact_url(&self.config.search_endpoint);

        let outcome = self.send_search(keywords, &target).await;
        log_outcome("search", &outcome);
        outcome
    }

    /// Fetch `url` through the reader endpoint as markdown.
    ///
    /// `url` is appended to the reader prefix as-is.
    pub async fn read(&self, url: &str) -> ServiceOutcome {
        info!(
            url = %url,
            timeout_secs = self.config.timeout_secs(),
            "reading"
        );
        let request_url = format!("{}{url}", self.config.read_prefix);
        let target = format!("{}{url}", strip_credentials(&self.config.read_prefix));

        let outcome = self.send_read(&request_url, &target).await;
        log_outcome("read", &outcome);
        outcome
    }

    async fn send_search(&self, keywords: &str, target: &str) -> ServiceOutcome {
        let request = self
            .http_client(target)?
            .get(self.config.search_endpoint.clone())
            .query(&[("q", keywords)])
            .header("X-Respond-With", "no-content");
        self.execute(request, target).await
    }

    async fn send_read(&self, request_url: &str, target: &str) -> ServiceOutcome {
        let request = self
            .http_client(target)?
            .get(request_url)
            .header("X-Return-Format", "markdown")
            .header("X-Token-Budget", READ_TOKEN_BUDGET.to_string());
        self.execute(request, target).await
    }

    fn http_client(&self, target: &str) -> Result<reqwest::Client, UpstreamError> {
        reqwest::Client::builder()
            .timeout(self.config.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| UpstreamError::Transport {
                url: target.to_string(),
                detail: describe_reqwest_error(e),
            })
    }

    async fn execute(&self, request: RequestBuilder, target: &str) -> ServiceOutcome {
        let request = match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| self.upstream_error(e, target))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.upstream_error(e, target))?;

        if status.is_success() {
            debug!(status = status.as_u16(), bytes = body.len(), "upstream ok");
            return Ok(body);
        }

        Err(UpstreamError::Status {
            url: target.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body: truncate_body(&body),
        })
    }

    fn upstream_error(&self, e: reqwest::Error, target: &str) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout {
                url: target.to_string(),
                timeout_secs: self.config.timeout_secs(),
            }
        } else {
            UpstreamError::Transport {
                url: target.to_string(),
                detail: describe_reqwest_error(e),
            }
        }
    }
}

fn log_outcome(op: &str, outcome: &ServiceOutcome) {
    if let Err(e) = outcome {
        warn!(op = %op, url = %e.url(), error = %e, "upstream call failed");
    }
}
