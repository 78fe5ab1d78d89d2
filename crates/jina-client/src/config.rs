//! Upstream configuration for the Jina search/reader endpoints.

use crate::error::{ClientError, Result};
use std::time::Duration;
use url::Url;

/// Default search endpoint (`GET <endpoint>?q=<keywords>`).
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://s.jina.ai/";

/// Default reader prefix (`GET <prefix><url>`).
pub const DEFAULT_READ_PREFIX: &str = "https://r.jina.ai/";

/// Default per-call timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process-wide client configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct JinaConfig {
    /// Bearer credential. When absent, no `Authorization` header is sent.
    pub api_key: Option<String>,
    /// Upper bound for a single upstream call (connect + response body).
    pub timeout: Duration,
    pub search_endpoint: Url,
    /// Prefix the target URL is appended to verbatim.
    pub read_prefix: String,
}

impl JinaConfig {
    /// Build a config against the public Jina endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if `timeout_secs` is zero.
    pub fn new(api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        if timeout_secs == 0 {
            return Err(ClientError::Config(
                "timeout must be a positive number of seconds".to_string(),
            ));
        }

        let search_endpoint = Url::parse(DEFAULT_SEARCH_ENDPOINT)
            .map_err(|e| ClientError::Config(format!("invalid default search endpoint: {e}")))?;

        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout: Duration::from_secs(timeout_secs),
            search_endpoint,
            read_prefix: DEFAULT_READ_PREFIX.to_string(),
        })
    }

    /// Override the search endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an absolute `http(s)` URL.
    pub fn with_search_endpoint(mut self, endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint).map_err(|e| {
            ClientError::Config(format!("Invalid search endpoint '{endpoint}': {e}"))
        })?;
        check_http_scheme(&url)?;
        self.search_endpoint = url;
        Ok(self)
    }

    /// Override the reader prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if `prefix` does not parse as an absolute `http(s)` URL.
    pub fn with_read_prefix(mut self, prefix: &str) -> Result<Self> {
        let url = Url::parse(prefix)
            .map_err(|e| ClientError::Config(format!("Invalid read prefix '{prefix}': {e}")))?;
        check_http_scheme(&url)?;
        self.read_prefix = prefix.to_string();
        Ok(self)
    }

    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }
}

impl std::fmt::Debug for JinaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinaConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("search_endpoint", &self.search_endpoint.as_str())
            .field("read_prefix", &self.read_prefix)
            .finish()
    }
}

fn check_http_scheme(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ClientError::Config(format!(
            "unsupported URL scheme '{other}' (expected http or https)"
        ))),
    }
}
