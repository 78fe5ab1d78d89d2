//! Test helpers shared by the workspace crates.
//!
//! The main piece is [`MockUpstream`]: a local HTTP server that stands in for the Jina endpoints,
//! records every request it receives and answers with a canned reply.

use anyhow::Context as _;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse as _, Response};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How the mock answers every request.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// `200 OK` with the given body.
    Ok(String),
    /// Arbitrary status with the given body.
    Status(u16, String),
    /// Sleep before answering `200 OK`; used to trigger client timeouts.
    Delayed(Duration, String),
}

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw (still percent-encoded) query string.
    pub query: Option<String>,
    /// Header names are lowercase.
    pub headers: HashMap<String, String>,
}

impl RecordedRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

struct MockState {
    reply: MockReply,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A running mock upstream. The server task is aborted on drop.
pub struct MockUpstream {
    base_url: String,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockUpstream {
    /// Bind an ephemeral localhost port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(reply: MockReply) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock upstream")?;
        let addr = listener.local_addr().context("mock upstream local addr")?;

        let state = Arc::new(MockState {
            reply,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(record).with_state(state.clone());
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            state,
            task,
        })
    }

    /// Absolute URL for `path` on this mock (`path` should start with `/`).
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Snapshot of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let headers = headers
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    state.requests.lock().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
    });

    match &state.reply {
        MockReply::Ok(body) => (StatusCode::OK, body.clone()).into_response(),
        MockReply::Status(code, body) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body.clone()).into_response()
        }
        MockReply::Delayed(delay, body) => {
            tokio::time::sleep(*delay).await;
            (StatusCode::OK, body.clone()).into_response()
        }
    }
}

/// Decode a single `application/x-www-form-urlencoded` query value.
///
/// Returns `None` if `key` is absent.
#[must_use]
pub fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
