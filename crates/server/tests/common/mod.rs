use anyhow::Context as _;
use serde_json::{Value, json};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

const JINA_ENV: [&str; 6] = [
    "JINA_API_KEY",
    "JINA_TIMEOUT",
    "JINA_SEARCH_ENDPOINT",
    "JINA_READ_PREFIX",
    "JINA_LOG_LEVEL",
    "JINA_LOG_FORMAT",
];

/// Build a command for the server binary with a clean `JINA_*` environment.
pub fn server_command(env: &[(&str, &str)]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mcp-jina-fetch"));
    for key in JINA_ENV {
        cmd.env_remove(key);
    }
    cmd.env_remove("RUST_LOG");
    for (k, v) in env {
        cmd.env(k, v);
    }
    cmd.kill_on_drop(true);
    cmd
}

/// Run the server to completion with stdin closed and return its exit status.
pub async fn run_to_exit(env: &[(&str, &str)]) -> anyhow::Result<ExitStatus> {
    let mut child = server_command(env)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn server")?;
    tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .context("timeout waiting for server exit")?
        .context("wait for server")
}

/// Minimal line-delimited JSON-RPC client for the server's stdio transport.
pub struct McpStdioSession {
    _child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl McpStdioSession {
    /// Spawn the server and complete the MCP handshake.
    pub async fn connect(env: &[(&str, &str)]) -> anyhow::Result<Self> {
        let mut child = server_command(env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .context("spawn server")?;
        let stdin = child.stdin.take().context("missing child stdin")?;
        let stdout = child.stdout.take().context("missing child stdout")?;

        let mut session = Self {
            _child: child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
        };

        let init = session
            .request(
                0,
                "initialize",
                json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "mcp-jina-fetch-integration-tests", "version": "0" }
                }),
                Duration::from_secs(10),
            )
            .await?;
        anyhow::ensure!(init.get("result").is_some(), "initialize failed: {init}");

        session
            .send(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await?;
        Ok(session)
    }

    /// Send a request and wait for the response carrying the same id.
    pub async fn request(
        &mut self,
        id: u64,
        method: &str,
        params: Value,
        timeout_dur: Duration,
    ) -> anyhow::Result<Value> {
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        }))
        .await?;

        tokio::time::timeout(timeout_dur, self.read_response(id))
            .await
            .with_context(|| format!("timeout waiting for response to {method}"))?
    }

    async fn send(&mut self, msg: &Value) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(msg)?;
        line.push(b'\n');
        self.stdin.write_all(&line).await.context("write stdin")?;
        self.stdin.flush().await.context("flush stdin")?;
        Ok(())
    }

    async fn read_response(&mut self, id: u64) -> anyhow::Result<Value> {
        while let Some(line) = self.stdout.next_line().await.context("read stdout")? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let msg: Value = serde_json::from_str(line).context("parse server message")?;
            // Skip notifications and server-initiated requests.
            if msg.get("id") == Some(&json!(id)) && msg.get("method").is_none() {
                return Ok(msg);
            }
        }
        anyhow::bail!("server closed stdout before responding to id {id}")
    }
}

/// Extract `result.content[0].text` from a `tools/call` response.
pub fn tool_call_text(msg: &Value) -> anyhow::Result<String> {
    msg.get("result")
        .and_then(|r| r.get("content"))
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .and_then(|c| c.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .with_context(|| format!("tools/call missing result.content[0].text: {msg}"))
}
