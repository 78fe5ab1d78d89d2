//! Redaction helpers for error text that ends up in tool results and logs.
//!
//! Tool results are returned to the agent verbatim, so nothing that reaches them may carry the
//! request query string or credentials.

use url::Url;

/// Upper bound on how much of an upstream error body is echoed back.
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Drop credentials, query and fragment from a URL.
#[must_use]
pub fn redact_url(url: &Url) -> String {
    let mut u = url.clone();
    let _ = u.set_username("");
    let _ = u.set_password(None);
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}

/// Drop userinfo from a URL-shaped prefix, leaving everything else as written.
///
/// Unparseable input and URLs without credentials are returned unchanged.
#[must_use]
pub fn strip_credentials(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut u) if !u.username().is_empty() || u.password().is_some() => {
            let _ = u.set_username("");
            let _ = u.set_password(None);
            u.to_string()
        }
        _ => raw.to_string(),
    }
}

/// Render a `reqwest` error and its source chain, without the request URL.
///
/// The caller adds a redacted URL itself; `reqwest` would otherwise print the full URL,
/// including the search query.
#[must_use]
pub fn describe_reqwest_error(e: reqwest::Error) -> String {
    let e = e.without_url();
    let mut msg = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(inner) = source {
        let s = inner.to_string();
        if !msg.contains(&s) {
            msg.push_str(": ");
            msg.push_str(&s);
        }
        source = inner.source();
    }
    msg
}

/// Trim and bound an upstream error body.
#[must_use]
pub fn truncate_body(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut out: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    out.push_str("...");
    out
}
