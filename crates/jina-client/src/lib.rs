//! HTTP client for the Jina AI search and reader endpoints.
//!
//! Each call is a single GET with a bounded timeout. Upstream failures are returned as a typed
//! [`UpstreamError`] inside a [`ServiceOutcome`] and only flattened to text by
//! [`ServiceResult::from`], so callers decide where the two meet.

pub mod client;
pub mod config;
pub mod error;
pub mod safety;

pub use client::{JinaClient, ServiceOutcome, ServiceResult};
pub use config::JinaConfig;
pub use error::{ClientError, UpstreamError};
