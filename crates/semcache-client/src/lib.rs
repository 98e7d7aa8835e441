//! Rust SDK for the SemCache semantic caching API.
//!
//! SemCache answers LLM queries from a server-side semantic cache: a query
//! that is similar enough to a previously answered one is served from cache
//! instead of hitting the model again. This crate is a thin typed binding
//! over that HTTP API: one request per call, a bounded wait, and a typed
//! error taxonomy. It deliberately carries no retry or backoff policy;
//! callers layer their own on top of [`ClientError::is_retryable`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use semcache_client::{ClientConfig, SemCacheClient};
//! use semcache_types::models::QueryRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), semcache_types::error::ClientError> {
//!     let config = ClientConfig::new("your-api-key")?
//!         .with_default_project_id("my-project");
//!     let client = SemCacheClient::new(config)?;
//!
//!     let result = client
//!         .query(&QueryRequest {
//!             query: "capital of France?".to_string(),
//!             model: Some("gpt-4".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     println!("{} (cache hit: {})", result.response, result.is_cache_hit);
//!     Ok(())
//! }
//! ```

mod classify;
mod client;
mod config;

pub use client::SemCacheClient;
pub use config::{
    CallOptions, ClientConfig, LogLevel, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL,
    PROJECT_ID_ENV,
};
pub use semcache_types::error::{ClientError, Result};
pub use semcache_types::models::*;

/// Version of this SDK, as reported in the client-identifier header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
