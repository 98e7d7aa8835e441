//! Client configuration and per-call options.

use semcache_types::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

/// Production endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.semcache.dev";

/// Environment variable supplying the API key.
pub const API_KEY_ENV: &str = "SEMCACHE_API_KEY";
/// Environment variable supplying the default project id.
pub const PROJECT_ID_ENV: &str = "SEMCACHE_PROJECT_ID";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SEMCACHE_BASE_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Client-side log verbosity threshold.
///
/// Levels form a total order (`Debug < Info < Warn < Error < None`); a
/// message is emitted when its level is at or above the configured
/// threshold. `None` silences the client entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    None,
}

impl LogLevel {
    /// Whether a message emitted at `level` passes this threshold.
    pub fn allows(self, level: LogLevel) -> bool {
        level != LogLevel::None && level >= self
    }
}

/// Per-call overrides for a single client operation.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Project id to use for this call, overriding the configured default.
    pub project_id: Option<String>,
    /// Deadline for this call, overriding the configured timeout.
    pub timeout: Option<Duration>,
}

/// Client configuration.
///
/// Immutable after construction except `default_project_id`, a single
/// mutable cell with last-write-wins semantics: callers may update it
/// between calls, but an already-dispatched call keeps the value it
/// resolved. No ordering guarantee beyond that is provided.
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    default_project_id: RwLock<Option<String>>,
    timeout: Duration,
    log_level: LogLevel,
}

impl ClientConfig {
    /// Create a configuration with the given credential and defaults for
    /// everything else.
    ///
    /// Fails with [`ClientError::Validation`] when the credential is empty.
    /// No network call is made.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClientError::Validation {
                message: "API key must not be empty".to_string(),
                details: None,
            });
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_project_id: RwLock::new(None),
            timeout: DEFAULT_TIMEOUT,
            log_level: LogLevel::default(),
        })
    }

    /// Build a configuration from `SEMCACHE_API_KEY`, `SEMCACHE_PROJECT_ID`
    /// and `SEMCACHE_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ClientError::Validation {
                message: format!("{API_KEY_ENV} is not set"),
                details: None,
            })?;
        let config = Self::new(api_key)?;

        if let Ok(project_id) = std::env::var(PROJECT_ID_ENV) {
            if !project_id.trim().is_empty() {
                config.set_default_project_id(Some(project_id));
            }
        }

        if let Ok(raw) = std::env::var(BASE_URL_ENV) {
            let base_url = raw.trim().trim_end_matches('/').to_string();
            if base_url.is_empty() || url::Url::parse(&base_url).is_err() {
                tracing::warn!("{} is not a valid URL, using default", BASE_URL_ENV);
                return Ok(config);
            }
            return Ok(Self { base_url, ..config });
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_project_id(self, project_id: impl Into<String>) -> Self {
        self.set_default_project_id(Some(project_id.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Current default project id (last write wins).
    pub fn default_project_id(&self) -> Option<String> {
        self.default_project_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the default project id. Calls already in flight keep the
    /// value they resolved at dispatch time.
    pub fn set_default_project_id(&self, project_id: Option<String>) {
        let mut cell = self
            .default_project_id
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *cell = project_id;
    }
}

// The credential must never reach log output.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("default_project_id", &self.default_project_id())
            .field("timeout", &self.timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}
