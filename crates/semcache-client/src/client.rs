use crate::classify::{classify, parse_body};
use crate::config::{CallOptions, ClientConfig, LogLevel};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use semcache_types::error::{ClientError, Result};
use semcache_types::models::{
    CacheStats, CacheTestRequest, CacheTestResponse, ClearCacheRequest, ClearCacheResponse,
    HealthStatus, QueryRequest, QueryResult, SimilarQueriesResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Header naming the SDK and its version, sent on every request.
const CLIENT_HEADER: &str = "x-client";
const CLIENT_IDENTIFIER: &str = concat!("semcache-rust/", env!("CARGO_PKG_VERSION"));

/// Client for the SemCache API.
///
/// One outbound HTTP exchange per operation, bounded by a cancellation
/// deadline. Calls may be issued concurrently; each owns its own deadline
/// and shares nothing with siblings beyond the connection pool.
pub struct SemCacheClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SemCacheClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| ClientError::Network {
                message: format!("Failed to build HTTP client: {err}"),
            })?;
        Ok(Self { http, config })
    }

    /// Construct from `SEMCACHE_API_KEY` / `SEMCACHE_PROJECT_ID` /
    /// `SEMCACHE_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current default project id.
    pub fn default_project_id(&self) -> Option<String> {
        self.config.default_project_id()
    }

    /// Replace the default project id (last write wins). Does not affect
    /// calls already dispatched.
    pub fn set_default_project_id(&self, project_id: Option<String>) {
        self.config.set_default_project_id(project_id);
    }

    /// Answer a query from the semantic cache, falling through to the
    /// configured model on a miss.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResult> {
        self.query_with_options(request, &CallOptions::default())
            .await
    }

    pub async fn query_with_options(
        &self,
        request: &QueryRequest,
        options: &CallOptions,
    ) -> Result<QueryResult> {
        self.execute(Method::POST, "/v1/cache/query", Some(request), options)
            .await
    }

    /// Dry-run the cache pipeline for a project, returning per-step
    /// diagnostics alongside the usual result fields.
    pub async fn test_cache(&self, request: &CacheTestRequest) -> Result<CacheTestResponse> {
        self.test_cache_with_options(request, &CallOptions::default())
            .await
    }

    pub async fn test_cache_with_options(
        &self,
        request: &CacheTestRequest,
        options: &CallOptions,
    ) -> Result<CacheTestResponse> {
        if request.project_id.trim().is_empty() {
            return Err(ClientError::Validation {
                message: "project_id is required for cache tests".to_string(),
                details: None,
            });
        }
        self.execute(Method::POST, "/v1/cache/test", Some(request), options)
            .await
    }

    /// Cache statistics for a project.
    ///
    /// The effective project id is the explicit argument, else the per-call
    /// override, else the configured default.
    pub async fn cache_stats(&self, project_id: Option<&str>) -> Result<CacheStats> {
        self.cache_stats_with_options(project_id, &CallOptions::default())
            .await
    }

    pub async fn cache_stats_with_options(
        &self,
        project_id: Option<&str>,
        options: &CallOptions,
    ) -> Result<CacheStats> {
        let project_id = self.resolve_project_id(project_id, options)?;
        let path = format!("/v1/cache/projects/{}/stats", project_id);
        self.execute::<(), _>(Method::GET, &path, None, options)
            .await
    }

    pub async fn clear_cache(&self, request: &ClearCacheRequest) -> Result<ClearCacheResponse> {
        self.clear_cache_with_options(request, &CallOptions::default())
            .await
    }

    pub async fn clear_cache_with_options(
        &self,
        request: &ClearCacheRequest,
        options: &CallOptions,
    ) -> Result<ClearCacheResponse> {
        self.execute(Method::POST, "/v1/cache/clear", Some(request), options)
            .await
    }

    /// Cached queries semantically close to `query`, scoped to a project
    /// resolved with the same rule as [`Self::cache_stats`].
    pub async fn find_similar_queries(
        &self,
        query: &str,
        project_id: Option<&str>,
    ) -> Result<SimilarQueriesResponse> {
        self.find_similar_queries_with_options(query, project_id, &CallOptions::default())
            .await
    }

    pub async fn find_similar_queries_with_options(
        &self,
        query: &str,
        project_id: Option<&str>,
        options: &CallOptions,
    ) -> Result<SimilarQueriesResponse> {
        let project_id = self.resolve_project_id(project_id, options)?;
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("query", query)
            .finish();
        let path = format!("/v1/cache/projects/{}/similar?{}", project_id, encoded);
        self.execute::<(), _>(Method::GET, &path, None, options)
            .await
    }

    /// Service liveness. Requires no project id.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.execute::<(), _>(Method::GET, "/health", None, &CallOptions::default())
            .await
    }

    fn resolve_project_id(&self, explicit: Option<&str>, options: &CallOptions) -> Result<String> {
        explicit
            .map(str::to_string)
            .or_else(|| options.project_id.clone())
            .or_else(|| self.config.default_project_id())
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ClientError::Validation {
                message: "No project id given and no default_project_id configured".to_string(),
                details: None,
            })
    }

    /// Shared dispatch path: build the request, run it under the resolved
    /// deadline, then classify or decode the response.
    async fn execute<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &CallOptions,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url(), path);
        let timeout = options.timeout.unwrap_or_else(|| self.config.timeout());

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key()))
            .header(CLIENT_HEADER, CLIENT_IDENTIFIER);
        if let Some(body) = body {
            request = request.json(body);
        }

        self.log(LogLevel::Debug, &format!("sending {} {}", method, path));
        let started = Instant::now();

        let outcome = tokio::time::timeout(timeout, async {
            let response = request.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, headers, text))
        })
        .await;

        let (status, headers, text) = match outcome {
            Ok(Ok(exchange)) => exchange,
            Ok(Err(err)) => {
                let err = transport_error(&err, timeout);
                self.log(LogLevel::Error, &format!("{} {} failed: {}", method, path, err));
                return Err(err);
            }
            // Deadline expired: the in-flight transport future was dropped,
            // cancelling the request.
            Err(_) => {
                let err = timeout_error(timeout);
                self.log(LogLevel::Error, &format!("{} {} failed: {}", method, path, err));
                return Err(err);
            }
        };

        let body = parse_body(&text);

        if !status.is_success() {
            let err = classify(status, &body, &headers);
            let level = match err {
                ClientError::Server { .. } | ClientError::Network { .. } => LogLevel::Error,
                _ => LogLevel::Warn,
            };
            self.log(
                level,
                &format!("{} {} returned {}: {}", method, path, status.as_u16(), err),
            );
            return Err(err);
        }

        self.log(
            LogLevel::Debug,
            &format!(
                "{} {} returned {} in {}ms",
                method,
                path,
                status.as_u16(),
                started.elapsed().as_millis()
            ),
        );

        serde_json::from_value(body.clone()).map_err(|err| ClientError::Api {
            message: format!("Failed to decode response body: {err}"),
            status: status.as_u16(),
            code: "invalid_response".to_string(),
            details: Some(body),
        })
    }

    // Gated by the configured threshold; request/response lines only, the
    // credential never reaches log output.
    fn log(&self, level: LogLevel, message: &str) {
        if !self.config.log_level().allows(level) {
            return;
        }
        match level {
            LogLevel::Debug => tracing::debug!(target: "semcache", "{}", message),
            LogLevel::Info => tracing::info!(target: "semcache", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "semcache", "{}", message),
            LogLevel::Error => tracing::error!(target: "semcache", "{}", message),
            LogLevel::None => {}
        }
    }
}

fn timeout_error(timeout: Duration) -> ClientError {
    ClientError::Timeout {
        message: format!("Request timed out after {}ms", timeout.as_millis()),
    }
}

fn transport_error(err: &reqwest::Error, timeout: Duration) -> ClientError {
    // A transport-level timeout is still a timeout, not a generic failure
    if err.is_timeout() {
        timeout_error(timeout)
    } else {
        ClientError::Network {
            message: err.to_string(),
        }
    }
}
