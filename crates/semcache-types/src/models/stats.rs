use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CacheStats {
    pub project_id: String,
    pub total_queries: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Fraction of queries answered from cache (0.0 - 1.0).
    pub hit_rate: f64,
    #[serde(default)]
    pub tokens_saved: u64,
    #[serde(default)]
    pub cost_saved: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_response_time_ms: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClearCacheRequest {
    pub project_id: String,
    /// Restrict clearing to entries produced by one model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Restrict clearing to entries older than this many hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub older_than_hours: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClearCacheResponse {
    pub project_id: String,
    pub entries_cleared: u64,
}
