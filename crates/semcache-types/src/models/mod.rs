//! Wire shapes exchanged with the SemCache API.
//!
//! All shapes are transient serde values scoped to a single call; nothing
//! here is owned, mutated or persisted by the client.

mod health;
mod query;
mod similar;
mod stats;

// Re-export all models
pub use health::HealthStatus;
pub use query::{ChatTurn, QueryRequest, QueryResult};
pub use similar::{SimilarQueriesResponse, SimilarQuery};
pub use stats::{CacheStats, ClearCacheRequest, ClearCacheResponse};
pub use test::{CacheTestRequest, CacheTestResponse, StepStatus, WorkflowStep};
