//! # SemCache Types
//!
//! Request/response models and error definitions for the SemCache API.
//!
//! This crate provides the foundational type system for the SemCache SDK:
//!
//! - **`error`** - The typed error taxonomy returned by every client operation
//! - **`models`** - Wire shapes exchanged with the SemCache API
//!
//! All types are designed to be:
//!
//! - **Serializable** via serde for the HTTPS/JSON wire protocol
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ClientError, Result};

// Re-export core model types
pub use models::{
    CacheStats, CacheTestRequest, CacheTestResponse, ChatTurn, ClearCacheRequest,
    ClearCacheResponse, HealthStatus, QueryRequest, QueryResult, SimilarQueriesResponse,
    SimilarQuery, StepStatus, WorkflowStep,
};
