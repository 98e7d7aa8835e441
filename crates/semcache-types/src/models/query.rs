use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QueryRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ChatTurn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResult {
    pub response: String,
    pub is_cache_hit: bool,
    /// Present on cache hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    /// Present on cache misses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_omitted_from_wire_format() {
        let request = QueryRequest {
            query: "capital of France?".to_string(),
            model: Some("gpt-4".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"query": "capital of France?", "model": "gpt-4"})
        );
    }

    #[test]
    fn test_result_decodes_hit_and_miss() {
        let hit: QueryResult = serde_json::from_value(serde_json::json!({
            "response": "Paris",
            "is_cache_hit": true,
            "similarity_score": 0.97
        }))
        .unwrap();
        assert!(hit.is_cache_hit);
        assert_eq!(hit.similarity_score, Some(0.97));
        assert!(hit.estimated_tokens.is_none());

        let miss: QueryResult = serde_json::from_value(serde_json::json!({
            "response": "Paris",
            "is_cache_hit": false,
            "estimated_tokens": 12,
            "estimated_cost": 0.0004
        }))
        .unwrap();
        assert!(!miss.is_cache_hit);
        assert_eq!(miss.estimated_tokens, Some(12));
        assert!(miss.similarity_score.is_none());
    }
}
