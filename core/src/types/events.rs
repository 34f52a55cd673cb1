use serde::{Deserialize, Serialize};

/// Click event data; the `data` member of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub environment_id: String,
    pub session_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_rank: Option<i64>,
    pub collection_id: String,
    pub document_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub data: Option<EventData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricResponse {
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub aggregations: Vec<MetricAggregation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricAggregation {
    pub interval: Option<String>,
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub results: Vec<MetricAggregationResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricAggregationResult {
    /// Interval start as an RFC 3339 timestamp.
    pub key_as_string: Option<String>,
    /// Interval start in epoch milliseconds.
    pub key: Option<i64>,
    pub matching_results: Option<i64>,
    pub event_rate: Option<f64>,
}

/// Response of the top query tokens metric, keyed by token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTokenResponse {
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub aggregations: Vec<MetricTokenAggregation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTokenAggregation {
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub results: Vec<MetricTokenAggregationResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTokenAggregationResult {
    /// The query token.
    pub key: Option<String>,
    pub matching_results: Option<i64>,
    pub event_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQueryResponse {
    pub matching_results: Option<i64>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub results: Vec<LogQueryResponseResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQueryResponseResult {
    pub environment_id: Option<String>,
    pub customer_id: Option<String>,
    /// `query` or `event`.
    pub document_type: Option<String>,
    pub natural_language_query: Option<String>,
    pub query_id: Option<String>,
    pub session_token: Option<String>,
    pub collection_id: Option<String>,
    pub display_rank: Option<i64>,
    pub document_id: Option<String>,
    pub event_type: Option<String>,
    pub result_type: Option<String>,
    pub created_timestamp: Option<String>,
    pub client_timestamp: Option<String>,
}
