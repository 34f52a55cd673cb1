use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the collection and federated query endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryLarge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// Fields to return.
    #[serde(rename = "return", default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub return_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Sort keys, `-` prefixed for descending.
    #[serde(default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(rename = "passages.fields", default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub passages_fields: Vec<String>,
    #[serde(rename = "passages.count", skip_serializing_if = "Option::is_none")]
    pub passages_count: Option<i64>,
    #[serde(rename = "passages.characters", skip_serializing_if = "Option::is_none")]
    pub passages_characters: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduplicate: Option<bool>,
    #[serde(rename = "deduplicate.field", skip_serializing_if = "Option::is_none")]
    pub deduplicate_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar: Option<bool>,
    #[serde(rename = "similar.document_ids", default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub similar_document_ids: Vec<String>,
    #[serde(rename = "similar.fields", default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub similar_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling_suggestions: Option<bool>,
    /// Federated queries only; filled in from the call options.
    #[serde(default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub collection_ids: Vec<String>,
}

/// Multi-value body fields travel as one comma-joined string.
mod comma_list {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::endpoint::join_list;

    pub fn serialize<S: Serializer>(values: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&join_list(values))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub matching_results: Option<i64>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub results: Vec<QueryResult>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub aggregations: Vec<Value>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub passages: Vec<QueryPassages>,
    pub duplicates_removed: Option<i64>,
    pub session_token: Option<String>,
    pub retrieval_details: Option<RetrievalDetails>,
    pub suggested_query: Option<String>,
}

/// One matching document. Document fields other than the fixed ones land
/// in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub id: Option<String>,
    pub metadata: Option<Value>,
    pub collection_id: Option<String>,
    pub result_metadata: Option<QueryResultMetadata>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResultMetadata {
    pub score: Option<f64>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryPassages {
    pub document_id: Option<String>,
    pub passage_score: Option<f64>,
    pub passage_text: Option<String>,
    pub start_offset: Option<i64>,
    pub end_offset: Option<i64>,
    pub field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalDetails {
    /// `untrained`, `relevancy_training` or `continuous_relevancy_training`.
    pub document_retrieval_strategy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryNoticesResponse {
    pub matching_results: Option<i64>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub results: Vec<QueryNoticesResult>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub aggregations: Vec<Value>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub passages: Vec<QueryPassages>,
    pub duplicates_removed: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryNoticesResult {
    pub id: Option<String>,
    pub metadata: Option<Value>,
    pub collection_id: Option<String>,
    pub result_metadata: Option<QueryResultMetadata>,
    pub code: Option<i64>,
    pub filename: Option<String>,
    pub file_type: Option<String>,
    pub sha1: Option<String>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub notices: Vec<super::Notice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completions {
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub completions: Vec<String>,
}
