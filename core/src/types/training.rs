use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingQuery {
    pub query_id: Option<String>,
    pub natural_language_query: Option<String>,
    pub filter: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub examples: Vec<TrainingExample>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingDataSet {
    pub environment_id: Option<String>,
    pub collection_id: Option<String>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub queries: Vec<TrainingQuery>,
}
