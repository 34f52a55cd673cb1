use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub collection_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub status: Option<String>,
    pub configuration_id: Option<String>,
    pub language: Option<String>,
    pub document_counts: Option<DocumentCounts>,
    pub disk_usage: Option<CollectionDiskUsage>,
    pub training_status: Option<TrainingStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentCounts {
    pub available: Option<i64>,
    pub processing: Option<i64>,
    pub failed: Option<i64>,
    pub pending: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionDiskUsage {
    pub used_bytes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStatus {
    pub total_examples: Option<i64>,
    pub available: Option<bool>,
    pub processing: Option<bool>,
    pub minimum_queries_added: Option<bool>,
    pub minimum_examples_added: Option<bool>,
    pub sufficient_label_diversity: Option<bool>,
    pub notices: Option<i64>,
    pub successfully_trained: Option<String>,
    pub data_updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCollectionsResponse {
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub collections: Vec<Collection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteCollectionResponse {
    pub collection_id: Option<String>,
    pub status: Option<String>,
}

/// Status of a tokenization or stopword dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDictStatusResponse {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub dict_type: Option<String>,
}
