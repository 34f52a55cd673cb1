use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub environment_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    /// `active`, `pending`, `maintenance` or `resizing`.
    pub status: Option<String>,
    pub read_only: Option<bool>,
    pub size: Option<String>,
    pub requested_size: Option<String>,
    pub index_capacity: Option<IndexCapacity>,
    pub search_status: Option<SearchStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexCapacity {
    pub documents: Option<EnvironmentDocuments>,
    pub disk_usage: Option<DiskUsage>,
    pub collections: Option<CollectionUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentDocuments {
    pub available: Option<i64>,
    pub maximum_allowed: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub used_bytes: Option<i64>,
    pub maximum_allowed_bytes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionUsage {
    pub available: Option<i64>,
    pub maximum_allowed: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStatus {
    pub scope: Option<String>,
    pub status: Option<String>,
    pub status_description: Option<String>,
    pub last_trained: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListEnvironmentsResponse {
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub environments: Vec<Environment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteEnvironmentResponse {
    pub environment_id: Option<String>,
    pub status: Option<String>,
}
