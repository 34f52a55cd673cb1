use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Notice;

/// Document conversion and enrichment pipeline of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Per-format conversion settings (pdf, word, html, json_normalizations...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichments: Option<Vec<Enrichment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalizations: Option<Vec<NormalizationOperation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub destination_field: String,
    pub source_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    /// Enrichment name, e.g. `natural_language_understanding`.
    pub enrichment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_downstream_errors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationOperation {
    /// `copy`, `move`, `merge`, `remove` or `remove_nulls`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_field: Option<String>,
}

/// Kind of external system a collection crawls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Box,
    Salesforce,
    Sharepoint,
    WebCrawl,
    CloudObjectStorage,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<SourceSchedule>,
    /// Shape depends on `source_type` (folders, objects, site collections, urls, buckets).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// `daily`, `weekly`, `monthly`, `five_minutes` or `hourly`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListConfigurationsResponse {
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub configurations: Vec<Configuration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfigurationResponse {
    pub configuration_id: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub notices: Vec<Notice>,
}
