use serde::{Deserialize, Serialize};

use super::Notice;

/// Returned when a document is accepted for ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentAccepted {
    pub document_id: Option<String>,
    /// `processing` or `pending`.
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub document_id: Option<String>,
    pub configuration_id: Option<String>,
    /// `available`, `available with notices`, `failed`, `processing` or `pending`.
    pub status: Option<String>,
    pub status_description: Option<String>,
    pub filename: Option<String>,
    pub file_type: Option<String>,
    pub sha1: Option<String>,
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteDocumentResponse {
    pub document_id: Option<String>,
    pub status: Option<String>,
}
