//! Data-transfer records for the discovery service.
//!
//! # Design
//! Records mirror the service's JSON one-to-one. Response fields are
//! `Option` (or default to empty collections) because the service omits
//! whatever does not apply. Request records skip unset fields so they never
//! reach the wire as `null`. Timestamps stay `String`s in the service's
//! RFC 3339 form.

mod collection;
mod configuration;
mod credentials;
mod document;
mod environment;
mod events;
mod query;
mod training;

pub use collection::*;
pub use configuration::*;
pub use credentials::*;
pub use document::*;
pub use environment::*;
pub use events::*;
pub use query::*;
pub use training::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Read a list the service may send as `null`, or omit, as empty.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A warning or error the service attached to a document or query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub notice_id: Option<String>,
    pub created: Option<String>,
    pub document_id: Option<String>,
    pub query_id: Option<String>,
    pub severity: Option<String>,
    pub step: Option<String>,
    pub description: Option<String>,
}

/// Field name and type as reported by the fields endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub field: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCollectionFieldsResponse {
    #[serde(default, deserialize_with = "crate::types::nullable")]
    pub fields: Vec<Field>,
}
