use std::io::Read;

use crate::body::{JsonBody, Multipart, Part, RequestBody};
use crate::decode::ResponseShape;
use crate::endpoint::Query;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::types::{
    Collection, DeleteCollectionResponse, ListCollectionFieldsResponse, ListCollectionsResponse,
    TokenDictStatusResponse,
};

use super::{require, Call, DiscoveryClient, Operation};

const COLLECTIONS: &[&str] = &["v1/environments", "collections"];
const COLLECTION_FIELDS: &[&str] = &["v1/environments", "collections", "fields"];
const STOPWORDS: &[&str] = &["v1/environments", "collections", "word_lists/stopwords"];

#[derive(Debug, Clone, Default)]
pub struct CreateCollectionOptions {
    pub environment_id: String,
    pub name: String,
    pub description: Option<String>,
    pub configuration_id: Option<String>,
    /// Language code such as `en`, `de` or `ja`.
    pub language: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl CreateCollectionOptions {
    pub fn new(environment_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListCollectionsOptions {
    pub environment_id: String,
    pub name: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl ListCollectionsOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

/// Identifies one collection. Shared by get, delete, fields and stopword deletion.
#[derive(Debug, Clone, Default)]
pub struct CollectionOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub headers: Vec<(String, String)>,
}

impl CollectionOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            headers: Vec::new(),
        }
    }

    fn ids(&self) -> Result<[&str; 2]> {
        require("environment_id", &self.environment_id)?;
        require("collection_id", &self.collection_id)?;
        Ok([self.environment_id.as_str(), self.collection_id.as_str()])
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCollectionOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub name: String,
    pub description: Option<String>,
    pub configuration_id: Option<String>,
    pub headers: Vec<(String, String)>,
}

/// Upload of a custom stopword list. The file is read once while the
/// request is built.
#[derive(Default)]
pub struct CreateStopwordListOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub stopword_file: Option<Box<dyn Read + Send>>,
    pub stopword_filename: String,
    pub headers: Vec<(String, String)>,
}

impl std::fmt::Debug for CreateStopwordListOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateStopwordListOptions")
            .field("environment_id", &self.environment_id)
            .field("collection_id", &self.collection_id)
            .field("stopword_filename", &self.stopword_filename)
            .finish_non_exhaustive()
    }
}

impl DiscoveryClient {
    pub fn create_collection(&self, options: &CreateCollectionOptions) -> Result<Operation<Collection>> {
        require("environment_id", &options.environment_id)?;
        require("name", &options.name)?;
        let body = JsonBody::new()
            .field("name", &options.name)?
            .field_opt("description", options.description.as_ref())?
            .field_opt("configuration_id", options.configuration_id.as_ref())?
            .field_opt("language", options.language.as_ref())?;
        let call = Call::new(HttpMethod::Post, COLLECTIONS)
            .params(&[options.environment_id.as_str()])
            .body(body.into_body())
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn list_collections(
        &self,
        options: &ListCollectionsOptions,
    ) -> Result<Operation<ListCollectionsResponse>> {
        require("environment_id", &options.environment_id)?;
        let mut query = Query::new();
        query.push_opt("name", options.name.as_ref());
        let call = Call::new(HttpMethod::Get, COLLECTIONS)
            .params(&[options.environment_id.as_str()])
            .query(query)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn get_collection(&self, options: &CollectionOptions) -> Result<Operation<Collection>> {
        let call = Call::new(HttpMethod::Get, COLLECTIONS)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn update_collection(&self, options: &UpdateCollectionOptions) -> Result<Operation<Collection>> {
        require("environment_id", &options.environment_id)?;
        require("collection_id", &options.collection_id)?;
        require("name", &options.name)?;
        let body = JsonBody::new()
            .field("name", &options.name)?
            .field_opt("description", options.description.as_ref())?
            .field_opt("configuration_id", options.configuration_id.as_ref())?;
        let call = Call::new(HttpMethod::Put, COLLECTIONS)
            .params(&[options.environment_id.as_str(), options.collection_id.as_str()])
            .body(body.into_body())
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn delete_collection(
        &self,
        options: &CollectionOptions,
    ) -> Result<Operation<DeleteCollectionResponse>> {
        let call = Call::new(HttpMethod::Delete, COLLECTIONS)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn list_collection_fields(
        &self,
        options: &CollectionOptions,
    ) -> Result<Operation<ListCollectionFieldsResponse>> {
        let call = Call::new(HttpMethod::Get, COLLECTION_FIELDS)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn create_stopword_list(
        &self,
        options: CreateStopwordListOptions,
    ) -> Result<Operation<TokenDictStatusResponse>> {
        let CreateStopwordListOptions {
            environment_id,
            collection_id,
            stopword_file,
            stopword_filename,
            headers,
        } = options;
        require("environment_id", &environment_id)?;
        require("collection_id", &collection_id)?;
        require("stopword_filename", &stopword_filename)?;
        let Some(file) = stopword_file else {
            return Err(crate::error::Error::validation("stopword_file must be provided"));
        };
        let form = Multipart::new().part(
            Part::reader("stopword_file", file)
                .filename(stopword_filename)
                .content_type("application/octet-stream"),
        );
        let call = Call::new(HttpMethod::Post, STOPWORDS)
            .params(&[environment_id.as_str(), collection_id.as_str()])
            .body(RequestBody::Multipart(form))
            .headers(&headers);
        self.prepare(call, ResponseShape::Json)
    }

    /// The service answers 204 with no body.
    pub fn delete_stopword_list(&self, options: &CollectionOptions) -> Result<Operation<()>> {
        let call = Call::new(HttpMethod::Delete, STOPWORDS)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client;
    use crate::error::Error;
    use std::io::Cursor;

    #[test]
    fn create_collection_body() {
        let options = CreateCollectionOptions {
            language: Some("en".into()),
            ..CreateCollectionOptions::new("env1", "docs")
        };
        let op = client().create_collection(&options).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/collections?version=2018-03-05"
        );
        let body: serde_json::Value = serde_json::from_slice(op.request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "docs", "language": "en"}));
    }

    #[test]
    fn get_collection_path() {
        let op = client().get_collection(&CollectionOptions::new("env1", "coll1")).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/collections/coll1?version=2018-03-05"
        );
        assert_eq!(op.shape, ResponseShape::Json);
    }

    #[test]
    fn collection_fields_path() {
        let op = client().list_collection_fields(&CollectionOptions::new("env1", "coll1")).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/collections/coll1/fields?version=2018-03-05"
        );
    }

    #[test]
    fn stopword_upload_is_multipart() {
        let options = CreateStopwordListOptions {
            environment_id: "env1".into(),
            collection_id: "coll1".into(),
            stopword_file: Some(Box::new(Cursor::new(b"a\nthe\n".to_vec()))),
            stopword_filename: "stop.txt".into(),
            headers: Vec::new(),
        };
        let op = client().create_stopword_list(options).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/collections/coll1/word_lists/stopwords?version=2018-03-05"
        );
        let content_type = op.request.header("Content-Type").unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        let body = op.request.body_text().unwrap();
        assert!(body.contains("name=\"stopword_file\"; filename=\"stop.txt\""));
        assert!(body.contains("a\nthe\n"));
    }

    #[test]
    fn stopword_upload_requires_file() {
        let options = CreateStopwordListOptions {
            environment_id: "env1".into(),
            collection_id: "coll1".into(),
            stopword_filename: "stop.txt".into(),
            ..Default::default()
        };
        let err = client().create_stopword_list(options).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn delete_stopword_list_expects_no_body() {
        let op = client().delete_stopword_list(&CollectionOptions::new("env1", "coll1")).unwrap();
        assert_eq!(op.request.method, HttpMethod::Delete);
        assert_eq!(op.shape, ResponseShape::Empty);
    }
}
