use crate::body::JsonBody;
use crate::decode::ResponseShape;
use crate::endpoint::Query;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::types::{DeleteEnvironmentResponse, Environment, ListCollectionFieldsResponse, ListEnvironmentsResponse};

use super::{require, Call, DiscoveryClient, Operation};

const ENVIRONMENTS: &[&str] = &["v1/environments"];
const FIELDS: &[&str] = &["v1/environments", "fields"];

#[derive(Debug, Clone, Default)]
pub struct CreateEnvironmentOptions {
    pub name: String,
    pub description: Option<String>,
    /// Size plan, e.g. `LT`, `XS`, `S`.
    pub size: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl CreateEnvironmentOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListEnvironmentsOptions {
    /// Exact environment name to filter on.
    pub name: Option<String>,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct GetEnvironmentOptions {
    pub environment_id: String,
    pub headers: Vec<(String, String)>,
}

impl GetEnvironmentOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEnvironmentOptions {
    pub environment_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub size: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl UpdateEnvironmentOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

pub type DeleteEnvironmentOptions = GetEnvironmentOptions;

#[derive(Debug, Clone, Default)]
pub struct ListFieldsOptions {
    pub environment_id: String,
    pub collection_ids: Vec<String>,
    pub headers: Vec<(String, String)>,
}

impl ListFieldsOptions {
    pub fn new(environment_id: impl Into<String>, collection_ids: Vec<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_ids,
            ..Default::default()
        }
    }
}

impl DiscoveryClient {
    pub fn create_environment(&self, options: &CreateEnvironmentOptions) -> Result<Operation<Environment>> {
        require("name", &options.name)?;
        let body = JsonBody::new()
            .field("name", &options.name)?
            .field_opt("description", options.description.as_ref())?
            .field_opt("size", options.size.as_ref())?;
        let call = Call::new(HttpMethod::Post, ENVIRONMENTS)
            .body(body.into_body())
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn list_environments(
        &self,
        options: &ListEnvironmentsOptions,
    ) -> Result<Operation<ListEnvironmentsResponse>> {
        let mut query = Query::new();
        query.push_opt("name", options.name.as_ref());
        let call = Call::new(HttpMethod::Get, ENVIRONMENTS)
            .query(query)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn get_environment(&self, options: &GetEnvironmentOptions) -> Result<Operation<Environment>> {
        require("environment_id", &options.environment_id)?;
        let call = Call::new(HttpMethod::Get, ENVIRONMENTS)
            .params(&[options.environment_id.as_str()])
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn update_environment(&self, options: &UpdateEnvironmentOptions) -> Result<Operation<Environment>> {
        require("environment_id", &options.environment_id)?;
        let body = JsonBody::new()
            .field_opt("name", options.name.as_ref())?
            .field_opt("description", options.description.as_ref())?
            .field_opt("size", options.size.as_ref())?;
        let call = Call::new(HttpMethod::Put, ENVIRONMENTS)
            .params(&[options.environment_id.as_str()])
            .body(body.into_body())
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn delete_environment(
        &self,
        options: &DeleteEnvironmentOptions,
    ) -> Result<Operation<DeleteEnvironmentResponse>> {
        require("environment_id", &options.environment_id)?;
        let call = Call::new(HttpMethod::Delete, ENVIRONMENTS)
            .params(&[options.environment_id.as_str()])
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    /// Fields across the given collections of one environment.
    pub fn list_fields(&self, options: &ListFieldsOptions) -> Result<Operation<ListCollectionFieldsResponse>> {
        require("environment_id", &options.environment_id)?;
        if options.collection_ids.is_empty() {
            return Err(crate::error::Error::validation("collection_ids must not be empty"));
        }
        let mut query = Query::new();
        query.push_list("collection_ids", &options.collection_ids);
        let call = Call::new(HttpMethod::Get, FIELDS)
            .params(&[options.environment_id.as_str()])
            .query(query)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client;
    use crate::error::Error;

    #[test]
    fn create_environment_omits_absent_fields() {
        let op = client().create_environment(&CreateEnvironmentOptions::new("foo")).unwrap();
        assert_eq!(op.request.method, HttpMethod::Post);
        assert_eq!(op.request.url, "https://x/api/v1/environments?version=2018-03-05");
        assert_eq!(op.request.body_text(), Some(r#"{"name":"foo"}"#));
        assert_eq!(op.request.header("Content-Type"), Some("application/json"));
        assert_eq!(op.request.header("Accept"), Some("application/json"));
    }

    #[test]
    fn create_environment_requires_name() {
        let err = client().create_environment(&CreateEnvironmentOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn list_environments_with_name_filter() {
        let options = ListEnvironmentsOptions { name: Some("my env".into()), ..Default::default() };
        let op = client().list_environments(&options).unwrap();
        assert_eq!(op.request.url, "https://x/api/v1/environments?version=2018-03-05&name=my+env");
        assert!(op.request.body.is_none());
        assert_eq!(op.request.header("Content-Type"), None);
    }

    #[test]
    fn update_environment_builds_put() {
        let options = UpdateEnvironmentOptions {
            description: Some("new".into()),
            ..UpdateEnvironmentOptions::new("env1")
        };
        let op = client().update_environment(&options).unwrap();
        assert_eq!(op.request.method, HttpMethod::Put);
        assert_eq!(op.request.url, "https://x/api/v1/environments/env1?version=2018-03-05");
        let body: serde_json::Value = serde_json::from_slice(op.request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"description": "new"}));
    }

    #[test]
    fn delete_environment_escapes_id() {
        let op = client().delete_environment(&DeleteEnvironmentOptions::new("a/b")).unwrap();
        assert_eq!(op.request.method, HttpMethod::Delete);
        assert_eq!(op.request.url, "https://x/api/v1/environments/a%2Fb?version=2018-03-05");
    }

    #[test]
    fn list_fields_joins_collection_ids() {
        let options = ListFieldsOptions::new("env1", vec!["c1".into(), "c2".into()]);
        let op = client().list_fields(&options).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/fields?version=2018-03-05&collection_ids=c1%2Cc2"
        );
        let err = client().list_fields(&ListFieldsOptions::new("env1", Vec::new())).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn caller_headers_override_defaults() {
        let options = GetEnvironmentOptions {
            headers: vec![("Accept".into(), "text/plain".into()), ("X-Trace".into(), "1".into())],
            ..GetEnvironmentOptions::new("env1")
        };
        let op = client()
            .with_default_header("X-Trace", "0")
            .get_environment(&options)
            .unwrap();
        assert_eq!(op.request.header("accept"), Some("text/plain"));
        assert_eq!(op.request.header("x-trace"), Some("1"));
    }
}
