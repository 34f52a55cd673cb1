use crate::body::JsonBody;
use crate::decode::ResponseShape;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::types::{TrainingDataSet, TrainingExample, TrainingQuery};

use super::{require, Call, DiscoveryClient, Operation};

const TRAINING_DATA: &[&str] = &["v1/environments", "collections", "training_data"];
const TRAINING_EXAMPLES: &[&str] = &["v1/environments", "collections", "training_data", "examples"];

/// Identifies the training data of one collection.
#[derive(Debug, Clone, Default)]
pub struct TrainingDataOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub headers: Vec<(String, String)>,
}

impl TrainingDataOptions {
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
pub struct AddTrainingDataOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub natural_language_query: Option<String>,
    pub filter: Option<String>,
    pub examples: Vec<TrainingExample>,
    pub headers: Vec<(String, String)>,
}

/// Identifies one training query.
#[derive(Debug, Clone, Default)]
pub struct TrainingQueryOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub query_id: String,
    pub headers: Vec<(String, String)>,
}

impl TrainingQueryOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        query_id: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            query_id: query_id.into(),
            headers: Vec::new(),
        }
    }

    fn ids(&self) -> Result<[&str; 3]> {
        require("environment_id", &self.environment_id)?;
        require("collection_id", &self.collection_id)?;
        require("query_id", &self.query_id)?;
        Ok([
            self.environment_id.as_str(),
            self.collection_id.as_str(),
            self.query_id.as_str(),
        ])
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateTrainingExampleOptions {
    pub query: TrainingQueryOptions,
    pub example: TrainingExample,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteTrainingExampleOptions {
    pub query: TrainingQueryOptions,
    pub example_id: String,
}

impl DiscoveryClient {
    pub fn list_training_data(&self, options: &TrainingDataOptions) -> Result<Operation<TrainingDataSet>> {
        let call = Call::new(HttpMethod::Get, TRAINING_DATA)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn add_training_data(&self, options: &AddTrainingDataOptions) -> Result<Operation<TrainingQuery>> {
        require("environment_id", &options.environment_id)?;
        require("collection_id", &options.collection_id)?;
        let examples = (!options.examples.is_empty()).then_some(&options.examples);
        let body = JsonBody::new()
            .field_opt("natural_language_query", options.natural_language_query.as_ref())?
            .field_opt("filter", options.filter.as_ref())?
            .field_opt("examples", examples)?;
        let call = Call::new(HttpMethod::Post, TRAINING_DATA)
            .params(&[options.environment_id.as_str(), options.collection_id.as_str()])
            .body(body.into_body())
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    /// Remove every training query of a collection. No body comes back.
    pub fn delete_all_training_data(&self, options: &TrainingDataOptions) -> Result<Operation<()>> {
        let call = Call::new(HttpMethod::Delete, TRAINING_DATA)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Empty)
    }

    pub fn get_training_data(&self, options: &TrainingQueryOptions) -> Result<Operation<TrainingQuery>> {
        let call = Call::new(HttpMethod::Get, TRAINING_DATA)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn delete_training_data(&self, options: &TrainingQueryOptions) -> Result<Operation<()>> {
        let call = Call::new(HttpMethod::Delete, TRAINING_DATA)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Empty)
    }

    pub fn create_training_example(
        &self,
        options: &CreateTrainingExampleOptions,
    ) -> Result<Operation<TrainingExample>> {
        let call = Call::new(HttpMethod::Post, TRAINING_EXAMPLES)
            .params(&options.query.ids()?)
            .body(crate::body::RequestBody::json(&options.example)?)
            .headers(&options.query.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn delete_training_example(&self, options: &DeleteTrainingExampleOptions) -> Result<Operation<()>> {
        require("example_id", &options.example_id)?;
        let [environment_id, collection_id, query_id] = options.query.ids()?;
        let call = Call::new(HttpMethod::Delete, TRAINING_EXAMPLES)
            .params(&[environment_id, collection_id, query_id, options.example_id.as_str()])
            .headers(&options.query.headers);
        self.prepare(call, ResponseShape::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client;

    #[test]
    fn add_training_data_skips_empty_examples() {
        let options = AddTrainingDataOptions {
            environment_id: "env1".into(),
            collection_id: "coll1".into(),
            natural_language_query: Some("reset password".into()),
            ..Default::default()
        };
        let op = client().add_training_data(&options).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/collections/coll1/training_data?version=2018-03-05"
        );
        assert_eq!(op.request.body_text(), Some(r#"{"natural_language_query":"reset password"}"#));
    }

    #[test]
    fn add_training_data_with_examples() {
        let options = AddTrainingDataOptions {
            environment_id: "env1".into(),
            collection_id: "coll1".into(),
            examples: vec![TrainingExample {
                document_id: Some("doc1".into()),
                relevance: Some(10),
                ..Default::default()
            }],
            ..Default::default()
        };
        let op = client().add_training_data(&options).unwrap();
        let body: serde_json::Value = serde_json::from_slice(op.request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"examples": [{"document_id": "doc1", "relevance": 10}]}));
    }

    #[test]
    fn training_query_paths() {
        let options = TrainingQueryOptions::new("env1", "coll1", "q1");
        let op = client().get_training_data(&options).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/collections/coll1/training_data/q1?version=2018-03-05"
        );
        let op = client().delete_training_data(&options).unwrap();
        assert_eq!(op.shape, ResponseShape::Empty);
    }

    #[test]
    fn training_example_paths() {
        let create = CreateTrainingExampleOptions {
            query: TrainingQueryOptions::new("env1", "coll1", "q1"),
            example: TrainingExample { document_id: Some("doc1".into()), ..Default::default() },
        };
        let op = client().create_training_example(&create).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/collections/coll1/training_data/q1/examples?version=2018-03-05"
        );

        let delete = DeleteTrainingExampleOptions {
            query: TrainingQueryOptions::new("env1", "coll1", "q1"),
            example_id: "ex1".into(),
        };
        let op = client().delete_training_example(&delete).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/collections/coll1/training_data/q1/examples/ex1?version=2018-03-05"
        );
        assert_eq!(op.request.method, HttpMethod::Delete);
    }

    #[test]
    fn delete_all_training_data_expects_no_body() {
        let op = client().delete_all_training_data(&TrainingDataOptions::new("env1", "coll1")).unwrap();
        assert_eq!(op.shape, ResponseShape::Empty);
        assert!(op.request.body.is_none());
    }
}
