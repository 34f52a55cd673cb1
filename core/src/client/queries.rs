use crate::body::RequestBody;
use crate::decode::ResponseShape;
use crate::endpoint::Query;
use crate::error::{Error, Result};
use crate::http::HttpMethod;
use crate::types::{Completions, QueryLarge, QueryNoticesResponse, QueryResponse};

use super::{require, Call, DiscoveryClient, Operation};

const COLLECTION_QUERY: &[&str] = &["v1/environments", "collections", "query"];
const FEDERATED_QUERY: &[&str] = &["v1/environments", "query"];
const NOTICES: &[&str] = &["v1/environments", "collections", "notices"];
const AUTOCOMPLETION: &[&str] = &["v1/environments", "collections", "autocompletion"];

#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub query: QueryLarge,
    /// Keep this query out of the service's query log.
    pub logging_opt_out: Option<bool>,
    pub headers: Vec<(String, String)>,
}

impl QueryOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>, query: QueryLarge) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            query,
            ..Default::default()
        }
    }
}

/// Query across several collections of one environment.
#[derive(Debug, Clone, Default)]
pub struct FederatedQueryOptions {
    pub environment_id: String,
    pub collection_ids: Vec<String>,
    pub query: QueryLarge,
    pub logging_opt_out: Option<bool>,
    pub headers: Vec<(String, String)>,
}

/// Query over the notices produced while ingesting a collection.
#[derive(Debug, Clone, Default)]
pub struct QueryNoticesOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub filter: Option<String>,
    pub query: Option<String>,
    pub natural_language_query: Option<String>,
    pub passages: Option<bool>,
    pub aggregation: Option<String>,
    pub count: Option<i64>,
    pub return_fields: Vec<String>,
    pub offset: Option<i64>,
    pub sort: Vec<String>,
    pub highlight: Option<bool>,
    pub passages_fields: Vec<String>,
    pub passages_count: Option<i64>,
    pub passages_characters: Option<i64>,
    pub deduplicate_field: Option<String>,
    pub similar: Option<bool>,
    pub similar_document_ids: Vec<String>,
    pub similar_fields: Vec<String>,
    pub headers: Vec<(String, String)>,
}

impl QueryNoticesOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AutocompletionOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub prefix: String,
    pub field: Option<String>,
    pub count: Option<i64>,
    pub headers: Vec<(String, String)>,
}

fn logging_headers(opt_out: Option<bool>, caller: &[(String, String)]) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(caller.len() + 1);
    if let Some(opt_out) = opt_out {
        headers.push(("X-Watson-Logging-Opt-Out".to_string(), opt_out.to_string()));
    }
    headers.extend_from_slice(caller);
    headers
}

impl DiscoveryClient {
    pub fn query(&self, options: &QueryOptions) -> Result<Operation<QueryResponse>> {
        require("environment_id", &options.environment_id)?;
        require("collection_id", &options.collection_id)?;
        let headers = logging_headers(options.logging_opt_out, &options.headers);
        let call = Call::new(HttpMethod::Post, COLLECTION_QUERY)
            .params(&[options.environment_id.as_str(), options.collection_id.as_str()])
            .body(RequestBody::json(&options.query)?)
            .headers(&headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn federated_query(&self, options: &FederatedQueryOptions) -> Result<Operation<QueryResponse>> {
        require("environment_id", &options.environment_id)?;
        if options.collection_ids.is_empty() {
            return Err(Error::validation("collection_ids must not be empty"));
        }
        let body = QueryLarge {
            collection_ids: options.collection_ids.clone(),
            ..options.query.clone()
        };
        let headers = logging_headers(options.logging_opt_out, &options.headers);
        let call = Call::new(HttpMethod::Post, FEDERATED_QUERY)
            .params(&[options.environment_id.as_str()])
            .body(RequestBody::json(&body)?)
            .headers(&headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn query_notices(&self, options: &QueryNoticesOptions) -> Result<Operation<QueryNoticesResponse>> {
        require("environment_id", &options.environment_id)?;
        require("collection_id", &options.collection_id)?;
        let mut query = Query::new();
        query
            .push_opt("filter", options.filter.as_ref())
            .push_opt("query", options.query.as_ref())
            .push_opt("natural_language_query", options.natural_language_query.as_ref())
            .push_opt("passages", options.passages)
            .push_opt("aggregation", options.aggregation.as_ref())
            .push_opt("count", options.count)
            .push_list("return", &options.return_fields)
            .push_opt("offset", options.offset)
            .push_list("sort", &options.sort)
            .push_opt("highlight", options.highlight)
            .push_list("passages.fields", &options.passages_fields)
            .push_opt("passages.count", options.passages_count)
            .push_opt("passages.characters", options.passages_characters)
            .push_opt("deduplicate.field", options.deduplicate_field.as_ref())
            .push_opt("similar", options.similar)
            .push_list("similar.document_ids", &options.similar_document_ids)
            .push_list("similar.fields", &options.similar_fields);
        let call = Call::new(HttpMethod::Get, NOTICES)
            .params(&[options.environment_id.as_str(), options.collection_id.as_str()])
            .query(query)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    /// Completions for a partially typed query.
    pub fn get_autocompletion(&self, options: &AutocompletionOptions) -> Result<Operation<Completions>> {
        require("environment_id", &options.environment_id)?;
        require("collection_id", &options.collection_id)?;
        require("prefix", &options.prefix)?;
        let mut query = Query::new();
        query
            .push("prefix", &options.prefix)
            .push_opt("field", options.field.as_ref())
            .push_opt("count", options.count);
        let call = Call::new(HttpMethod::Get, AUTOCOMPLETION)
            .params(&[options.environment_id.as_str(), options.collection_id.as_str()])
            .query(query)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }
}
