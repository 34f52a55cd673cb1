use crate::body::JsonBody;
use crate::decode::ResponseShape;
use crate::endpoint::Query;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::types::{CreateEventResponse, EventData, LogQueryResponse, MetricResponse, MetricTokenResponse};

use super::{require, Call, DiscoveryClient, Operation};

const USER_DATA: &[&str] = &["v1/user_data"];
const EVENTS: &[&str] = &["v1/events"];
const LOGS: &[&str] = &["v1/logs"];
const TOP_QUERY_TOKENS: &[&str] = &["v1/metrics/top_query_tokens_with_event_rate"];

/// Time-series metric endpoints under `v1/metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    NumberOfQueries,
    NumberOfQueriesWithEvent,
    NumberOfQueriesNoResults,
    EventRate,
}

impl Metric {
    fn segment(self) -> &'static [&'static str] {
        match self {
            Metric::NumberOfQueries => &["v1/metrics/number_of_queries"],
            Metric::NumberOfQueriesWithEvent => &["v1/metrics/number_of_queries_with_event"],
            Metric::NumberOfQueriesNoResults => &["v1/metrics/number_of_queries_no_results"],
            Metric::EventRate => &["v1/metrics/event_rate"],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteUserDataOptions {
    pub customer_id: String,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateEventOptions {
    /// Only `click` is accepted by the service.
    pub event_type: String,
    pub data: EventData,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct MetricsOptions {
    pub metric: Metric,
    /// RFC 3339 timestamps, passed through as given.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// `document` to restrict to document results.
    pub result_type: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl MetricsOptions {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            start_time: None,
            end_time: None,
            result_type: None,
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetricTokenOptions {
    /// Number of tokens to return.
    pub count: Option<i64>,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct QueryLogOptions {
    pub filter: Option<String>,
    pub query: Option<String>,
    pub count: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Vec<String>,
    pub headers: Vec<(String, String)>,
}

impl DiscoveryClient {
    /// Delete all data tagged with `customer_id`. Accepted with an empty body.
    pub fn delete_user_data(&self, options: &DeleteUserDataOptions) -> Result<Operation<()>> {
        require("customer_id", &options.customer_id)?;
        let mut query = Query::new();
        query.push("customer_id", &options.customer_id);
        let call = Call::new(HttpMethod::Delete, USER_DATA)
            .query(query)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Empty)
    }

    pub fn create_event(&self, options: &CreateEventOptions) -> Result<Operation<CreateEventResponse>> {
        require("type", &options.event_type)?;
        require("data.environment_id", &options.data.environment_id)?;
        require("data.session_token", &options.data.session_token)?;
        require("data.collection_id", &options.data.collection_id)?;
        require("data.document_id", &options.data.document_id)?;
        let body = JsonBody::new()
            .field("type", &options.event_type)?
            .field("data", &options.data)?;
        let call = Call::new(HttpMethod::Post, EVENTS)
            .body(body.into_body())
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn get_metrics(&self, options: &MetricsOptions) -> Result<Operation<MetricResponse>> {
        let mut query = Query::new();
        query
            .push_opt("start_time", options.start_time.as_ref())
            .push_opt("end_time", options.end_time.as_ref())
            .push_opt("result_type", options.result_type.as_ref());
        let call = Call::new(HttpMethod::Get, options.metric.segment())
            .query(query)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    /// Number of queries over time.
    pub fn get_metrics_query(&self, options: &MetricsOptions) -> Result<Operation<MetricResponse>> {
        self.get_metrics(&MetricsOptions { metric: Metric::NumberOfQueries, ..options.clone() })
    }

    /// Most frequent query tokens with their event rate.
    pub fn get_metrics_query_token(
        &self,
        options: &MetricTokenOptions,
    ) -> Result<Operation<MetricTokenResponse>> {
        let mut query = Query::new();
        query.push_opt("count", options.count);
        let call = Call::new(HttpMethod::Get, TOP_QUERY_TOKENS)
            .query(query)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    /// Search the log of queries and events.
    pub fn query_log(&self, options: &QueryLogOptions) -> Result<Operation<LogQueryResponse>> {
        let mut query = Query::new();
        query
            .push_opt("filter", options.filter.as_ref())
            .push_opt("query", options.query.as_ref())
            .push_opt("count", options.count)
            .push_opt("offset", options.offset)
            .push_list("sort", &options.sort);
        let call = Call::new(HttpMethod::Get, LOGS)
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
    use crate::http::HttpResponse;

    #[test]
    fn delete_user_data_uses_query() {
        let options = DeleteUserDataOptions { customer_id: "cust 1".into(), headers: Vec::new() };
        let op = client().delete_user_data(&options).unwrap();
        assert_eq!(op.request.method, HttpMethod::Delete);
        assert_eq!(op.request.url, "https://x/api/v1/user_data?version=2018-03-05&customer_id=cust+1");
        assert_eq!(op.shape, ResponseShape::Empty);
        assert!(client().delete_user_data(&DeleteUserDataOptions::default()).is_err());
    }

    #[test]
    fn create_event_body() {
        let options = CreateEventOptions {
            event_type: "click".into(),
            data: EventData {
                environment_id: "env1".into(),
                session_token: "tok".into(),
                collection_id: "coll1".into(),
                document_id: "doc1".into(),
                ..Default::default()
            },
            headers: Vec::new(),
        };
        let op = client().create_event(&options).unwrap();
        assert_eq!(op.request.url, "https://x/api/v1/events?version=2018-03-05");
        let body: serde_json::Value = serde_json::from_slice(op.request.body.as_ref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "type": "click",
                "data": {
                    "environment_id": "env1",
                    "session_token": "tok",
                    "collection_id": "coll1",
                    "document_id": "doc1"
                }
            })
        );
    }

    #[test]
    fn create_event_requires_session_token() {
        let options = CreateEventOptions { event_type: "click".into(), ..Default::default() };
        assert!(matches!(client().create_event(&options), Err(Error::Validation(_))));
    }

    #[test]
    fn metrics_query_passes_times_verbatim() {
        let options = MetricsOptions {
            start_time: Some("2018-08-01T00:00:00Z".into()),
            result_type: Some("document".into()),
            ..MetricsOptions::new(Metric::EventRate)
        };
        let op = client().get_metrics_query(&options).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/metrics/number_of_queries\
             ?version=2018-03-05&start_time=2018-08-01T00%3A00%3A00Z&result_type=document"
        );
    }

    #[test]
    fn top_tokens_takes_count() {
        let options = MetricTokenOptions { count: Some(5), ..Default::default() };
        let op = client().get_metrics_query_token(&options).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/metrics/top_query_tokens_with_event_rate?version=2018-03-05&count=5"
        );
    }

    #[test]
    fn top_tokens_decode_string_keys() {
        let op = client().get_metrics_query_token(&MetricTokenOptions::default()).unwrap();
        let response = op
            .decode(HttpResponse::new(
                200,
                r#"{"aggregations":[{"event_type":"click","results":[{"key":"ibm","matching_results":10,"event_rate":0.5}]}]}"#,
            ))
            .unwrap();
        let result = &response.result().unwrap().aggregations[0].results[0];
        assert_eq!(result.key.as_deref(), Some("ibm"));
        assert_eq!(result.matching_results, Some(10));
        assert_eq!(result.event_rate, Some(0.5));
    }

    #[test]
    fn time_series_decode_numeric_keys() {
        let op = client().get_metrics(&MetricsOptions::new(Metric::EventRate)).unwrap();
        let response = op
            .decode(HttpResponse::new(
                200,
                r#"{"aggregations":[{"interval":"1d","event_type":"click","results":[{"key_as_string":"2018-08-01T00:00:00.000Z","key":1533081600000,"matching_results":4,"event_rate":0.25}]}]}"#,
            ))
            .unwrap();
        let result = &response.result().unwrap().aggregations[0].results[0];
        assert_eq!(result.key, Some(1533081600000));
        assert_eq!(result.key_as_string.as_deref(), Some("2018-08-01T00:00:00.000Z"));
    }

    #[test]
    fn query_log_sort_list() {
        let options = QueryLogOptions { sort: vec!["-created_timestamp".into()], count: Some(1), ..Default::default() };
        let op = client().query_log(&options).unwrap();
        assert_eq!(
            op.request.url,
            "https://x/api/v1/logs?version=2018-03-05&count=1&sort=-created_timestamp"
        );
    }
}
