//! Operation façade for the discovery service.
//!
//! # Design
//! `DiscoveryClient` holds only the base URL, the API version and service-wide
//! default headers, and carries no mutable state between calls. Each
//! operation validates its options, then builds an `Operation<T>`: the
//! finished `HttpRequest` plus the response shape to decode with. The caller
//! either hands the request to its own HTTP stack and calls
//! `Operation::decode`, or lets `Operation::send` run it through a
//! `Transport`.

mod collections;
mod configurations;
mod credentials;
mod documents;
mod environments;
mod events;
mod queries;
mod training;

pub use collections::*;
pub use configurations::*;
pub use credentials::*;
pub use documents::*;
pub use environments::*;
pub use events::*;
pub use queries::*;
pub use training::*;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::body::{compose_headers, RequestBody};
use crate::config::ServiceConfig;
use crate::decode::{decode, DetailedResponse, ResponseShape};
use crate::endpoint::{parse_base_url, Endpoint, Query};
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Client for the discovery service. Cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    base_url: String,
    version: String,
    default_headers: Vec<(String, String)>,
}

impl DiscoveryClient {
    /// Fails if `base_url` is not an absolute http(s) URL or `version` is empty.
    pub fn new(base_url: &str, version: &str) -> Result<Self> {
        require("version", version)?;
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            version: version.to_string(),
            default_headers: Vec::new(),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let version = config.version.as_deref().unwrap_or_default();
        let mut client = Self::new(&config.url, version)?;
        client.default_headers = config
            .default_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(client)
    }

    /// Header added to every request; per-call headers still override it.
    pub fn with_default_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Resolve a call description into a finished request.
    fn prepare<T>(&self, call: Call<'_>, shape: ResponseShape) -> Result<Operation<T>> {
        let endpoint = Endpoint::new(&self.base_url, call.method, call.segments, &call.params)?;

        let mut query = Query::new();
        query.push("version", &self.version);
        query.extend(call.query);

        let (body, content_type) = match call.body.encode()? {
            Some((bytes, content_type)) => (Some(bytes), Some(content_type)),
            None => (None, None),
        };
        let headers = compose_headers(content_type.as_deref(), &self.default_headers, call.headers);

        let request = HttpRequest {
            method: endpoint.method,
            url: endpoint.url(&query),
            headers,
            body,
        };
        debug!(method = %request.method, url = %request.url, ?shape, "built request");

        Ok(Operation {
            request,
            shape,
            _result: PhantomData,
        })
    }
}

/// A built request paired with the shape of its expected response.
#[derive(Debug, Clone)]
#[must_use]
pub struct Operation<T> {
    pub request: HttpRequest,
    pub shape: ResponseShape,
    _result: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Operation<T> {
    /// Decode a response obtained by executing `self.request` elsewhere.
    pub fn decode(&self, response: HttpResponse) -> Result<DetailedResponse<T>> {
        decode(response, self.shape)
    }

    /// Execute through `transport` and decode.
    pub fn send<X: Transport + ?Sized>(self, transport: &X) -> Result<DetailedResponse<T>> {
        let shape = self.shape;
        let response = transport.send(self.request)?;
        decode(response, shape)
    }
}

/// Description of one call before it is resolved against the client.
struct Call<'a> {
    method: HttpMethod,
    segments: &'a [&'a str],
    params: Vec<&'a str>,
    query: Query,
    body: RequestBody,
    headers: &'a [(String, String)],
}

impl<'a> Call<'a> {
    fn new(method: HttpMethod, segments: &'a [&'a str]) -> Self {
        Self {
            method,
            segments,
            params: Vec::new(),
            query: Query::new(),
            body: RequestBody::Empty,
            headers: &[],
        }
    }

    fn params(mut self, params: &[&'a str]) -> Self {
        self.params.extend_from_slice(params);
        self
    }

    fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    fn headers(mut self, headers: &'a [(String, String)]) -> Self {
        self.headers = headers;
        self
    }
}

/// Reject a missing or blank required option before anything is built.
fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{name} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::decode::Payload;
    use crate::types::Environment;
    use std::sync::Mutex;

    pub(crate) const BASE_URL: &str = "https://x/api";

    pub(crate) fn client() -> DiscoveryClient {
        DiscoveryClient::new(BASE_URL, "2018-03-05").unwrap()
    }

    struct Canned {
        response: HttpResponse,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Transport for Canned {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    #[test]
    fn new_rejects_bad_inputs() {
        assert!(matches!(DiscoveryClient::new("::", "v"), Err(Error::InvalidUrl(_))));
        assert!(matches!(DiscoveryClient::new(BASE_URL, " "), Err(Error::Validation(_))));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = DiscoveryClient::new("http://localhost:3000/", "v").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn from_config_carries_default_headers() {
        let config = ServiceConfig::new(BASE_URL, "2019-04-30")
            .with_auth(AuthConfig::NoAuth)
            .with_header("X-Watson-Learning-Opt-Out", "true");
        let client = DiscoveryClient::from_config(&config).unwrap();
        let op = client.list_environments(&ListEnvironmentsOptions::default()).unwrap();
        assert_eq!(op.request.header("x-watson-learning-opt-out"), Some("true"));
        assert_eq!(op.request.url, "https://x/api/v1/environments?version=2019-04-30");
    }

    #[test]
    fn from_config_requires_version() {
        let config = ServiceConfig::default();
        assert!(matches!(DiscoveryClient::from_config(&config), Err(Error::Validation(_))));
    }

    #[test]
    fn send_runs_through_transport() {
        let transport = Canned {
            response: HttpResponse::new(200, r#"{"environment_id":"xxx"}"#),
            seen: Mutex::new(Vec::new()),
        };
        let op = client().get_environment(&GetEnvironmentOptions::new("xxx")).unwrap();
        let expected = op.request.clone();
        let response = op.send(&transport).unwrap();
        assert_eq!(
            response.result,
            Payload::Parsed(Environment { environment_id: Some("xxx".into()), ..Default::default() })
        );
        assert_eq!(transport.seen.lock().unwrap().as_slice(), &[expected]);
    }

    #[test]
    fn preflight_failure_sends_nothing() {
        let err = client().get_environment(&GetEnvironmentOptions::new("")).unwrap_err();
        assert!(err.is_preflight());
    }
}
