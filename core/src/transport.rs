//! The seam between request building and the network.
//!
//! # Design
//! `Transport` is one synchronous exchange: a built `HttpRequest` goes in and
//! a raw `HttpResponse` comes out, or a transport error. Credentials are the
//! transport's concern and are attached here, never by the builder. There
//! are no retries. A 4xx/5xx response is data, not a transport failure.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::http::{find_header, HttpMethod, HttpRequest, HttpResponse};

/// Executes built requests.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Credentials attached to every outgoing request.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Authenticator {
    #[default]
    NoAuth,
    Basic { username: String, password: String },
    /// Service API key, sent as basic credentials for the `apikey` user.
    ApiKey(String),
    Bearer(String),
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authenticator::NoAuth => f.write_str("NoAuth"),
            Authenticator::Basic { username, .. } => {
                f.debug_struct("Basic").field("username", username).finish_non_exhaustive()
            }
            Authenticator::ApiKey(_) => f.write_str("ApiKey(..)"),
            Authenticator::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

impl Authenticator {
    /// Value of the `Authorization` header, if any.
    pub fn authorization_header(&self) -> Option<String> {
        match self {
            Authenticator::NoAuth => None,
            Authenticator::Basic { username, password } => Some(basic(username, password)),
            Authenticator::ApiKey(key) => Some(basic("apikey", key)),
            Authenticator::Bearer(token) => Some(format!("Bearer {token}")),
        }
    }

    /// Add the `Authorization` header unless the caller already set one.
    pub fn authenticate(&self, request: &mut HttpRequest) {
        if find_header(&request.headers, "Authorization").is_some() {
            return;
        }
        if let Some(value) = self.authorization_header() {
            request.headers.push(("Authorization".to_string(), value));
        }
    }
}

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Blocking transport backed by `ureq`.
pub struct UreqTransport {
    agent: ureq::Agent,
    auth: Authenticator,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").field("auth", &self.auth).finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(auth: Authenticator, timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent, auth }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(config.authenticator()?, config.timeout()))
    }
}

impl Transport for UreqTransport {
    fn send(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        self.auth.authenticate(&mut request);
        debug!(method = %request.method, url = %request.url, "sending request");

        let HttpRequest { method, url, headers, body } = request;
        let result = match method {
            HttpMethod::Get | HttpMethod::Delete | HttpMethod::Head => {
                let mut builder = match method {
                    HttpMethod::Get => self.agent.get(&url),
                    HttpMethod::Delete => self.agent.delete(&url),
                    _ => self.agent.head(&url),
                };
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.force_send_body().send(&body[..]),
                    None => builder.call(),
                }
            }
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                let mut builder = match method {
                    HttpMethod::Post => self.agent.post(&url),
                    HttpMethod::Put => self.agent.put(&url),
                    _ => self.agent.patch(&url),
                };
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.send(&body[..]),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(Error::transport)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_vec().map_err(Error::transport)?;
        debug!(status, len = body.len(), "received response");

        Ok(HttpResponse { status, headers, body })
    }
}
