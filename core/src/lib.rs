//! Client core for the discovery document-search service.
//!
//! # Overview
//! Builds `HttpRequest` values and decodes `HttpResponse` values. The network
//! round-trip happens behind the `Transport` trait, either through the
//! bundled `UreqTransport` or through the host's own HTTP stack.
//!
//! # Design
//! - `endpoint` resolves base URL, path segments, path parameters and query.
//! - `body` composes headers and the JSON or multipart body.
//! - `decode` turns a raw response into a `DetailedResponse` envelope.
//! - `client` is the per-operation façade; every call is stateless and
//!   builds a fresh request.
//! - Non-2xx statuses are carried in the envelope, not raised as errors.

pub mod body;
pub mod client;
pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use body::{JsonBody, Multipart, Part, PartContent, RequestBody};
pub use client::*;
pub use config::{AuthConfig, ServiceConfig};
pub use decode::{decode, DetailedResponse, Payload, ResponseShape, ServiceErrorBody};
pub use endpoint::{Endpoint, Query};
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Authenticator, Transport, UreqTransport};
