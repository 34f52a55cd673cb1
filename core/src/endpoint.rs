//! Path and query construction.
//!
//! # Design
//! An `Endpoint` is built fresh for every call from the service base URL, an
//! ordered list of literal path segments and a parallel list of path
//! parameters. Segment `i` is followed by parameter `i` when one exists, so
//! `["v1/environments", "collections"]` with `["env1", "coll1"]` renders as
//! `v1/environments/env1/collections/coll1`. Literal segments are trusted;
//! parameters are percent-encoded as single path segments.
//!
//! `Query` keeps insertion order and allows repeated names. Multi-value
//! parameters are comma-joined here rather than at call sites, which is the
//! convention the service expects for lists such as `collection_ids`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{form_urlencoded, Url};

use crate::error::{Error, Result};
use crate::http::HttpMethod;

/// Characters escaped inside a path parameter: everything except the RFC 3986
/// unreserved set and the sub-delimiters that are harmless inside a segment.
const PATH_PARAM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// Target of a single request: method plus fully resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    path_url: String,
}

impl Endpoint {
    pub fn new<P: AsRef<str>>(
        base_url: &str,
        method: HttpMethod,
        segments: &[&str],
        path_params: &[P],
    ) -> Result<Self> {
        if path_params.len() > segments.len() {
            return Err(Error::validation(format!(
                "{} path parameters supplied for {} path segments",
                path_params.len(),
                segments.len()
            )));
        }

        let mut path_url = parse_base_url(base_url)?;
        for (i, segment) in segments.iter().enumerate() {
            let segment = segment.trim_matches('/');
            if !segment.is_empty() {
                path_url.push('/');
                path_url.push_str(segment);
            }
            if let Some(param) = path_params.get(i) {
                let param = param.as_ref();
                if param.is_empty() {
                    return Err(Error::validation(format!(
                        "path parameter following '{segment}' must not be empty"
                    )));
                }
                path_url.push('/');
                path_url.extend(utf8_percent_encode(param, PATH_PARAM));
            }
        }

        Ok(Self { method, path_url })
    }

    /// URL without a query string.
    pub fn path_url(&self) -> &str {
        &self.path_url
    }

    /// Final URL with the query appended.
    pub fn url(&self, query: &Query) -> String {
        if query.is_empty() {
            return self.path_url.clone();
        }
        format!("{}?{}", self.path_url, query.encode())
    }
}

/// Validate the base URL and normalize it to have no trailing slash.
pub fn parse_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url.trim())
        .map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::InvalidUrl(format!("unsupported scheme '{other}' in {base_url}")));
        }
    }
    if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
        return Err(Error::InvalidUrl(format!("{base_url} has no host")));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(Error::InvalidUrl(format!(
            "{base_url} must not carry a query or fragment"
        )));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Comma-join a multi-value parameter the way the service expects it, in
/// the query string or in a JSON field.
pub fn join_list<S: AsRef<str>>(values: &[S]) -> String {
    values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

/// Ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((name.to_string(), value.to_string()));
        self
    }

    /// Push only when a value is present.
    pub fn push_opt<V: ToString>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(name, value);
        }
        self
    }

    /// Comma-join a list into a single parameter. Empty lists are skipped.
    pub fn push_list<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> &mut Self {
        if !values.is_empty() {
            self.push(name, join_list(values));
        }
        self
    }

    pub fn extend(&mut self, other: Query) -> &mut Self {
        self.pairs.extend(other.pairs);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.pairs {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}
