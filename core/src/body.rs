//! Request headers and bodies.
//!
//! # Design
//! A request carries at most one body representation: nothing, a JSON value,
//! or a multipart form. Optional JSON fields are left out of the object
//! entirely instead of being written as `null`. That is how an unset option
//! reaches the service as an absent key.
//!
//! Multipart file parts may be backed by a reader. The reader is owned by
//! its `Part`, read to the end once while the form is encoded, and dropped
//! as soon as encoding finishes or fails. Dropping it closes the handle on
//! every path.

use std::fmt;
use std::io::Read;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::http::set_header;

pub const APPLICATION_JSON: &str = "application/json";

/// Body of a request before encoding.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Multipart),
}

impl RequestBody {
    /// Encode any serializable value as the JSON body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }

    /// Encode the body, returning its bytes and content type.
    pub fn encode(self) -> Result<Option<(Vec<u8>, String)>> {
        match self {
            RequestBody::Empty => Ok(None),
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(&value)?;
                Ok(Some((bytes, APPLICATION_JSON.to_string())))
            }
            RequestBody::Multipart(form) => {
                let content_type = form.content_type();
                Ok(Some((form.encode()?, content_type)))
            }
        }
    }
}

/// JSON object built field by field.
#[derive(Debug, Clone, Default)]
pub struct JsonBody {
    fields: Map<String, Value>,
}

impl JsonBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<T: Serialize>(mut self, name: &str, value: T) -> Result<Self> {
        self.fields.insert(name.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Add the field only if a value is present.
    pub fn field_opt<T: Serialize>(self, name: &str, value: Option<T>) -> Result<Self> {
        match value {
            Some(value) => self.field(name, value),
            None => Ok(self),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_body(self) -> RequestBody {
        RequestBody::Json(Value::Object(self.fields))
    }
}

/// Content of a multipart part.
pub enum PartContent {
    Text(String),
    Bytes(Vec<u8>),
    Reader(Box<dyn Read + Send>),
}

impl fmt::Debug for PartContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartContent::Text(text) => f.debug_tuple("Text").field(text).finish(),
            PartContent::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            PartContent::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

/// One named field of a multipart form.
#[derive(Debug)]
pub struct Part {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub content: PartContent,
}

impl Part {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            filename: None,
            content_type: None,
            content: PartContent::Text(value.into()),
        }
    }

    pub fn bytes(name: &str, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            filename: None,
            content_type: None,
            content: PartContent::Bytes(value.into()),
        }
    }

    pub fn reader(name: &str, reader: impl Read + Send + 'static) -> Self {
        Self {
            name: name.to_string(),
            filename: None,
            content_type: None,
            content: PartContent::Reader(Box::new(reader)),
        }
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Write the headers and content of this part, consuming it.
    fn write_into(self, out: &mut Vec<u8>, boundary: &str) -> Result<()> {
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", quote(&self.name));
        if let Some(filename) = &self.filename {
            disposition.push_str(&format!("; filename=\"{}\"", quote(filename)));
        }
        out.extend_from_slice(disposition.as_bytes());
        out.extend_from_slice(b"\r\n");
        if let Some(content_type) = &self.content_type {
            out.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        match self.content {
            PartContent::Text(text) => out.extend_from_slice(text.as_bytes()),
            PartContent::Bytes(bytes) => out.extend_from_slice(&bytes),
            PartContent::Reader(mut reader) => {
                reader.read_to_end(out)?;
            }
        }
        out.extend_from_slice(b"\r\n");
        Ok(())
    }
}

fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"").replace(['\r', '\n'], " ")
}

/// Ordered `multipart/form-data` body.
#[derive(Debug)]
pub struct Multipart {
    boundary: String,
    parts: Vec<Part>,
}

impl Default for Multipart {
    fn default() -> Self {
        Self::new()
    }
}

impl Multipart {
    pub fn new() -> Self {
        Self {
            boundary: format!("discovery-{}", uuid::Uuid::new_v4().simple()),
            parts: Vec::new(),
        }
    }

    /// Use a fixed boundary instead of a random one.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Add the part only if present.
    pub fn part_opt(self, part: Option<Part>) -> Self {
        match part {
            Some(part) => self.part(part),
            None => self,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode every part. Each reader is dropped when its part has been
    /// written; on a read error the remaining parts are dropped unread.
    pub fn encode(self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for part in self.parts {
            part.write_into(&mut out, &self.boundary)?;
        }
        out.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Ok(out)
    }
}

/// Layer headers for a request: composer-set values first, then service
/// defaults, then caller overrides. Later layers win, case-insensitively.
pub fn compose_headers(
    content_type: Option<&str>,
    defaults: &[(String, String)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut headers = vec![("Accept".to_string(), APPLICATION_JSON.to_string())];
    if let Some(content_type) = content_type {
        set_header(&mut headers, "Content-Type", content_type);
    }
    for (name, value) in defaults.iter().chain(overrides) {
        set_header(&mut headers, name, value);
    }
    headers
}
