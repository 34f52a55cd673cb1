//! Error types for the discovery client.
//!
//! # Design
//! Failures fall on two independent axes. Pre-flight errors (`Validation`,
//! `InvalidUrl`, `Serialization`, `Io`) mean nothing was sent. After the
//! round-trip, `Transport` means no response arrived and `Decode` means a
//! response arrived but its body did not fit the expected shape. A non-2xx
//! status is not an error at this layer; it only becomes `Service` when the
//! caller asks for it through `DetailedResponse::into_result`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required option was missing or empty.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The base URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A request body could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A multipart file stream could not be read.
    #[error("failed to read request body stream: {0}")]
    Io(#[from] std::io::Error),

    /// The transport gave up before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The body of a response could not be decoded into the expected shape.
    #[error("failed to decode HTTP {status} response: {source}")]
    Decode {
        status: u16,
        headers: Vec<(String, String)>,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Service { status: u16, message: String },
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }

    /// True when the call failed before anything was sent.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::InvalidUrl(_) | Error::Serialization(_) | Error::Io(_)
        )
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Decode { status, .. } | Error::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
