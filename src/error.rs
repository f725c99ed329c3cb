//! Unified error types.

use thiserror::Error;

/// Top-level crate error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Undecodable body: {0}")]
    Decode(String),
}

impl HttpError {
    /// Whether the payload arrived but could not be read as the expected shape.
    pub fn is_decode(&self) -> bool {
        match self {
            HttpError::Decode(_) => true,
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.is_decode(),
            _ => false,
        }
    }
}

/// Classification of a failed fetch, as seen by the request coordinator and
/// the view-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure, timeout, or non-success HTTP status.
    ProviderUnavailable,
    /// The payload could not be parsed into the expected shape.
    MalformedResponse,
    /// A newer request for the same slot started first. Never shown to users.
    Superseded,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ProviderUnavailable => write!(f, "provider unavailable"),
            ErrorKind::MalformedResponse => write!(f, "malformed response"),
            ErrorKind::Superseded => write!(f, "superseded"),
        }
    }
}

/// A failed provider operation, tagged with the operation it belongs to
/// (e.g. `"price history"`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("{context}: provider unavailable: {message}")]
    ProviderUnavailable {
        context: &'static str,
        message: String,
    },

    #[error("{context}: malformed response: {message}")]
    MalformedResponse {
        context: &'static str,
        message: String,
    },

    #[error("Superseded by a newer request")]
    Superseded,
}

impl FetchError {
    /// Classify a transport error for the given operation.
    pub fn from_http(context: &'static str, err: &HttpError) -> Self {
        if err.is_decode() {
            FetchError::MalformedResponse {
                context,
                message: err.to_string(),
            }
        } else {
            FetchError::ProviderUnavailable {
                context,
                message: err.to_string(),
            }
        }
    }

    pub fn malformed(context: &'static str, message: impl Into<String>) -> Self {
        FetchError::MalformedResponse {
            context,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::ProviderUnavailable { .. } => ErrorKind::ProviderUnavailable,
            FetchError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            FetchError::Superseded => ErrorKind::Superseded,
        }
    }

    /// The operation this failure belongs to, if any.
    pub fn context(&self) -> Option<&'static str> {
        match self {
            FetchError::ProviderUnavailable { context, .. }
            | FetchError::MalformedResponse { context, .. } => Some(context),
            FetchError::Superseded => None,
        }
    }
}
