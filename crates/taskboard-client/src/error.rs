//! Error taxonomy for backend access.

use serde_json::Value;
use std::fmt;

/// Fallback message when an error payload names no message.
const GENERIC_API_ERROR: &str = "API error";

/// Broad class of a failed backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never produced a response.
    Network,
    /// The server rejected the input (400, 422 and other 4xx).
    Validation,
    /// 401 or 403.
    Authorization,
    /// 404.
    NotFound,
    /// 5xx.
    Server,
    /// Anything else, including undecodable success bodies.
    Unknown,
}

impl ErrorKind {
    /// Classify a non-success HTTP status.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Authorization,
            404 => Self::NotFound,
            400..=499 => Self::Validation,
            500.. => Self::Server,
            _ => Self::Unknown,
        }
    }

    /// Stable lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Server => "server",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by the transport client for every failed backend call.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    details: Option<Value>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl AppError {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            details: None,
            source: None,
        }
    }

    /// Classify a failure raised before a response existed.
    #[must_use]
    pub fn transport(err: reqwest::Error) -> Self {
        let kind = if err.is_builder() {
            ErrorKind::Unknown
        } else {
            ErrorKind::Network
        };
        let message = if err.is_timeout() {
            "request timed out"
        } else if kind == ErrorKind::Network {
            "network error"
        } else {
            "invalid request"
        };
        Self::new(kind, message).with_source(err)
    }

    /// Build an error from a non-success response.
    ///
    /// The body is parsed as a JSON error payload when possible; otherwise the
    /// message is synthesized from the status line.
    #[must_use]
    pub fn from_response(status: u16, reason: &str, body: &[u8]) -> Self {
        let kind = ErrorKind::from_status(status);
        match serde_json::from_slice::<Value>(body) {
            Ok(payload) => {
                let message =
                    extract_message(&payload).unwrap_or_else(|| GENERIC_API_ERROR.to_owned());
                Self::new(kind, message)
                    .with_status(status)
                    .with_details(payload)
            }
            Err(_) => Self::new(kind, format!("HTTP {status}: {reason}")).with_status(status),
        }
    }

    /// A success response whose body could not be decoded.
    #[must_use]
    pub fn decode(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Unknown, "unexpected response body").with_source(err)
    }

    /// A success response that should have carried a body but did not.
    #[must_use]
    pub fn empty_body(operation: &str) -> Self {
        Self::new(ErrorKind::Unknown, format!("{operation} returned an empty response"))
    }

    /// Attach the HTTP status.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the parsed error payload.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Error class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Raw message from the server or the transport.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when a response existed.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Parsed JSON error payload, when the body was JSON.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// True for rejected input, which callers surface as a warning.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Network error. Check your connection and that the server is reachable.".to_owned()
            }
            ErrorKind::Validation if self.message.is_empty() => {
                "The input has problems.".to_owned()
            }
            ErrorKind::Validation => self.message.clone(),
            ErrorKind::Authorization => "You are not allowed to do that.".to_owned(),
            ErrorKind::NotFound => "The task could not be found.".to_owned(),
            ErrorKind::Server => "Server error. Please try again later.".to_owned(),
            ErrorKind::Unknown => "An unexpected error occurred.".to_owned(),
        }
    }
}

fn extract_message(payload: &Value) -> Option<String> {
    let named = ["message", "error"].into_iter().find_map(|key| {
        payload
            .get(key)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    });
    if let Some(text) = named {
        return Some(text.to_owned());
    }

    // Model validation failures arrive as `{ "field": ["reason", ...] }`.
    let Value::Object(fields) = payload else {
        return None;
    };
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|(field, reasons)| {
            let reasons: Vec<&str> = reasons.as_array()?.iter().filter_map(Value::as_str).collect();
            (!reasons.is_empty()).then(|| format!("{field} {}", reasons.join(", ")))
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}
