//! Completion error types

use thiserror::Error;

/// Completion failure with diagnostic classification.
///
/// Every kind reaches the widget as the same failed outcome; the kind and
/// message only feed operator logs.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    /// HTTP status, when the service answered at all
    pub status: Option<u16>,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Transport, message)
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(LlmErrorKind::Status, message)
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::MalformedResponse, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::InvalidRequest, message)
    }
}

/// Where the failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Connection, DNS, TLS or body read failure
    Transport,
    /// Service answered with a non-2xx status
    Status,
    /// 2xx body without the expected reply field
    MalformedResponse,
    /// Request rejected before any network call
    InvalidRequest,
}

impl LlmErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::MalformedResponse => "malformed_response",
            Self::InvalidRequest => "invalid_request",
        }
    }
}
