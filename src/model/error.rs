//! Inference error types

use thiserror::Error;

/// Any failure of the call to the inference server.
#[derive(Debug, Error)]
#[error("inference failed: {message}")]
pub struct InferenceError {
    pub kind: InferenceErrorKind,
    pub message: String,
}

impl InferenceError {
    pub fn new(kind: InferenceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(InferenceErrorKind::Transport, message)
    }

    pub fn status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("server returned {status}")
        } else {
            format!("server returned {status}: {body}")
        };
        Self::new(InferenceErrorKind::Status, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(InferenceErrorKind::MalformedBody, message)
    }

    pub fn empty_reply() -> Self {
        Self::new(InferenceErrorKind::EmptyReply, "model returned an empty response")
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceErrorKind {
    /// Connection refused, reset, or otherwise unreachable
    Transport,
    /// Non-2xx HTTP status
    Status,
    /// Body was not JSON or had no string `response` field
    MalformedBody,
    /// `response` was blank after trimming
    EmptyReply,
}
