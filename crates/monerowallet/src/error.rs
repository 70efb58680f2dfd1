//! RPC error types.

use serde_json::Value;
use thiserror::Error;

/// Message the wallet server returns for an unknown method name.
pub const METHOD_NOT_FOUND_MESSAGE: &str = "Method not found";

#[derive(Debug, Error)]
pub enum RpcError {
    /// The HTTP exchange itself failed (DNS, connect, timeout, malformed reply).
    #[error("HTTP transport error calling {method} at {url}: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status other than 200.
    #[error("unexpected HTTP status {status} from {url} ({method})")]
    StatusCode {
        method: String,
        url: String,
        status: u16,
    },

    /// The server does not know the requested method.
    #[error("method not found: {method}")]
    MethodNotFound { method: String, request: Value },

    /// Any other `error` object returned by the server.
    #[error("RPC error{}: {message} ({method})", .code.map(|c| format!(" {}", c)).unwrap_or_default())]
    Protocol {
        method: String,
        code: Option<i64>,
        message: String,
        error: Value,
    },

    /// A success reply that lacks what the operation needs to unwrap.
    #[error("unexpected response shape for {method}: {reason}")]
    UnexpectedResponseShape { method: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl RpcError {
    /// HTTP status code carried by a [`RpcError::StatusCode`].
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::StatusCode { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_method_not_found(&self) -> bool {
        matches!(self, Self::MethodNotFound { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub(crate) fn shape(method: &str, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}
