//! The transport seam.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from sending a JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection, IO or HTTP status failure.
    #[error("HTTP error calling '{method}': {reason}")]
    Http { method: String, reason: String },

    #[error("'{method}' timed out after {timeout_secs} seconds")]
    Timeout { method: String, timeout_secs: u64 },

    /// The node answered with a JSON-RPC error object.
    #[error("JSON-RPC error {code} from '{method}': {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    /// The response could not be parsed into the expected shape.
    #[error("failed to decode '{method}' response: {reason}")]
    Decode { method: String, reason: String },
}

impl TransportError {
    pub(crate) fn decode(method: &str, reason: impl ToString) -> Self {
        Self::Decode {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Sends one JSON-RPC request and returns its `result` member.
///
/// Implementations are shared across tasks and must tolerate concurrent use.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError>;
}
