//! ABI error definitions.

use thiserror::Error;

/// Errors raised while encoding or decoding ABI data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Malformed, truncated or mis-padded bytes.
    #[error("ABI codec error in {context}: expected {expected}, got {actual}")]
    Codec {
        context: String,
        expected: String,
        actual: String,
    },

    /// Unsupported type, or a value that does not fit its declared type.
    #[error("ABI type error: {0}")]
    Type(String),
}

impl AbiError {
    pub(crate) fn codec(
        context: impl Into<String>,
        expected: impl Into<String>,
        actual: impl ToString,
    ) -> Self {
        Self::Codec {
            context: context.into(),
            expected: expected.into(),
            actual: actual.to_string(),
        }
    }
}

/// Result type for ABI operations.
pub type AbiResult<T> = Result<T, AbiError>;
