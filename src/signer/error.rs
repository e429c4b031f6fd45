use thiserror::Error;

use crate::signer::scheme::SchemeKind;

/// Errors from key handling, signing and signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Private key material could not be parsed.
    #[error("invalid {scheme} private key: {reason}")]
    InvalidKey { scheme: SchemeKind, reason: String },

    #[error("{scheme} signing failed: {reason}")]
    Signing { scheme: SchemeKind, reason: String },

    /// Signature bytes are malformed or do not match the expected sender.
    #[error("{scheme} signature verification failed: {reason}")]
    Verification { scheme: SchemeKind, reason: String },
}

pub type KeyResult<T> = Result<T, KeyError>;
