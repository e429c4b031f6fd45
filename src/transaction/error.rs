use thiserror::Error;

/// Errors raised while assembling a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The value string is neither a decimal nor a `0x` hex integer.
    #[error("invalid transaction value '{input}': {reason}")]
    InvalidValue { input: String, reason: String },

    /// Quota must be a positive computation budget.
    #[error("transaction quota must be greater than zero")]
    InvalidQuota,
}

pub type TransactionResult<T> = Result<T, TransactionError>;
