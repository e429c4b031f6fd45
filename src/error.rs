//! Crate-wide error type.

use alloy::primitives::B256;
use thiserror::Error;

use crate::abi::AbiError;
use crate::client::TransportError;
use crate::config::loader::ConfigError;
use crate::signer::KeyError;
use crate::transaction::TransactionError;

/// Errors surfaced by the client, grouped by the subsystem that raised them.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Network or RPC failure. A single submission is never retried internally.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The receipt carries an execution error. Terminal.
    #[error("transaction {tx_hash} reverted on chain: {message}")]
    ChainRevert { tx_hash: B256, message: String },

    /// No receipt within the configured attempts; the transaction may still be mined.
    #[error("transaction {tx_hash} has no receipt after {attempts} attempts")]
    ConfirmationTimeout { tx_hash: B256, attempts: u32 },

    /// The node refused the raw transaction.
    #[error("node rejected transaction: {0}")]
    Rejected(String),

    /// A deployment receipt without a contract address.
    #[error("transaction {tx_hash} did not create a contract")]
    MissingContractAddress { tx_hash: B256 },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("call cancelled before completion")]
    Cancelled,

    /// Runtime construction or worker failure.
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
