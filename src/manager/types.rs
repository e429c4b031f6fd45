//! Submission request and lifecycle types.

use std::fmt;

use alloy::primitives::{Address, Bytes, U256};

use crate::transaction::{parse_value, TransactionResult};

/// Lifecycle of one submitted transaction.
///
/// `Built → Signed → Submitted → Pending → {Confirmed | Reverted | TimedOut}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Built,
    Signed,
    Submitted,
    Pending,
    Confirmed,
    Reverted,
    TimedOut,
}

impl TxState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxState::Confirmed | TxState::Reverted | TxState::TimedOut)
    }
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxState::Built => "built",
            TxState::Signed => "signed",
            TxState::Submitted => "submitted",
            TxState::Pending => "pending",
            TxState::Confirmed => "confirmed",
            TxState::Reverted => "reverted",
            TxState::TimedOut => "timed_out",
        };
        f.write_str(name)
    }
}

/// What the caller wants sent. Nonce, chain id and version are filled in by
/// the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub to: Option<Address>,
    pub data: Bytes,
    pub value: U256,
    pub quota: u64,
    /// Explicit validity bound; when absent the manager uses the current
    /// height plus the configured offset.
    pub valid_until_block: Option<u64>,
}

impl TransactionRequest {
    pub fn call(to: Address, data: impl Into<Bytes>, quota: u64) -> Self {
        Self {
            to: Some(to),
            data: data.into(),
            value: U256::ZERO,
            quota,
            valid_until_block: None,
        }
    }

    pub fn deploy(code: impl Into<Bytes>, quota: u64) -> Self {
        Self {
            to: None,
            data: code.into(),
            value: U256::ZERO,
            quota,
            valid_until_block: None,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Parse the value from decimal or `0x` hex; oversized values become zero.
    pub fn with_value_str(mut self, value: &str) -> TransactionResult<Self> {
        self.value = parse_value(value)?;
        Ok(self)
    }

    pub fn with_valid_until_block(mut self, block: u64) -> Self {
        self.valid_until_block = Some(block);
        self
    }
}
