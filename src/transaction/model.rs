//! The transaction model.
//!
//! # Value Handling
//! Values arrive as strings (`0x` hex or decimal, empty meaning zero). An
//! integer larger than `2^256 - 1` is replaced by zero and a warning is
//! logged instead of failing. Callers relying on this must check
//! [`Transaction::value`] before signing.

use alloy::primitives::{Address, Bytes, U256};

use crate::transaction::envelope::TransactionEnvelope;
use crate::transaction::error::{TransactionError, TransactionResult};

/// Fields of an AppChain transaction before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    to: Option<Address>,
    nonce: U256,
    quota: u64,
    valid_until_block: u64,
    version: u32,
    chain_id: u32,
    data: Bytes,
    value: U256,
}

impl Transaction {
    /// A call (or plain transfer) to `to`.
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self::with_target(Some(to), data.into())
    }

    /// A contract creation carrying `code` (bytecode plus constructor args).
    pub fn create(code: impl Into<Bytes>) -> Self {
        Self::with_target(None, code.into())
    }

    fn with_target(to: Option<Address>, data: Bytes) -> Self {
        Self {
            to,
            nonce: U256::ZERO,
            quota: 0,
            valid_until_block: 0,
            version: 0,
            chain_id: 0,
            data,
            value: U256::ZERO,
        }
    }

    pub fn with_nonce(mut self, nonce: impl Into<U256>) -> Self {
        self.nonce = nonce.into();
        self
    }

    pub fn with_quota(mut self, quota: u64) -> Self {
        self.quota = quota;
        self
    }

    pub fn with_valid_until_block(mut self, block: u64) -> Self {
        self.valid_until_block = block;
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_chain_id(mut self, chain_id: u32) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Set the value from its string form. See the module docs for overflow.
    pub fn with_value_str(mut self, value: &str) -> TransactionResult<Self> {
        self.value = parse_value(value)?;
        Ok(self)
    }

    pub fn to(&self) -> Option<Address> {
        self.to
    }

    pub fn nonce(&self) -> U256 {
        self.nonce
    }

    pub fn quota(&self) -> u64 {
        self.quota
    }

    pub fn valid_until_block(&self) -> u64 {
        self.valid_until_block
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn chain_id(&self) -> u32 {
        self.chain_id
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    pub fn validate(&self) -> TransactionResult<()> {
        if self.quota == 0 {
            return Err(TransactionError::InvalidQuota);
        }
        Ok(())
    }

    /// The wire form of the unsigned body.
    pub fn envelope(&self) -> TransactionEnvelope {
        TransactionEnvelope {
            to: self
                .to
                .map(|to| hex::encode(to.as_slice()))
                .unwrap_or_default(),
            nonce: format!("{:x}", self.nonce),
            quota: self.quota,
            valid_until_block: self.valid_until_block,
            data: self.data.to_vec(),
            value: self.value.to_be_bytes::<32>().to_vec(),
            chain_id: self.chain_id,
            version: self.version,
        }
    }

    /// Canonical bytes that get hashed and signed.
    pub fn encode(&self) -> Vec<u8> {
        self.envelope().to_bytes()
    }
}

/// Parse a transaction value.
///
/// Accepts `0x`-prefixed hex or decimal digits; the empty string is zero.
/// Values above `U256::MAX` become zero with a warning.
pub fn parse_value(input: &str) -> TransactionResult<U256> {
    let trimmed = input.trim();
    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16u8),
        None => (trimmed, 10u8),
    };

    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    let mut parsed = Vec::with_capacity(digits.len());
    for c in digits.chars() {
        let digit = c.to_digit(radix as u32).ok_or_else(|| TransactionError::InvalidValue {
            input: input.to_string(),
            reason: format!("'{}' is not a base-{} digit", c, radix),
        })?;
        parsed.push(digit as u64);
    }

    let radix = U256::from(radix);
    let mut value = U256::ZERO;
    for digit in parsed {
        match value
            .checked_mul(radix)
            .and_then(|v| v.checked_add(U256::from(digit)))
        {
            Some(next) => value = next,
            None => {
                tracing::warn!(value = %input, "Transaction value exceeds 2^256 - 1, using 0");
                return Ok(U256::ZERO);
            }
        }
    }
    Ok(value)
}
