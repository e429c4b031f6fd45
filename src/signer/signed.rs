use alloy::primitives::{Address, Bytes, B256};

use crate::error::Result;
use crate::signer::scheme::SchemeKind;
use crate::transaction::Transaction;

/// A transaction signed under one scheme, ready for `sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction: Transaction,
    scheme: SchemeKind,
    signature: Bytes,
    raw: Bytes,
    hash: B256,
}

impl SignedTransaction {
    pub(crate) fn new(
        transaction: Transaction,
        scheme: SchemeKind,
        signature: Vec<u8>,
        raw: Vec<u8>,
        hash: B256,
    ) -> Self {
        Self {
            transaction,
            scheme,
            signature: signature.into(),
            raw: raw.into(),
            hash,
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn scheme(&self) -> SchemeKind {
        self.scheme
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Serialized `UnverifiedTransaction` bytes.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// `0x`-prefixed raw transaction, the `sendRawTransaction` parameter.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }

    /// Transaction hash as the node computes it: the scheme digest of the raw bytes.
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Check the signature against `expected_sender` under the signing scheme.
    pub fn verify(&self, expected_sender: Address) -> Result<()> {
        self.verify_as(self.scheme, expected_sender)
    }

    /// Check the signature as if it had been produced by `scheme`.
    pub fn verify_as(&self, scheme: SchemeKind, expected_sender: Address) -> Result<()> {
        let digest = scheme.digest(&self.transaction.encode())?;
        scheme.verify(&digest, &self.signature, expected_sender)
    }
}
