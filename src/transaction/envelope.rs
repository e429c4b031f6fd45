//! Protobuf wire messages understood by AppChain nodes.
//!
//! Field numbers are fixed by the node's `blockchain.proto`; encoding follows
//! field-number order with proto3 default elision, so a node re-encoding the
//! decoded message reproduces the signed bytes.

use prost::Message;

/// The unsigned transaction body. Its encoding is the byte string that gets
/// hashed and signed.
#[derive(Clone, PartialEq, Message)]
pub struct TransactionEnvelope {
    /// Lowercase hex without `0x`; empty for contract creation.
    #[prost(string, tag = "1")]
    pub to: String,
    /// Lowercase hex quantity without `0x`.
    #[prost(string, tag = "2")]
    pub nonce: String,
    #[prost(uint64, tag = "3")]
    pub quota: u64,
    #[prost(uint64, tag = "4")]
    pub valid_until_block: u64,
    #[prost(bytes = "vec", tag = "5")]
    pub data: Vec<u8>,
    /// 32-byte big-endian.
    #[prost(bytes = "vec", tag = "6")]
    pub value: Vec<u8>,
    #[prost(uint32, tag = "7")]
    pub chain_id: u32,
    #[prost(uint32, tag = "8")]
    pub version: u32,
}

/// Body plus signature, as broadcast with `sendRawTransaction`.
#[derive(Clone, PartialEq, Message)]
pub struct UnverifiedTransaction {
    #[prost(message, optional, tag = "1")]
    pub transaction: Option<TransactionEnvelope>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
    #[prost(enumeration = "Crypto", tag = "3")]
    pub crypto: i32,
}

/// Crypto tag carried on the wire.
///
/// Nodes only distinguish the default tag; the signature length tells them
/// which scheme produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Crypto {
    Default = 0,
    Reserved = 1,
}

impl TransactionEnvelope {
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}

impl UnverifiedTransaction {
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, prost::DecodeError> {
        Self::decode(bytes)
    }
}
