//! Client library for an EVM-compatible application chain.
//!
//! Encodes contract calls per the Solidity ABI, builds protobuf transaction
//! envelopes, signs them with ECDSA/Keccak-256 or Ed25519/BLAKE2b, submits them
//! over JSON-RPC and polls for receipts.
//!
//! ```text
//! abi ──► transaction ──► signer ──► manager ──► remote
//!                                      │
//!                                   client (JSON-RPC)
//! ```

pub mod abi;
pub mod client;
pub mod config;
pub mod error;
pub mod manager;
pub mod observability;
pub mod remote;
pub mod signer;
pub mod transaction;

pub use client::{AppChainClient, HttpTransport, Transport};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use manager::{TransactionManager, TransactionRequest};
pub use remote::{ContractCaller, RemoteCall, Transfer, WorkerPool};
pub use signer::{SchemeKind, SigningScheme};
pub use transaction::Transaction;
