//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! every field has a default, so an empty file is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Node endpoint and transport behaviour.
    pub rpc: RpcConfig,

    /// Chain parameters stamped into every transaction.
    pub chain: ChainConfig,

    /// Receipt polling.
    pub confirmation: ConfirmationConfig,

    /// Nonce acquisition.
    pub nonce: NonceConfig,

    /// Worker pool for non-blocking calls.
    pub runtime: RuntimeConfig,

    pub observability: ObservabilityConfig,
}

/// JSON-RPC transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Log raw request and response bodies at debug level.
    pub log_payloads: bool,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:1337".to_string(),
            timeout_secs: 10,
            log_payloads: false,
        }
    }
}

/// Chain parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    pub chain_id: u32,

    /// Protocol version of the transaction format.
    pub version: u32,

    /// Blocks past the current height a transaction stays valid, when the
    /// caller does not set `valid_until_block` explicitly.
    pub valid_until_block_offset: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            version: 0,
            valid_until_block_offset: 88,
        }
    }
}

/// Receipt polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Receipt queries before giving up.
    pub max_attempts: u32,

    /// Delay between receipt queries in milliseconds.
    pub poll_interval_ms: u64,
}

impl ConfirmationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 40,
            poll_interval_ms: 15_000,
        }
    }
}

/// How a manager picks the nonce for each submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NonceStrategy {
    /// Ask the chain for every submission. Concurrent submissions from one
    /// sender may observe the same nonce.
    #[default]
    Chain,
    /// Hold the manager's lock across fetch, sign and submit, and track the
    /// next nonce locally.
    ///
    /// The lock lives in the `TransactionManager`, so a sender must be
    /// driven by exactly one manager. Share it as an `Arc` between tasks;
    /// two managers for the same key can still race on the same nonce.
    Serialized,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NonceConfig {
    pub strategy: NonceStrategy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Threads in the worker pool used by `RemoteCall::send_async`.
    pub worker_threads: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { worker_threads: 4 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
