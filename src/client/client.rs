//! Typed AppChain RPC client.
//!
//! # Responsibilities
//! - Translate typed calls into JSON-RPC method names and positional params
//! - Parse hex quantities and receipts
//! - Share one transport across every manager and task

use std::fmt;
use std::sync::Arc;

use alloy::primitives::{Address, B256, U256};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::client::http::HttpTransport;
use crate::client::transport::{Transport, TransportError};
use crate::client::types::{self, BlockTag, CallRequest, Receipt, SendTransactionResult};
use crate::config::schema::RpcConfig;

/// RPC client wrapper over a shared transport.
#[derive(Clone)]
pub struct AppChainClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for AppChainClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppChainClient").finish_non_exhaustive()
    }
}

impl AppChainClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Connect over HTTP using the RPC section of the configuration.
    pub fn from_config(config: &RpcConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Latest block height.
    pub async fn block_number(&self) -> Result<u64, TransportError> {
        let value = self.transport.send("blockNumber", vec![]).await?;
        types::parse_u64("blockNumber", &value)
    }

    pub async fn peer_count(&self) -> Result<u64, TransportError> {
        let value = self.transport.send("peerCount", vec![]).await?;
        types::parse_u64("peerCount", &value)
    }

    /// Number of transactions sent from `address`; the next nonce under the
    /// chain-count strategy.
    pub async fn get_transaction_count(
        &self,
        address: Address,
        block: BlockTag,
    ) -> Result<U256, TransportError> {
        let value = self
            .transport
            .send(
                "getTransactionCount",
                vec![json!(address), block.to_param()],
            )
            .await?;
        types::parse_u256("getTransactionCount", &value)
    }

    pub async fn get_balance(&self, address: Address, block: BlockTag) -> Result<U256, TransportError> {
        let value = self
            .transport
            .send("getBalance", vec![json!(address), block.to_param()])
            .await?;
        types::parse_u256("getBalance", &value)
    }

    /// Broadcast a `0x`-prefixed raw transaction.
    pub async fn send_raw_transaction(
        &self,
        raw_hex: &str,
    ) -> Result<SendTransactionResult, TransportError> {
        self.request("sendRawTransaction", vec![Value::from(raw_hex)])
            .await
    }

    /// Receipt for `hash`, or `None` while the transaction is not yet mined.
    pub async fn get_transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<Receipt>, TransportError> {
        self.request("getTransactionReceipt", vec![json!(hash)])
            .await
    }

    /// Execute a read-only call and return the raw hex output.
    pub async fn call(&self, request: &CallRequest, block: BlockTag) -> Result<String, TransportError> {
        let params = vec![
            serde_json::to_value(request).map_err(|e| TransportError::decode("call", e))?,
            block.to_param(),
        ];
        self.request("call", params).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, TransportError> {
        let value = self.transport.send(method, params).await?;
        serde_json::from_value(value).map_err(|e| TransportError::decode(method, e))
    }
}
