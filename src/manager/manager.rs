//! Transaction submission and confirmation for one sender.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, B256};

use crate::client::{AppChainClient, BlockTag, CallRequest, Receipt, TransportError};
use crate::config::schema::{ChainConfig, ClientConfig, ConfirmationConfig, NonceStrategy};
use crate::error::{Error, Result};
use crate::manager::confirmation::{self, ConfirmationPolicy, Sleeper, TokioSleeper};
use crate::manager::nonce::NonceTracker;
use crate::manager::types::{TransactionRequest, TxState};
use crate::observability::metrics;
use crate::signer::{SignedTransaction, SigningScheme};
use crate::transaction::Transaction;

const READ_ONLY_MESSAGE: &str = "Only read operations are supported by this transaction manager";

/// Builds, signs, submits and confirms transactions for one sender.
///
/// A manager is reusable across many submissions and is usually shared as
/// `Arc<TransactionManager>`.
pub struct TransactionManager {
    client: AppChainClient,
    from: Address,
    /// `None` for read-only managers.
    signer: Option<SigningScheme>,
    chain: ChainConfig,
    policy: ConfirmationPolicy,
    nonces: NonceTracker,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for TransactionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionManager")
            .field("from", &self.from)
            .field("read_only", &self.signer.is_none())
            .field("chain", &self.chain)
            .field("policy", &self.policy)
            .field("nonce_strategy", &self.nonces.strategy())
            .finish()
    }
}

impl TransactionManager {
    /// A signing manager configured from the chain, confirmation and nonce sections.
    pub fn new(client: AppChainClient, signer: SigningScheme, config: &ClientConfig) -> Self {
        let from = signer.address();
        tracing::info!(
            from = %from,
            scheme = %signer.kind(),
            nonce_strategy = ?config.nonce.strategy,
            "Transaction manager initialized"
        );
        Self {
            client,
            from,
            signer: Some(signer),
            chain: config.chain.clone(),
            policy: ConfirmationPolicy::from(&config.confirmation),
            nonces: NonceTracker::new(config.nonce.strategy),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// A manager that serves calls only; every submission is rejected.
    pub fn read_only(client: AppChainClient, from: Address) -> Self {
        Self {
            client,
            from,
            signer: None,
            chain: ChainConfig::default(),
            policy: ConfirmationPolicy::default(),
            nonces: NonceTracker::new(NonceStrategy::Chain),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the sleeper used between receipt polls.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_confirmation(mut self, config: &ConfirmationConfig) -> Self {
        self.policy = ConfirmationPolicy::from(config);
        self
    }

    pub fn from_address(&self) -> Address {
        self.from
    }

    pub fn is_read_only(&self) -> bool {
        self.signer.is_none()
    }

    pub fn client(&self) -> &AppChainClient {
        &self.client
    }

    pub fn policy(&self) -> ConfirmationPolicy {
        self.policy
    }

    /// Sign, broadcast, and return the transaction hash without waiting.
    pub async fn send_transaction(&self, request: TransactionRequest) -> Result<B256> {
        let signer = self.signer()?;
        let valid_until_block = self.valid_until_block(&request).await?;

        let lease = self.nonces.acquire(&self.client, self.from).await?;
        let transaction = self.build(&request, lease.nonce(), valid_until_block);
        tracing::debug!(
            from = %self.from,
            nonce = %lease.nonce(),
            valid_until_block = valid_until_block,
            state = %TxState::Built,
            "Transaction built"
        );

        let signed = signer.sign(&transaction)?;
        tracing::debug!(
            local_hash = %signed.hash(),
            state = %TxState::Signed,
            "Transaction signed"
        );

        let tx_hash = self.broadcast(&signed).await?;
        lease.commit();
        metrics::record_submission();

        tracing::info!(
            tx_hash = %tx_hash,
            from = %self.from,
            nonce = %transaction.nonce(),
            state = %TxState::Submitted,
            "Transaction submitted"
        );
        Ok(tx_hash)
    }

    /// Poll for the receipt of a submitted transaction.
    pub async fn wait_for_receipt(&self, tx_hash: B256) -> Result<Receipt> {
        confirmation::wait_for_receipt(&self.client, tx_hash, self.policy, self.sleeper.as_ref()).await
    }

    /// Submit and wait for the receipt.
    pub async fn execute(&self, request: TransactionRequest) -> Result<Receipt> {
        let tx_hash = self.send_transaction(request).await?;
        self.wait_for_receipt(tx_hash).await
    }

    /// Read-only contract call at the latest block; returns the raw hex output.
    pub async fn call(&self, to: Address, data: &Bytes) -> Result<String> {
        let request = CallRequest {
            from: Some(self.from),
            to,
            data: format!("0x{}", hex::encode(data)),
        };
        Ok(self.client.call(&request, BlockTag::Latest).await?)
    }

    fn signer(&self) -> Result<&SigningScheme> {
        self.signer.as_ref().ok_or_else(|| {
            tracing::warn!(from = %self.from, "Submission attempted on read-only manager");
            Error::UnsupportedOperation(READ_ONLY_MESSAGE.to_string())
        })
    }

    async fn valid_until_block(&self, request: &TransactionRequest) -> Result<u64> {
        match request.valid_until_block {
            Some(block) => Ok(block),
            None => {
                let height = self.client.block_number().await?;
                Ok(height.saturating_add(self.chain.valid_until_block_offset))
            }
        }
    }

    fn build(
        &self,
        request: &TransactionRequest,
        nonce: alloy::primitives::U256,
        valid_until_block: u64,
    ) -> Transaction {
        let transaction = match request.to {
            Some(to) => Transaction::call(to, request.data.clone()),
            None => Transaction::create(request.data.clone()),
        };
        transaction
            .with_nonce(nonce)
            .with_quota(request.quota)
            .with_valid_until_block(valid_until_block)
            .with_version(self.chain.version)
            .with_chain_id(self.chain.chain_id)
            .with_value(request.value)
    }

    async fn broadcast(&self, signed: &SignedTransaction) -> Result<B256> {
        let result = match self.client.send_raw_transaction(&signed.to_hex()).await {
            Ok(result) => result,
            Err(TransportError::Rpc { code, message, .. }) => {
                tracing::warn!(code = code, error = %message, "Node rejected transaction");
                return Err(Error::Rejected(format!("{} (code {})", message, code)));
            }
            Err(e) => return Err(e.into()),
        };

        if !result.is_ok() {
            tracing::warn!(tx_hash = %result.hash, status = %result.status, "Node rejected transaction");
            return Err(Error::Rejected(format!("status {}", result.status)));
        }
        if result.hash != signed.hash() {
            tracing::warn!(
                tx_hash = %result.hash,
                local_hash = %signed.hash(),
                "Node reported a different transaction hash"
            );
        }
        Ok(result.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockTransport;
    use crate::signer::EcdsaKey;
    use crate::transaction::UnverifiedTransaction;
    use serde_json::{json, Value};

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    struct NoSleep;

    #[async_trait::async_trait]
    impl Sleeper for NoSleep {
        async fn sleep(&self, _duration: std::time::Duration) {}
    }

    fn manager(mock: &Arc<MockTransport>, config: &ClientConfig) -> TransactionManager {
        let key = EcdsaKey::from_hex(TEST_PRIVATE_KEY).unwrap();
        TransactionManager::new(AppChainClient::new(mock.clone()), key.into(), config)
            .with_sleeper(Arc::new(NoSleep))
    }

    fn accepted(hash_byte: &str) -> Value {
        json!({"hash": format!("0x{}", hash_byte.repeat(32)), "status": "OK"})
    }

    #[tokio::test]
    async fn test_send_fills_chain_fields() {
        let mock = Arc::new(MockTransport::new());
        mock.push_result("blockNumber", json!("0x64"))
            .push_result("getTransactionCount", json!("0x3"))
            .push_result("sendRawTransaction", accepted("01"));
        let mut config = ClientConfig::default();
        config.chain.chain_id = 9;
        config.chain.version = 1;
        let manager = manager(&mock, &config);

        let request = TransactionRequest::call(Address::ZERO, vec![1u8, 2, 3], 30_000);
        manager.send_transaction(request).await.unwrap();

        let raw = mock
            .calls()
            .into_iter()
            .find(|call| call.method == "sendRawTransaction")
            .unwrap();
        let raw_hex = raw.params[0].as_str().unwrap().trim_start_matches("0x").to_string();
        let decoded = UnverifiedTransaction::from_bytes(&hex::decode(raw_hex).unwrap()).unwrap();
        let envelope = decoded.transaction.unwrap();
        assert_eq!(envelope.nonce, "3");
        assert_eq!(envelope.valid_until_block, 100 + 88);
        assert_eq!(envelope.chain_id, 9);
        assert_eq!(envelope.version, 1);
        assert_eq!(envelope.quota, 30_000);
    }

    #[tokio::test]
    async fn test_explicit_valid_until_block_skips_height_query() {
        let mock = Arc::new(MockTransport::new());
        mock.push_result("getTransactionCount", json!("0x0"))
            .push_result("sendRawTransaction", accepted("02"));
        let manager = manager(&mock, &ClientConfig::default());

        let request =
            TransactionRequest::call(Address::ZERO, Vec::<u8>::new(), 1).with_valid_until_block(5);
        manager.send_transaction(request).await.unwrap();
        assert_eq!(mock.call_count("blockNumber"), 0);
    }

    #[tokio::test]
    async fn test_rpc_error_is_rejection() {
        let mock = Arc::new(MockTransport::new());
        mock.push_result("getTransactionCount", json!("0x0")).push_error(
            "sendRawTransaction",
            TransportError::Rpc {
                method: "sendRawTransaction".to_string(),
                code: -32003,
                message: "InvalidNonce".to_string(),
            },
        );
        let manager = manager(&mock, &ClientConfig::default());

        let request =
            TransactionRequest::call(Address::ZERO, Vec::<u8>::new(), 1).with_valid_until_block(5);
        let err = manager.send_transaction(request).await.unwrap_err();
        assert!(matches!(err, Error::Rejected(ref m) if m.contains("InvalidNonce")));
    }

    #[tokio::test]
    async fn test_non_ok_status_is_rejection() {
        let mock = Arc::new(MockTransport::new());
        mock.push_result("getTransactionCount", json!("0x0")).push_result(
            "sendRawTransaction",
            json!({"hash": format!("0x{}", "00".repeat(32)), "status": "Dup"}),
        );
        let manager = manager(&mock, &ClientConfig::default());

        let request =
            TransactionRequest::call(Address::ZERO, Vec::<u8>::new(), 1).with_valid_until_block(5);
        assert!(matches!(
            manager.send_transaction(request).await,
            Err(Error::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let mock = Arc::new(MockTransport::new());
        mock.push_result("getTransactionCount", json!("0x0")).push_error(
            "sendRawTransaction",
            TransportError::Timeout {
                method: "sendRawTransaction".to_string(),
                timeout_secs: 10,
            },
        );
        let manager = manager(&mock, &ClientConfig::default());

        let request =
            TransactionRequest::call(Address::ZERO, Vec::<u8>::new(), 1).with_valid_until_block(5);
        let err = manager.send_transaction(request).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Timeout { .. })));
        assert_eq!(mock.call_count("sendRawTransaction"), 1);
    }

    #[tokio::test]
    async fn test_read_only_rejects_before_transport() {
        let mock = Arc::new(MockTransport::new());
        let manager = TransactionManager::read_only(AppChainClient::new(mock.clone()), Address::ZERO);

        let request = TransactionRequest::call(Address::ZERO, Vec::<u8>::new(), 1);
        let err = manager.execute(request).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_read_only_still_calls() {
        let mock = Arc::new(MockTransport::new());
        mock.push_result("call", json!("0x01"));
        let manager = TransactionManager::read_only(AppChainClient::new(mock.clone()), Address::ZERO);

        let output = manager.call(Address::ZERO, &Bytes::from(vec![0x6b, 0xac])).await.unwrap();
        assert_eq!(output, "0x01");
        assert_eq!(mock.calls()[0].params[0]["data"], json!("0x6bac"));
        assert_eq!(mock.calls()[0].params[1], json!("latest"));
    }
}
