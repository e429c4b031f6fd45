//! Receipt polling.
//!
//! # Responsibilities
//! - Poll `getTransactionReceipt` at a fixed interval, bounded by attempts
//! - Classify the outcome: confirmed, reverted, or timed out
//! - Sleep through an injectable [`Sleeper`] so tests run without delay

use std::time::Duration;

use alloy::primitives::B256;
use async_trait::async_trait;

use crate::client::{AppChainClient, Receipt};
use crate::config::schema::ConfirmationConfig;
use crate::error::{Error, Result};
use crate::manager::types::TxState;
use crate::observability::metrics::{self, Outcome};

/// Waits between receipt polls.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real-time sleeper on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Bounded polling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub max_attempts: u32,
    pub poll_interval: Duration,
}

impl From<&ConfirmationConfig> for ConfirmationPolicy {
    fn from(config: &ConfirmationConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            poll_interval: config.poll_interval(),
        }
    }
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self::from(&ConfirmationConfig::default())
    }
}

/// Poll until a receipt appears or the attempts run out.
///
/// Sleeps only between attempts, so `max_attempts` polls take
/// `max_attempts - 1` intervals. Transport failures end polling immediately.
pub async fn wait_for_receipt(
    client: &AppChainClient,
    tx_hash: B256,
    policy: ConfirmationPolicy,
    sleeper: &dyn Sleeper,
) -> Result<Receipt> {
    for attempt in 1..=policy.max_attempts {
        metrics::record_receipt_poll();

        if let Some(receipt) = client.get_transaction_receipt(tx_hash).await? {
            return classify(tx_hash, receipt, attempt);
        }

        tracing::debug!(
            tx_hash = %tx_hash,
            attempt = attempt,
            max_attempts = policy.max_attempts,
            state = %TxState::Pending,
            "Receipt not yet available"
        );

        if attempt < policy.max_attempts {
            sleeper.sleep(policy.poll_interval).await;
        }
    }

    metrics::record_outcome(Outcome::TimedOut);
    tracing::warn!(
        tx_hash = %tx_hash,
        attempts = policy.max_attempts,
        state = %TxState::TimedOut,
        "Transaction not confirmed"
    );
    Err(Error::ConfirmationTimeout {
        tx_hash,
        attempts: policy.max_attempts,
    })
}

fn classify(tx_hash: B256, receipt: Receipt, attempt: u32) -> Result<Receipt> {
    if let Some(message) = receipt.error_message {
        metrics::record_outcome(Outcome::Reverted);
        tracing::warn!(
            tx_hash = %tx_hash,
            error = %message,
            state = %TxState::Reverted,
            "Transaction failed on chain"
        );
        return Err(Error::ChainRevert { tx_hash, message });
    }

    metrics::record_outcome(Outcome::Confirmed);
    tracing::info!(
        tx_hash = %tx_hash,
        block_number = ?receipt.block_number,
        attempt = attempt,
        state = %TxState::Confirmed,
        "Transaction confirmed"
    );
    Ok(receipt)
}
