//! Nonce acquisition.
//!
//! Under [`NonceStrategy::Chain`] every submission reads
//! `getTransactionCount(sender, latest)`. Under [`NonceStrategy::Serialized`]
//! a lease holds the manager's lock from fetch until the broadcast finishes,
//! and the next nonce is `max(chain count, last committed + 1)`.
//!
//! A tracker belongs to one manager, and a manager signs for one sender.
//! Serialization only holds between submissions that go through the same
//! tracker, so every sender needs exactly one shared manager.

use alloy::primitives::{Address, U256};
use tokio::sync::{Mutex, MutexGuard};

use crate::client::{AppChainClient, BlockTag};
use crate::config::schema::NonceStrategy;
use crate::error::Result;

#[derive(Debug)]
pub struct NonceTracker {
    strategy: NonceStrategy,
    next: Mutex<Option<U256>>,
}

/// A nonce reserved for one submission.
///
/// Call [`NonceLease::commit`] after a successful broadcast. Dropping the
/// lease without committing leaves the tracked nonce unchanged.
#[derive(Debug)]
pub struct NonceLease<'a> {
    nonce: U256,
    guard: Option<MutexGuard<'a, Option<U256>>>,
}

impl NonceTracker {
    pub fn new(strategy: NonceStrategy) -> Self {
        Self {
            strategy,
            next: Mutex::new(None),
        }
    }

    pub fn strategy(&self) -> NonceStrategy {
        self.strategy
    }

    pub async fn acquire(&self, client: &AppChainClient, sender: Address) -> Result<NonceLease<'_>> {
        match self.strategy {
            NonceStrategy::Chain => {
                let nonce = client.get_transaction_count(sender, BlockTag::Latest).await?;
                Ok(NonceLease { nonce, guard: None })
            }
            NonceStrategy::Serialized => {
                let guard = self.next.lock().await;
                let chain = client.get_transaction_count(sender, BlockTag::Latest).await?;
                let nonce = match *guard {
                    Some(local) if local > chain => local,
                    _ => chain,
                };
                tracing::debug!(
                    sender = %sender,
                    chain_nonce = %chain,
                    nonce = %nonce,
                    "Reserved serialized nonce"
                );
                Ok(NonceLease {
                    nonce,
                    guard: Some(guard),
                })
            }
        }
    }
}

impl NonceLease<'_> {
    pub fn nonce(&self) -> U256 {
        self.nonce
    }

    /// Record the nonce as used and release the lock.
    pub fn commit(mut self) {
        if let Some(guard) = self.guard.as_mut() {
            **guard = Some(self.nonce.saturating_add(U256::from(1)));
        }
    }
}
