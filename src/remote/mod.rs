//! Deferred operations over a [`TransactionManager`](crate::manager::TransactionManager).
//!
//! A [`RemoteCall`] captures an operation without running it. The caller
//! picks how it runs:
//! - `send()` blocks the current thread on a private runtime
//! - `send_async(&pool)` schedules it on a [`WorkerPool`] and returns a [`PendingCall`]
//! - `call().await` runs it inline on an existing async context
//!
//! The contract and transfer helpers build their operations this way.

pub mod call;
pub mod contract;
pub mod pool;
pub mod transfer;

pub use call::RemoteCall;
pub use contract::ContractCaller;
pub use pool::{PendingCall, WorkerPool};
pub use transfer::{SystemContract, Transfer, QUOTA_PRICE_ADDRESS};
