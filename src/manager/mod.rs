//! Transaction submission and confirmation.
//!
//! # Data Flow
//! ```text
//! TransactionRequest
//!     → nonce.rs (getTransactionCount, optionally serialized per sender)
//!     → Transaction + SigningScheme::sign        [Built → Signed]
//!     → sendRawTransaction                       [Submitted]
//!     → confirmation.rs (bounded receipt polls)  [Pending]
//!     → Receipt | ChainRevert | ConfirmationTimeout
//! ```
//!
//! # Design Decisions
//! - Submission is never retried here; callers retry whole operations
//! - Read-only managers fail before touching the transport
//! - Sleeping goes through `Sleeper` so polling is testable without delay

pub mod confirmation;
#[allow(clippy::module_inception)]
pub mod manager;
pub mod nonce;
pub mod types;

pub use confirmation::{ConfirmationPolicy, Sleeper, TokioSleeper};
pub use manager::TransactionManager;
pub use nonce::{NonceLease, NonceTracker};
pub use types::{TransactionRequest, TxState};
