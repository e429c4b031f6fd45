//! Transaction model and canonical serialization.
//!
//! # Data Flow
//! ```text
//! Transaction (builder)
//!     → model.rs (value parsing, quota check)
//!     → envelope.rs (protobuf body: the bytes that get signed)
//!     → signer (wraps body + signature into UnverifiedTransaction)
//! ```

pub mod envelope;
pub mod error;
pub mod model;

pub use envelope::{Crypto, TransactionEnvelope, UnverifiedTransaction};
pub use error::{TransactionError, TransactionResult};
pub use model::{parse_value, Transaction};
