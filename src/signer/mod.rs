//! Transaction signing.
//!
//! # Data Flow
//! ```text
//! Transaction
//!     → envelope bytes
//!     → scheme digest (keccak-256 | keyed BLAKE2b-256)
//!     → signature (r‖s‖v | sig‖pubkey)
//!     → UnverifiedTransaction bytes → SignedTransaction::to_hex()
//! ```
//!
//! # Security Constraints
//! - Key material lives only inside `EcdsaKey` / `EdDsaKey`
//! - Never log private keys; `Debug` shows the address only

pub mod ecdsa;
pub mod eddsa;
pub mod error;
pub mod scheme;
pub mod signed;

pub use ecdsa::EcdsaKey;
pub use eddsa::EdDsaKey;
pub use error::{KeyError, KeyResult};
pub use scheme::{SchemeKind, SigningScheme};
pub use signed::SignedTransaction;
