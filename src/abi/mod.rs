//! Contract ABI codec.
//!
//! # Data Flow
//! ```text
//! FunctionDescriptor (name + typed AbiValue inputs)
//!     → function.rs (canonical signature, 4-byte selector)
//!     → encoder.rs (head/tail 32-byte word layout)
//!     → call data bytes handed to the transaction model
//!
//! Return data from `call`
//!     → decoder.rs (walks the head, dereferences offsets)
//!     → Vec<AbiValue> matching the output placeholders
//! ```
//!
//! # Design Decisions
//! - Types and values are closed enums; encode/decode dispatch by matching on them
//! - Static types occupy a fixed word count computable from the type alone
//! - Dynamic types are written out-of-line with an offset in their head slot
//! - Decoding never trusts offsets or lengths: every read is bounds-checked

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod function;
pub mod types;
pub mod value;

pub use decoder::{decode, decode_hex};
pub use encoder::{encode, encode_hex};
pub use error::AbiError;
pub use function::{encode_constructor, selector, FunctionDescriptor};
pub use types::AbiType;
pub use value::AbiValue;

/// Size of one ABI word in bytes.
pub const WORD: usize = 32;
