//! ABI encoding.
//!
//! # Layout
//! ```text
//! | head: one slot per parameter          | tail: dynamic payloads      |
//! | static → inline words                 |                             |
//! | dynamic → offset from start of head ──┼──▶ len | padded payload     |
//! ```
//! Composite values (tuples, arrays) encode their members with the same
//! head/tail split, offsets relative to the composite's own head.

use alloy::primitives::U256;

use crate::abi::error::AbiResult;
use crate::abi::value::AbiValue;
use crate::abi::WORD;

/// Encode an ordered parameter list.
pub fn encode(values: &[AbiValue]) -> AbiResult<Vec<u8>> {
    values.iter().try_for_each(AbiValue::validate)?;
    Ok(encode_sequence(values))
}

/// Encode an ordered parameter list as `0x`-prefixed hex.
pub fn encode_hex(values: &[AbiValue]) -> AbiResult<String> {
    encode(values).map(|bytes| format!("0x{}", hex::encode(bytes)))
}

fn encode_sequence(values: &[AbiValue]) -> Vec<u8> {
    let head_len: usize = values.iter().map(head_size).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for value in values {
        if value.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend(encode_value(value));
        } else {
            head.extend(encode_value(value));
        }
    }

    head.extend(tail);
    head
}

/// Bytes a value takes in its enclosing head.
fn head_size(value: &AbiValue) -> usize {
    if value.is_dynamic() {
        return WORD;
    }
    match value {
        AbiValue::StaticArray(_, values) | AbiValue::Tuple(values) => {
            values.iter().map(head_size).sum()
        }
        _ => WORD,
    }
}

fn encode_value(value: &AbiValue) -> Vec<u8> {
    match value {
        AbiValue::Bool(b) => usize_word(*b as usize).to_vec(),
        AbiValue::Uint(_, v) => v.to_be_bytes::<32>().to_vec(),
        // Two's complement over 256 bits is already sign-extended.
        AbiValue::Int(_, v) => v.into_raw().to_be_bytes::<32>().to_vec(),
        AbiValue::Address(a) => {
            let mut word = vec![0u8; 12];
            word.extend_from_slice(a.as_slice());
            word
        }
        AbiValue::FixedBytes(bytes) => right_pad(bytes),
        AbiValue::Bytes(bytes) => length_prefixed(bytes),
        AbiValue::String(s) => length_prefixed(s.as_bytes()),
        AbiValue::StaticArray(_, values) | AbiValue::Tuple(values) => encode_sequence(values),
        AbiValue::DynamicArray(_, values) => {
            let mut out = usize_word(values.len()).to_vec();
            out.extend(encode_sequence(values));
            out
        }
    }
}

fn length_prefixed(bytes: &[u8]) -> Vec<u8> {
    let mut out = usize_word(bytes.len()).to_vec();
    out.extend(right_pad(bytes));
    out
}

fn right_pad(bytes: &[u8]) -> Vec<u8> {
    let padded_len = bytes.len().div_ceil(WORD) * WORD;
    let mut out = bytes.to_vec();
    out.resize(padded_len, 0);
    out
}

pub(crate) fn usize_word(n: usize) -> [u8; 32] {
    U256::from(n).to_be_bytes::<32>()
}
