//! ABI decoding.

use alloy::primitives::{Address, I256, U256};

use crate::abi::error::{AbiError, AbiResult};
use crate::abi::types::AbiType;
use crate::abi::value::{int_fits, AbiValue};
use crate::abi::WORD;

/// Decode `data` against an ordered list of type placeholders.
pub fn decode(data: &[u8], types: &[AbiType]) -> AbiResult<Vec<AbiValue>> {
    types.iter().try_for_each(AbiType::validate)?;
    if data.len() % WORD != 0 {
        return Err(AbiError::codec(
            "input",
            "length that is a multiple of 32",
            format!("{} bytes", data.len()),
        ));
    }
    decode_sequence(data, 0, types.iter())
}

/// Decode `0x`-prefixed hex, as returned by a `call`.
///
/// Empty return data decodes to an empty list.
pub fn decode_hex(data: &str, types: &[AbiType]) -> AbiResult<Vec<AbiValue>> {
    let stripped = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data);
    if stripped.is_empty() {
        return Ok(Vec::new());
    }
    let bytes = hex::decode(stripped)
        .map_err(|e| AbiError::codec("input", "hex string", e))?;
    decode(&bytes, types)
}

fn decode_sequence<'t>(
    data: &[u8],
    base: usize,
    types: impl Iterator<Item = &'t AbiType>,
) -> AbiResult<Vec<AbiValue>> {
    let mut cursor = base;
    let mut values = Vec::with_capacity(types.size_hint().0);

    for ty in types {
        let slot = if ty.is_dynamic() {
            let offset = read_usize(data, cursor, ty)?;
            let start = base
                .checked_add(offset)
                .ok_or_else(|| AbiError::codec(ty.to_string(), "offset within input", offset))?;
            values.push(decode_value(data, start, ty)?);
            WORD
        } else {
            values.push(decode_value(data, cursor, ty)?);
            ty.head_size().ok_or_else(|| size_overflow(ty))?
        };
        cursor = cursor.checked_add(slot).ok_or_else(|| size_overflow(ty))?;
    }

    Ok(values)
}

/// Decode `len` consecutive `element`s whose heads start at `at`.
///
/// The heads must fit in the input before anything is allocated.
fn decode_elements(
    data: &[u8],
    at: usize,
    element: &AbiType,
    len: usize,
    ty: &AbiType,
) -> AbiResult<Vec<AbiValue>> {
    let slot = if element.is_dynamic() {
        Some(WORD)
    } else {
        element.head_size()
    };
    let end = slot
        .and_then(|slot| slot.checked_mul(len))
        .and_then(|size| size.checked_add(at));
    match end {
        Some(end) if end <= data.len() => {
            decode_sequence(data, at, std::iter::repeat(element).take(len))
        }
        _ => Err(AbiError::codec(
            ty.to_string(),
            format!("{} elements within input", len),
            format!("{} bytes available", data.len().saturating_sub(at)),
        )),
    }
}

fn size_overflow(ty: &AbiType) -> AbiError {
    AbiError::codec(ty.to_string(), "encoded size that fits in usize", "overflow")
}

fn decode_value(data: &[u8], at: usize, ty: &AbiType) -> AbiResult<AbiValue> {
    match ty {
        AbiType::Bool => {
            let word = read_word(data, at, ty)?;
            match U256::from_be_bytes(*word) {
                v if v == U256::ZERO => Ok(AbiValue::Bool(false)),
                v if v == U256::from(1) => Ok(AbiValue::Bool(true)),
                v => Err(AbiError::codec("bool", "0 or 1", v)),
            }
        }
        AbiType::Uint(bits) => {
            let value = U256::from_be_bytes(*read_word(data, at, ty)?);
            if value.bit_len() > *bits {
                return Err(AbiError::codec(
                    ty.to_string(),
                    format!("value below 2^{}", bits),
                    value,
                ));
            }
            Ok(AbiValue::Uint(*bits, value))
        }
        AbiType::Int(bits) => {
            let value = I256::from_raw(U256::from_be_bytes(*read_word(data, at, ty)?));
            if !int_fits(value, *bits) {
                return Err(AbiError::codec(
                    ty.to_string(),
                    format!("sign-extended {}-bit value", bits),
                    value,
                ));
            }
            Ok(AbiValue::Int(*bits, value))
        }
        AbiType::Address => {
            let word = read_word(data, at, ty)?;
            check_zero(&word[..12], ty, "12 leading zero bytes")?;
            Ok(AbiValue::Address(Address::from_slice(&word[12..])))
        }
        AbiType::FixedBytes(len) => {
            let word = read_word(data, at, ty)?;
            check_zero(&word[*len..], ty, "zero right padding")?;
            Ok(AbiValue::FixedBytes(word[..*len].to_vec()))
        }
        AbiType::Bytes => read_length_prefixed(data, at, ty).map(|b| AbiValue::Bytes(b.to_vec())),
        AbiType::String => {
            let bytes = read_length_prefixed(data, at, ty)?;
            String::from_utf8(bytes.to_vec())
                .map(AbiValue::String)
                .map_err(|e| AbiError::codec("string", "UTF-8 payload", e))
        }
        AbiType::StaticArray(element, len) => {
            let values = decode_elements(data, at, element, *len, ty)?;
            Ok(AbiValue::StaticArray((**element).clone(), values))
        }
        AbiType::DynamicArray(element) => {
            let len = read_usize(data, at, ty)?;
            let body = at.checked_add(WORD).ok_or_else(|| size_overflow(ty))?;
            let values = decode_elements(data, body, element, len, ty)?;
            Ok(AbiValue::DynamicArray((**element).clone(), values))
        }
        AbiType::Tuple(components) => {
            decode_sequence(data, at, components.iter()).map(AbiValue::Tuple)
        }
    }
}

fn read_word<'a>(data: &'a [u8], at: usize, ty: &AbiType) -> AbiResult<&'a [u8; 32]> {
    data.get(at..at.saturating_add(WORD))
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| {
            AbiError::codec(
                ty.to_string(),
                format!("32 bytes at offset {}", at),
                format!("{} bytes available", data.len().saturating_sub(at)),
            )
        })
}

fn read_usize(data: &[u8], at: usize, ty: &AbiType) -> AbiResult<usize> {
    let value = U256::from_be_bytes(*read_word(data, at, ty)?);
    let n: usize = value
        .try_into()
        .map_err(|_| AbiError::codec(ty.to_string(), "length or offset that fits in usize", value))?;
    if n > data.len() {
        return Err(AbiError::codec(
            ty.to_string(),
            format!("length or offset within {} input bytes", data.len()),
            n,
        ));
    }
    Ok(n)
}

fn read_length_prefixed<'a>(data: &'a [u8], at: usize, ty: &AbiType) -> AbiResult<&'a [u8]> {
    let len = read_usize(data, at, ty)?;
    let start = at.saturating_add(WORD);
    data.get(start..start.saturating_add(len)).ok_or_else(|| {
        AbiError::codec(
            ty.to_string(),
            format!("{} payload bytes", len),
            format!("{} bytes available", data.len().saturating_sub(start)),
        )
    })
}

fn check_zero(bytes: &[u8], ty: &AbiType, expected: &str) -> AbiResult<()> {
    if bytes.iter().any(|b| *b != 0) {
        return Err(AbiError::codec(ty.to_string(), expected, hex::encode(bytes)));
    }
    Ok(())
}
