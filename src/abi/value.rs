//! Typed ABI values.

use alloy::primitives::{Address, I256, U256};

use crate::abi::error::{AbiError, AbiResult};
use crate::abi::types::{check_fixed_len, check_int_width, AbiType};

/// A value paired with enough type information to encode it.
///
/// Array variants carry their element type so that empty arrays still have a
/// well-defined canonical signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiValue {
    Bool(bool),
    Int(usize, I256),
    Uint(usize, U256),
    Address(Address),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    StaticArray(AbiType, Vec<AbiValue>),
    DynamicArray(AbiType, Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// A `uint256` value.
    pub fn uint256(value: impl Into<U256>) -> Self {
        AbiValue::Uint(256, value.into())
    }

    /// An `int256` value.
    pub fn int256(value: I256) -> Self {
        AbiValue::Int(256, value)
    }

    /// A `uintN` value, checked against its width.
    pub fn uint(bits: usize, value: U256) -> AbiResult<Self> {
        let value = AbiValue::Uint(bits, value);
        value.validate()?;
        Ok(value)
    }

    /// An `intN` value, checked against its width.
    pub fn int(bits: usize, value: I256) -> AbiResult<Self> {
        let value = AbiValue::Int(bits, value);
        value.validate()?;
        Ok(value)
    }

    /// A `bytesN` value.
    pub fn fixed_bytes(bytes: impl Into<Vec<u8>>) -> AbiResult<Self> {
        let value = AbiValue::FixedBytes(bytes.into());
        value.validate()?;
        Ok(value)
    }

    /// A `T[N]` value; every element must be of `element`.
    pub fn static_array(element: AbiType, values: Vec<AbiValue>) -> AbiResult<Self> {
        let value = AbiValue::StaticArray(element, values);
        value.validate()?;
        Ok(value)
    }

    /// A `T[]` value; every element must be of `element`.
    pub fn dynamic_array(element: AbiType, values: Vec<AbiValue>) -> AbiResult<Self> {
        let value = AbiValue::DynamicArray(element, values);
        value.validate()?;
        Ok(value)
    }

    /// The type of this value.
    pub fn abi_type(&self) -> AbiType {
        match self {
            AbiValue::Bool(_) => AbiType::Bool,
            AbiValue::Int(bits, _) => AbiType::Int(*bits),
            AbiValue::Uint(bits, _) => AbiType::Uint(*bits),
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::FixedBytes(bytes) => AbiType::FixedBytes(bytes.len()),
            AbiValue::Bytes(_) => AbiType::Bytes,
            AbiValue::String(_) => AbiType::String,
            AbiValue::StaticArray(element, values) => {
                AbiType::static_array(element.clone(), values.len())
            }
            AbiValue::DynamicArray(element, _) => AbiType::dynamic_array(element.clone()),
            AbiValue::Tuple(values) => AbiType::Tuple(values.iter().map(AbiValue::abi_type).collect()),
        }
    }

    /// Check that the value fits its declared type, recursively.
    pub fn validate(&self) -> AbiResult<()> {
        match self {
            AbiValue::Uint(bits, value) => {
                check_int_width(*bits)?;
                if value.bit_len() > *bits {
                    return Err(AbiError::Type(format!(
                        "value {} does not fit in uint{}",
                        value, bits
                    )));
                }
                Ok(())
            }
            AbiValue::Int(bits, value) => {
                check_int_width(*bits)?;
                if !int_fits(*value, *bits) {
                    return Err(AbiError::Type(format!(
                        "value {} does not fit in int{}",
                        value, bits
                    )));
                }
                Ok(())
            }
            AbiValue::FixedBytes(bytes) => check_fixed_len(bytes.len()),
            AbiValue::StaticArray(element, values) => {
                if values.is_empty() {
                    return Err(AbiError::Type(format!(
                        "zero-length static array of {}",
                        element
                    )));
                }
                check_elements(element, values)
            }
            AbiValue::DynamicArray(element, values) => check_elements(element, values),
            AbiValue::Tuple(values) => {
                if values.is_empty() {
                    return Err(AbiError::Type("empty tuple is not encodable".to_string()));
                }
                values.iter().try_for_each(AbiValue::validate)
            }
            AbiValue::Bool(_) | AbiValue::Address(_) | AbiValue::Bytes(_) | AbiValue::String(_) => {
                Ok(())
            }
        }
    }

    /// Whether this value is encoded out-of-line.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiValue::Bytes(_) | AbiValue::String(_) | AbiValue::DynamicArray(..) => true,
            AbiValue::StaticArray(element, _) => element.is_dynamic(),
            AbiValue::Tuple(values) => values.iter().any(AbiValue::is_dynamic),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(_, v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            AbiValue::Int(_, v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbiValue::Bytes(b) | AbiValue::FixedBytes(b) => Some(b),
            _ => None,
        }
    }

    /// Elements of an array or tuple value.
    pub fn as_slice(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::StaticArray(_, values)
            | AbiValue::DynamicArray(_, values)
            | AbiValue::Tuple(values) => Some(values),
            _ => None,
        }
    }
}

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        AbiValue::Bool(value)
    }
}

impl From<Address> for AbiValue {
    fn from(value: Address) -> Self {
        AbiValue::Address(value)
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        AbiValue::Uint(256, value)
    }
}

impl From<I256> for AbiValue {
    fn from(value: I256) -> Self {
        AbiValue::Int(256, value)
    }
}

impl From<String> for AbiValue {
    fn from(value: String) -> Self {
        AbiValue::String(value)
    }
}

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        AbiValue::String(value.to_string())
    }
}

/// Two's-complement range check: both `v` and `!v` must fit in `bits - 1` bits.
pub(crate) fn int_fits(value: I256, bits: usize) -> bool {
    let raw = value.into_raw();
    let magnitude = if value.is_negative() { !raw } else { raw };
    magnitude.bit_len() < bits
}

fn check_elements(element: &AbiType, values: &[AbiValue]) -> AbiResult<()> {
    element.validate()?;
    for (i, value) in values.iter().enumerate() {
        let actual = value.abi_type();
        if &actual != element {
            return Err(AbiError::Type(format!(
                "array element {} has type {}, expected {}",
                i, actual, element
            )));
        }
        value.validate()?;
    }
    Ok(())
}
