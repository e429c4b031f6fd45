//! ABI type descriptors.
//!
//! An [`AbiType`] carries no value. It is used as an output placeholder when
//! decoding and to compute canonical function signatures.

use std::fmt;
use std::str::FromStr;

use crate::abi::error::{AbiError, AbiResult};
use crate::abi::WORD;

/// A Solidity ABI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    Bool,
    /// Signed integer of the given bit width (8..=256, multiple of 8).
    Int(usize),
    /// Unsigned integer of the given bit width (8..=256, multiple of 8).
    Uint(usize),
    Address,
    /// `bytesN` with N in 1..=32.
    FixedBytes(usize),
    /// Dynamic `bytes`.
    Bytes,
    /// UTF-8 `string`.
    String,
    /// `T[N]`.
    StaticArray(Box<AbiType>, usize),
    /// `T[]`.
    DynamicArray(Box<AbiType>),
    /// `(T1,T2,...)`.
    Tuple(Vec<AbiType>),
}

impl AbiType {
    /// `uint256`, the most common numeric type.
    pub const UINT256: AbiType = AbiType::Uint(256);

    /// Build a `T[N]` type.
    pub fn static_array(element: AbiType, len: usize) -> Self {
        AbiType::StaticArray(Box::new(element), len)
    }

    /// Build a `T[]` type.
    pub fn dynamic_array(element: AbiType) -> Self {
        AbiType::DynamicArray(Box::new(element))
    }

    /// Check that widths and lengths are within what the ABI supports.
    pub fn validate(&self) -> AbiResult<()> {
        match self {
            AbiType::Int(bits) | AbiType::Uint(bits) => check_int_width(*bits),
            AbiType::FixedBytes(len) => check_fixed_len(*len),
            AbiType::StaticArray(element, len) => {
                if *len == 0 {
                    return Err(AbiError::Type(format!(
                        "zero-length static array {}",
                        self
                    )));
                }
                element.validate()?;
                self.check_head_size()
            }
            AbiType::DynamicArray(element) => element.validate(),
            AbiType::Tuple(components) => {
                if components.is_empty() {
                    return Err(AbiError::Type("empty tuple is not encodable".to_string()));
                }
                components.iter().try_for_each(AbiType::validate)?;
                self.check_head_size()
            }
            AbiType::Bool | AbiType::Address | AbiType::Bytes | AbiType::String => Ok(()),
        }
    }

    /// Whether values of this type are encoded out-of-line.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::DynamicArray(_) => true,
            AbiType::StaticArray(element, _) => element.is_dynamic(),
            AbiType::Tuple(components) => components.iter().any(AbiType::is_dynamic),
            _ => false,
        }
    }

    /// Number of 32-byte words this type occupies in its enclosing head, or
    /// `None` if that count overflows `usize`.
    ///
    /// Dynamic types always take a single word (the offset pointer).
    pub fn head_words(&self) -> Option<usize> {
        if self.is_dynamic() {
            return Some(1);
        }
        match self {
            AbiType::StaticArray(element, len) => element.head_words()?.checked_mul(*len),
            AbiType::Tuple(components) => components
                .iter()
                .try_fold(0usize, |acc, c| acc.checked_add(c.head_words()?)),
            _ => Some(1),
        }
    }

    /// Head size in bytes, or `None` on overflow.
    pub fn head_size(&self) -> Option<usize> {
        self.head_words()?.checked_mul(WORD)
    }

    fn check_head_size(&self) -> AbiResult<()> {
        match self.head_size() {
            Some(_) => Ok(()),
            None => Err(AbiError::Type(format!(
                "encoded size of {} overflows the address space",
                self
            ))),
        }
    }

    /// Canonical name used in function signatures, e.g. `uint256[2]`.
    pub fn canonical_name(&self) -> String {
        self.to_string()
    }
}

pub(crate) fn check_int_width(bits: usize) -> AbiResult<()> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::Type(format!(
            "integer width {} is not a multiple of 8 in 8..=256",
            bits
        )));
    }
    Ok(())
}

pub(crate) fn check_fixed_len(len: usize) -> AbiResult<()> {
    if len == 0 || len > 32 {
        return Err(AbiError::Type(format!(
            "fixed bytes length {} is outside 1..=32",
            len
        )));
    }
    Ok(())
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Bool => f.write_str("bool"),
            AbiType::Int(bits) => write!(f, "int{}", bits),
            AbiType::Uint(bits) => write!(f, "uint{}", bits),
            AbiType::Address => f.write_str("address"),
            AbiType::FixedBytes(len) => write!(f, "bytes{}", len),
            AbiType::Bytes => f.write_str("bytes"),
            AbiType::String => f.write_str("string"),
            AbiType::StaticArray(element, len) => write!(f, "{}[{}]", element, len),
            AbiType::DynamicArray(element) => write!(f, "{}[]", element),
            AbiType::Tuple(components) => {
                f.write_str("(")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", component)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for AbiType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_type(s.trim())?;
        parsed.validate()?;
        Ok(parsed)
    }
}

fn parse_type(s: &str) -> AbiResult<AbiType> {
    // Array suffixes bind to everything before the last `[`.
    if let Some(stripped) = s.strip_suffix(']') {
        let open = stripped
            .rfind('[')
            .ok_or_else(|| AbiError::Type(format!("unbalanced brackets in '{}'", s)))?;
        let element = parse_type(&stripped[..open])?;
        let len = &stripped[open + 1..];
        if len.is_empty() {
            return Ok(AbiType::dynamic_array(element));
        }
        let len: usize = len
            .parse()
            .map_err(|_| AbiError::Type(format!("invalid array length '{}' in '{}'", len, s)))?;
        return Ok(AbiType::static_array(element, len));
    }

    if let Some(body) = s.strip_prefix('(') {
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| AbiError::Type(format!("unbalanced parentheses in '{}'", s)))?;
        let components = split_components(body)?
            .into_iter()
            .map(parse_type)
            .collect::<AbiResult<Vec<_>>>()?;
        return Ok(AbiType::Tuple(components));
    }

    match s {
        "bool" => Ok(AbiType::Bool),
        "address" => Ok(AbiType::Address),
        "string" => Ok(AbiType::String),
        "bytes" => Ok(AbiType::Bytes),
        "uint" => Ok(AbiType::Uint(256)),
        "int" => Ok(AbiType::Int(256)),
        _ => {
            if let Some(bits) = s.strip_prefix("uint") {
                parse_width(bits, s).map(AbiType::Uint)
            } else if let Some(bits) = s.strip_prefix("int") {
                parse_width(bits, s).map(AbiType::Int)
            } else if let Some(len) = s.strip_prefix("bytes") {
                parse_width(len, s).map(AbiType::FixedBytes)
            } else {
                Err(AbiError::Type(format!("unknown type '{}'", s)))
            }
        }
    }
}

fn parse_width(digits: &str, full: &str) -> AbiResult<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::Type(format!("unknown type '{}'", full)));
    }
    digits
        .parse()
        .map_err(|_| AbiError::Type(format!("unknown type '{}'", full)))
}

/// Split a tuple body on commas that are not nested in parentheses.
fn split_components(body: &str) -> AbiResult<Vec<&str>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| AbiError::Type(format!("unbalanced parentheses in '({})'", body)))?;
            }
            ',' if depth == 0 => {
                parts.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(AbiError::Type(format!("unbalanced parentheses in '({})'", body)));
    }
    parts.push(body[start..].trim());
    Ok(parts)
}
