//! Function descriptors and call-data construction.

use alloy::primitives::{keccak256, Bytes};

use crate::abi::decoder::{decode, decode_hex};
use crate::abi::encoder::encode;
use crate::abi::error::{AbiError, AbiResult};
use crate::abi::types::AbiType;
use crate::abi::value::AbiValue;

/// First four bytes of `keccak256("name(type1,type2,...)")`.
pub fn selector(name: &str, inputs: &[AbiType]) -> [u8; 4] {
    let hash = keccak256(signature(name, inputs).as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

fn signature(name: &str, inputs: &[AbiType]) -> String {
    let params: Vec<String> = inputs.iter().map(AbiType::canonical_name).collect();
    format!("{}({})", name, params.join(","))
}

/// A contract function: name, ordered input values and output placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    name: String,
    inputs: Vec<AbiValue>,
    outputs: Vec<AbiType>,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, inputs: Vec<AbiValue>, outputs: Vec<AbiType>) -> Self {
        Self {
            name: name.into(),
            inputs,
            outputs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[AbiValue] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[AbiType] {
        &self.outputs
    }

    pub fn input_types(&self) -> Vec<AbiType> {
        self.inputs.iter().map(AbiValue::abi_type).collect()
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        signature(&self.name, &self.input_types())
    }

    pub fn selector(&self) -> [u8; 4] {
        selector(&self.name, &self.input_types())
    }

    /// Selector followed by the encoded inputs.
    pub fn encode_call_data(&self) -> AbiResult<Bytes> {
        if self.name.is_empty() {
            return Err(AbiError::Type("function name must not be empty".to_string()));
        }
        let args = encode(&self.inputs)?;
        let mut data = Vec::with_capacity(4 + args.len());
        data.extend_from_slice(&self.selector());
        data.extend(args);
        Ok(data.into())
    }

    /// Call data as `0x`-prefixed hex, the form used by `call` and transactions.
    pub fn encode_call_data_hex(&self) -> AbiResult<String> {
        self.encode_call_data()
            .map(|data| format!("0x{}", hex::encode(data)))
    }

    /// Decode raw return data against the declared outputs.
    pub fn decode_output(&self, data: &[u8]) -> AbiResult<Vec<AbiValue>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        decode(data, &self.outputs)
    }

    /// Decode hex return data, as returned by the node's `call`.
    pub fn decode_output_hex(&self, data: &str) -> AbiResult<Vec<AbiValue>> {
        decode_hex(data, &self.outputs)
    }
}

/// Contract creation payload: bytecode followed by encoded constructor arguments.
pub fn encode_constructor(bytecode: &[u8], args: &[AbiValue]) -> AbiResult<Bytes> {
    let mut data = bytecode.to_vec();
    data.extend(encode(args)?);
    Ok(data.into())
}
