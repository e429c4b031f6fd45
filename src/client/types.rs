//! JSON-RPC request and response shapes.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::transport::TransportError;

/// Block selector for state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    #[default]
    Latest,
    Earliest,
    Number(u64),
}

impl BlockTag {
    pub fn to_param(&self) -> Value {
        match self {
            BlockTag::Latest => Value::from("latest"),
            BlockTag::Earliest => Value::from("earliest"),
            BlockTag::Number(n) => Value::from(format!("0x{:x}", n)),
        }
    }
}

/// Parameters of a read-only `call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    /// `0x`-prefixed call data.
    pub data: String,
}

/// Result of `sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTransactionResult {
    pub hash: B256,
    pub status: String,
}

impl SendTransactionResult {
    /// Status the node reports for an accepted transaction.
    pub const STATUS_OK: &'static str = "OK";

    pub fn is_ok(&self) -> bool {
        self.status == Self::STATUS_OK
    }
}

/// Execution outcome of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: B256,
    #[serde(default, with = "quantity::opt")]
    pub transaction_index: Option<u64>,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default, with = "quantity::opt")]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub cumulative_quota_used: Option<U256>,
    #[serde(default)]
    pub quota_used: Option<U256>,
    /// Set when the transaction created a contract.
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub logs: Vec<Value>,
    /// Present when execution failed.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        self.error_message.is_none()
    }
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_u64(method: &str, value: &Value) -> Result<u64, TransportError> {
    let s = value
        .as_str()
        .ok_or_else(|| TransportError::decode(method, format!("expected hex string, got {}", value)))?;
    quantity::parse_u64(s).map_err(|e| TransportError::decode(method, e))
}

/// Parse a `0x`-prefixed hex quantity that may exceed 64 bits.
pub fn parse_u256(method: &str, value: &Value) -> Result<U256, TransportError> {
    let s = value
        .as_str()
        .ok_or_else(|| TransportError::decode(method, format!("expected hex string, got {}", value)))?;
    let digits = strip_hex_prefix(s)
        .ok_or_else(|| TransportError::decode(method, format!("'{}' lacks 0x prefix", s)))?;
    if digits.is_empty() {
        return Err(TransportError::decode(method, "empty quantity"));
    }
    U256::from_str_radix(digits, 16).map_err(|e| TransportError::decode(method, e))
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

/// Serde helpers for `0x` hex quantities.
pub(crate) mod quantity {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse_u64(s: &str) -> Result<u64, String> {
        let digits = super::strip_hex_prefix(s).ok_or_else(|| format!("'{}' lacks 0x prefix", s))?;
        if digits.is_empty() {
            return Err("empty quantity".to_string());
        }
        u64::from_str_radix(digits, 16).map_err(|e| format!("'{}': {}", s, e))
    }

    pub mod opt {
        use super::*;

        pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.serialize_str(&format!("0x{:x}", v)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|s| parse_u64(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_tag_params() {
        assert_eq!(BlockTag::Latest.to_param(), json!("latest"));
        assert_eq!(BlockTag::Number(255).to_param(), json!("0xff"));
    }

    #[test]
    fn test_parse_quantities() {
        assert_eq!(parse_u64("blockNumber", &json!("0x1a")).unwrap(), 26);
        assert!(parse_u64("blockNumber", &json!("1a")).is_err());
        assert!(parse_u64("blockNumber", &json!(26)).is_err());
        assert_eq!(
            parse_u256("getBalance", &json!("0xde0b6b3a7640000")).unwrap(),
            U256::from(1_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_receipt_success_and_failure() {
        let receipt: Receipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "11".repeat(32)),
            "transactionIndex": "0x0",
            "blockHash": format!("0x{}", "22".repeat(32)),
            "blockNumber": "0x1f",
            "cumulativeQuotaUsed": "0x5208",
            "quotaUsed": "0x5208",
            "contractAddress": null,
            "logs": [],
            "root": null,
            "logsBloom": "0x00",
            "errorMessage": null
        }))
        .unwrap();
        assert!(receipt.is_success());
        assert_eq!(receipt.block_number, Some(31));
        assert_eq!(receipt.quota_used, Some(U256::from(21000)));

        let failed: Receipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "11".repeat(32)),
            "errorMessage": "Reverted."
        }))
        .unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.block_number, None);
    }

    #[test]
    fn test_call_request_omits_missing_from() {
        let request = CallRequest {
            from: None,
            to: Address::ZERO,
            data: "0x6bacc53f".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("from").is_none());
        assert_eq!(value["data"], json!("0x6bacc53f"));
    }
}
