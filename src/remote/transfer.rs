//! Native value transfers and system contract reads.

use std::sync::Arc;

use alloy::primitives::{address, Address, Bytes, U256};

use crate::abi::{AbiType, FunctionDescriptor};
use crate::client::{AppChainClient, BlockTag, CallRequest, Receipt};
use crate::error::{Error, Result};
use crate::manager::{TransactionManager, TransactionRequest};
use crate::remote::call::RemoteCall;
use crate::transaction::parse_value;

/// Moves native value from the manager's sender.
#[derive(Debug, Clone)]
pub struct Transfer {
    manager: Arc<TransactionManager>,
}

impl Transfer {
    pub fn new(manager: Arc<TransactionManager>) -> Self {
        Self { manager }
    }

    /// Send `value` to `to` with empty call data and wait for the receipt.
    pub fn send_funds(&self, to: Address, value: U256, quota: u64) -> RemoteCall<Receipt> {
        let manager = self.manager.clone();

        RemoteCall::new(move || {
            let manager = manager.clone();
            async move {
                tracing::debug!(to = %to, value = %value, "Sending funds");
                let request = TransactionRequest::call(to, Bytes::new(), quota).with_value(value);
                manager.execute(request).await
            }
        })
    }

    /// Like [`send_funds`](Self::send_funds) with a decimal or `0x` hex amount.
    pub fn send_funds_str(&self, to: Address, value: &str, quota: u64) -> Result<RemoteCall<Receipt>> {
        let value = parse_value(value).map_err(Error::from)?;
        Ok(self.send_funds(to, value, quota))
    }
}

/// Built-in contract that reports the price of one quota unit.
pub const QUOTA_PRICE_ADDRESS: Address = address!("ffffffffffffffffffffffffffffffffff020010");

/// Read access to chain system contracts.
#[derive(Debug, Clone)]
pub struct SystemContract {
    client: AppChainClient,
}

impl SystemContract {
    pub fn new(client: AppChainClient) -> Self {
        Self { client }
    }

    /// Current quota price, queried as `from`.
    pub fn quota_price(&self, from: Address) -> RemoteCall<U256> {
        let client = self.client.clone();

        RemoteCall::new(move || {
            let client = client.clone();
            async move {
                let function =
                    FunctionDescriptor::new("getQuotaPrice", vec![], vec![AbiType::UINT256]);
                let request = CallRequest {
                    from: Some(from),
                    to: QUOTA_PRICE_ADDRESS,
                    data: function.encode_call_data_hex()?,
                };
                let output = client.call(&request, BlockTag::Latest).await?;
                let values = function.decode_output_hex(&output)?;

                values.first().and_then(|value| value.as_uint()).ok_or_else(|| {
                    Error::Runtime("quota price contract returned no value".to_string())
                })
            }
        })
    }
}
