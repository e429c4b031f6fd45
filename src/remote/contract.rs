//! Contract calls, transactions and deployment.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};

use crate::abi::{encode_constructor, AbiValue, FunctionDescriptor};
use crate::client::Receipt;
use crate::error::{Error, Result};
use crate::manager::{TransactionManager, TransactionRequest};
use crate::remote::call::RemoteCall;

/// A deployed contract bound to a transaction manager.
#[derive(Debug, Clone)]
pub struct ContractCaller {
    manager: Arc<TransactionManager>,
    address: Address,
    quota: u64,
    value: U256,
}

impl ContractCaller {
    pub fn new(manager: Arc<TransactionManager>, address: Address, quota: u64) -> Self {
        Self {
            manager,
            address,
            quota,
            value: U256::ZERO,
        }
    }

    /// Native value attached to every state-changing call.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn quota(&self) -> u64 {
        self.quota
    }

    /// Submit `function` as a transaction and wait for its receipt.
    pub fn execute_transaction(&self, function: &FunctionDescriptor) -> RemoteCall<Receipt> {
        let manager = self.manager.clone();
        let function = function.clone();
        let (address, quota, value) = (self.address, self.quota, self.value);

        RemoteCall::new(move || {
            let manager = manager.clone();
            let function = function.clone();
            async move {
                let data = function.encode_call_data()?;
                tracing::debug!(
                    contract = %address,
                    function = %function.signature(),
                    "Executing contract transaction"
                );
                let request = TransactionRequest::call(address, data, quota).with_value(value);
                manager.execute(request).await
            }
        })
    }

    /// Query `function` at the latest block and decode its outputs.
    pub fn execute_call(&self, function: &FunctionDescriptor) -> RemoteCall<Vec<AbiValue>> {
        let manager = self.manager.clone();
        let function = function.clone();
        let address = self.address;

        RemoteCall::new(move || {
            let manager = manager.clone();
            let function = function.clone();
            async move {
                let data = function.encode_call_data()?;
                let output = manager.call(address, &data).await?;
                Ok(function.decode_output_hex(&output)?)
            }
        })
    }

    /// Deploy `bytecode` with ABI-encoded constructor arguments.
    ///
    /// Fails with [`Error::MissingContractAddress`] when the confirmed
    /// receipt carries no contract address.
    pub fn deploy(
        manager: Arc<TransactionManager>,
        bytecode: impl Into<Bytes>,
        constructor_args: Vec<AbiValue>,
        quota: u64,
        value: U256,
    ) -> RemoteCall<Receipt> {
        let bytecode: Bytes = bytecode.into();

        RemoteCall::new(move || {
            let manager = manager.clone();
            let bytecode = bytecode.clone();
            let constructor_args = constructor_args.clone();
            async move {
                let code = encode_constructor(&bytecode, &constructor_args)?;
                let request = TransactionRequest::deploy(code, quota).with_value(value);
                let receipt = manager.execute(request).await?;

                match receipt.contract_address {
                    Some(contract) => {
                        tracing::info!(
                            tx_hash = %receipt.transaction_hash,
                            contract = %contract,
                            "Contract deployed"
                        );
                        Ok(receipt)
                    }
                    None => Err(Error::MissingContractAddress {
                        tx_hash: receipt.transaction_hash,
                    }),
                }
            }
        })
    }

    /// Bind to the contract created by a deployment receipt.
    pub fn from_receipt(
        manager: Arc<TransactionManager>,
        receipt: &Receipt,
        quota: u64,
    ) -> Result<Self> {
        let address = receipt
            .contract_address
            .ok_or(Error::MissingContractAddress {
                tx_hash: receipt.transaction_hash,
            })?;
        Ok(Self::new(manager, address, quota))
    }
}
