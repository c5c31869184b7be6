use crate::{OracleError, ProviderError};
use alloy::primitives::{Address, B256};
use ssv_types::ContractCall;
use std::future::Future;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Execution status, absent if the provider does not report one
    pub status: Option<bool>,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == Some(true)
    }
}

/// Progress of a sent transaction as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendEvent {
    /// May be reported more than once
    TransactionHash(B256),
    Receipt(TransactionReceipt),
    Error(ProviderError),
}

/// The wallet and the network contract behind it
pub trait ContractProvider {
    /// Account transactions are sent from
    fn account(&self) -> Address;

    fn estimate_gas(
        &self,
        call: &ContractCall,
    ) -> impl Future<Output = Result<u64, ProviderError>> + Send;

    /// Sends the call. Progress is streamed on the returned channel until the sender is dropped.
    fn send(&self, call: ContractCall) -> mpsc::UnboundedReceiver<SendEvent>;
}

/// Converts native token amounts into a display currency
pub trait PriceOracle {
    /// Returns the fiat price of one native token for valuing `native_amount`
    fn estimate_fiat_value(
        &self,
        native_amount: f64,
    ) -> impl Future<Output = Result<f64, OracleError>> + Send;
}
