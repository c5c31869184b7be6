use alloy::primitives::{Address, Bytes};

/// A fully encoded call against the network contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCall {
    /// Account the call is issued from
    pub from: Address,
    /// The network contract
    pub to: Address,
    /// ABI encoded calldata
    pub input: Bytes,
    /// Human readable name of the invoked method, for logging
    pub method: &'static str,
}
