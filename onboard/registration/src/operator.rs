use crate::encoding::encode_operator_key;
use crate::gen::SSVNetwork;
use crate::ProtocolVersion;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use ssv_types::{ContractCall, OperatorPublicKey};

/// Registration of a new operator with the network
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorRegistration {
    pub name: String,
    pub public_key: OperatorPublicKey,
    /// Only part of legacy registrations
    pub owner: Address,
    /// Fee per block in token wei. Only part of current registrations.
    pub fee: U256,
}

impl OperatorRegistration {
    pub fn new(name: impl Into<String>, public_key: OperatorPublicKey) -> Self {
        Self {
            name: name.into(),
            public_key,
            owner: Address::ZERO,
            fee: U256::ZERO,
        }
    }

    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_fee(mut self, fee: U256) -> Self {
        self.fee = fee;
        self
    }

    pub fn calldata(&self, protocol: ProtocolVersion) -> Bytes {
        let public_key = encode_operator_key(&self.public_key);
        match protocol {
            ProtocolVersion::Legacy => SSVNetwork::addOperatorCall {
                name: self.name.clone(),
                ownerAddress: self.owner,
                publicKey: public_key,
            }
            .abi_encode()
            .into(),
            ProtocolVersion::Current => SSVNetwork::registerOperatorCall {
                name: self.name.clone(),
                publicKey: public_key,
                fee: self.fee,
            }
            .abi_encode()
            .into(),
        }
    }

    pub fn to_call(&self, protocol: ProtocolVersion, from: Address, contract: Address) -> ContractCall {
        let method = match protocol {
            ProtocolVersion::Legacy => "addOperator",
            ProtocolVersion::Current => "registerOperator",
        };
        ContractCall {
            from,
            to: contract,
            input: self.calldata(protocol),
            method,
        }
    }
}
