use crate::encoding::{encode_encrypted_key, encode_operator_key};
use crate::gen::SSVNetwork;
use crate::ProtocolVersion;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use ssv_types::{BlsPublicKey, ContractCall, EncryptedShare, OperatorPublicKey};

/// Protocol dependent part of a registration
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadShape {
    /// Owner address first, no fee
    Legacy { owner: Address },
    /// Funding amount last, in token wei
    Current { amount: U256 },
}

/// Everything needed to register a validator with its operators. Holds only public and
/// encrypted material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationPayload {
    pub validator_public_key: BlsPublicKey,
    /// In slot order
    pub operator_public_keys: Vec<OperatorPublicKey>,
    /// Share `i` belongs to operator `i`
    pub share_public_keys: Vec<BlsPublicKey>,
    pub encrypted_shares: Vec<EncryptedShare>,
    pub shape: PayloadShape,
}

impl RegistrationPayload {
    pub fn protocol(&self) -> ProtocolVersion {
        match self.shape {
            PayloadShape::Legacy { .. } => ProtocolVersion::Legacy,
            PayloadShape::Current { .. } => ProtocolVersion::Current,
        }
    }

    /// The funding amount, if the protocol has one
    pub fn amount(&self) -> Option<U256> {
        match self.shape {
            PayloadShape::Legacy { .. } => None,
            PayloadShape::Current { amount } => Some(amount),
        }
    }

    pub fn method(&self) -> &'static str {
        match self.shape {
            PayloadShape::Legacy { .. } => "addValidator",
            PayloadShape::Current { .. } => "registerValidator",
        }
    }

    /// ABI encoded registration call
    pub fn calldata(&self) -> Bytes {
        let public_key = Bytes::copy_from_slice(self.validator_public_key.as_bytes());
        let operator_public_keys: Vec<Bytes> = self
            .operator_public_keys
            .iter()
            .map(encode_operator_key)
            .collect();
        let shares_public_keys: Vec<Bytes> = self
            .share_public_keys
            .iter()
            .map(|key| Bytes::copy_from_slice(key.as_bytes()))
            .collect();
        let encrypted_keys: Vec<Bytes> = self
            .encrypted_shares
            .iter()
            .map(|share| encode_encrypted_key(&share.encrypted_private_key))
            .collect();

        match self.shape {
            PayloadShape::Legacy { owner } => SSVNetwork::addValidatorCall {
                ownerAddress: owner,
                publicKey: public_key,
                operatorPublicKeys: operator_public_keys,
                sharesPublicKeys: shares_public_keys,
                encryptedKeys: encrypted_keys,
            }
            .abi_encode()
            .into(),
            PayloadShape::Current { amount } => SSVNetwork::registerValidatorCall {
                publicKey: public_key,
                operatorPublicKeys: operator_public_keys,
                sharesPublicKeys: shares_public_keys,
                encryptedKeys: encrypted_keys,
                amount,
            }
            .abi_encode()
            .into(),
        }
    }

    pub fn to_call(&self, from: Address, contract: Address) -> ContractCall {
        ContractCall {
            from,
            to: contract,
            input: self.calldata(),
            method: self.method(),
        }
    }
}
