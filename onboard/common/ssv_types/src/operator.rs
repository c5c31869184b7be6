use crate::util::parse_rsa;
use alloy::primitives::{Address, U256};
use openssl::pkey::Public;
use openssl::rsa::Rsa;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Public key of an operator: a base64 encoded PEM RSA public key, unique across the network.
///
/// The encoded string is the identity of the operator, two descriptors refer to the same operator
/// iff their keys are equal.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperatorPublicKey(String);

impl OperatorPublicKey {
    /// Wraps an already encoded key without checking that it parses.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Wraps an encoded key after making sure it is a valid RSA public key.
    pub fn parse(encoded: &str) -> Result<Self, String> {
        parse_rsa(encoded)?;
        Ok(Self(encoded.trim().to_string()))
    }

    pub fn from_rsa(rsa_pubkey: &Rsa<Public>) -> Result<Self, String> {
        crate::util::encode_rsa(rsa_pubkey).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the key into its RSA representation
    pub fn to_rsa(&self) -> Result<Rsa<Public>, String> {
        parse_rsa(&self.0)
    }
}

impl Display for OperatorPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys are long, the tail is enough to tell them apart in logs
        let tail = self.0.len().saturating_sub(16);
        write!(f, "..{}", self.0.get(tail..).unwrap_or(&self.0))
    }
}

/// An operator as listed in the operator directory.
///
/// Everything but the fee and the validator count is fixed once fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorDescriptor {
    /// Network unique public key
    pub public_key: OperatorPublicKey,
    /// Display name
    pub name: String,
    /// Fee charged per block, in token wei
    pub fee: U256,
    /// Owner of the operator
    pub owner: Address,
    /// Whether the operator passed verification
    pub verified: bool,
    /// Whether the operator runs on a DAppNode
    pub dapp_node: bool,
    /// Number of validators the operator currently serves
    pub validator_count: u64,
}

impl OperatorDescriptor {
    pub fn new(public_key: OperatorPublicKey, name: impl Into<String>) -> Self {
        Self {
            public_key,
            name: name.into(),
            fee: U256::ZERO,
            owner: Address::ZERO,
            verified: false,
            dapp_node: false,
            validator_count: 0,
        }
    }

    pub fn with_fee(mut self, fee: U256) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }
}
