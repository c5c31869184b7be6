use crate::util::decode_hex;
use crate::OperatorPublicKey;
use derive_more::{Deref, From};
use std::fmt::{Debug, Display};
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// phase0.PublicKeyLength
pub const PUBLIC_KEY_LENGTH: usize = 48;
/// Length of a share private key
pub const SHARE_KEY_LENGTH: usize = 32;

/// A compressed BLS12-381 G1 public key, as used for validators and their shares.
#[derive(Clone, Copy, Eq, PartialEq, Hash, From, Deref)]
pub struct BlsPublicKey(pub [u8; PUBLIC_KEY_LENGTH]);

impl BlsPublicKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Display for BlsPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for BlsPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlsPublicKey({})", self)
    }
}

impl FromStr for BlsPublicKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| format!("Public key has wrong length: {}", v.len()))?;
        Ok(Self(bytes))
    }
}

/// Private key material of a single share. Overwritten when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ShareSecret([u8; SHARE_KEY_LENGTH]);

impl ShareSecret {
    pub fn new(bytes: [u8; SHARE_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Big endian scalar bytes of the share key
    pub fn expose(&self) -> &[u8; SHARE_KEY_LENGTH] {
        &self.0
    }
}

impl Debug for ShareSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ShareSecret(<redacted>)")
    }
}

/// One of N shares of a split validator key.
#[derive(Debug, Clone)]
pub struct Share {
    /// Position of the share, 1..=N. Matches the evaluation point of the sharing polynomial.
    pub index: u64,
    /// The public key of this Share
    pub share_pubkey: BlsPublicKey,
    /// The private key of this Share
    pub secret: ShareSecret,
}

/// A share private key encrypted to exactly one operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedShare {
    /// The operator that is able to decrypt this share
    pub operator: OperatorPublicKey,
    /// The public key of the encrypted share
    pub share_pubkey: BlsPublicKey,
    /// RSA ciphertext of the share private key
    pub encrypted_private_key: Vec<u8>,
}
