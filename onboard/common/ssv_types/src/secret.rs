use crate::util::decode_hex;
use derive_more::{Deref, Display};
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use zeroize::{Zeroize, Zeroizing};

/// Length of a well formed validator secret key
pub const SECRET_KEY_LENGTH: usize = 32;

static NEXT_SECRET_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a loaded secret. Two secrets loaded separately never share an id, even if the key
/// material is the same. The id is derived from nothing secret.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Deref)]
pub struct SecretId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// The raw key could not be decoded
    InvalidEncoding(String),
}

impl std::error::Error for SecretError {}

impl std::fmt::Display for SecretError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidEncoding(e) => write!(f, "Invalid validator key encoding: {}", e),
        }
    }
}

/// Raw validator signing key, held in memory only while a registration flow needs it.
///
/// The buffer is overwritten when the secret is dropped or explicitly scrubbed. The type is
/// deliberately not `Clone`: a secret has exactly one owner.
pub struct ValidatorSecret {
    id: SecretId,
    key: Zeroizing<Vec<u8>>,
    scrubbed: bool,
}

impl ValidatorSecret {
    /// Takes ownership of raw key bytes. No validation happens here, a malformed key is rejected
    /// when it is split.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            id: SecretId(NEXT_SECRET_ID.fetch_add(1, Ordering::Relaxed)),
            key: Zeroizing::new(bytes),
            scrubbed: false,
        }
    }

    /// Parses a hex encoded key, with or without `0x` prefix. The input string is not scrubbed,
    /// that remains the responsibility of the caller.
    pub fn from_hex(data: &str) -> Result<Self, SecretError> {
        let bytes = decode_hex(data).map_err(SecretError::InvalidEncoding)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn id(&self) -> SecretId {
        self.id
    }

    /// Raw key bytes. Empty once scrubbed.
    pub fn expose(&self) -> &[u8] {
        &self.key
    }

    pub fn is_scrubbed(&self) -> bool {
        self.scrubbed
    }

    /// Overwrites and releases the key material. The secret stays around as an empty shell so
    /// that later use fails loudly instead of silently reusing stale bytes.
    pub fn scrub(&mut self) {
        self.key.zeroize();
        self.scrubbed = true;
    }
}

impl Debug for ValidatorSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorSecret")
            .field("id", &self.id)
            .field("scrubbed", &self.scrubbed)
            .finish_non_exhaustive()
    }
}

/// Keystore password. Overwritten when dropped.
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(password: String) -> Self {
        Self(Zeroizing::new(password))
    }

    /// The password with surrounding whitespace removed
    pub fn expose(&self) -> &str {
        self.0.trim()
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
