use ssv_types::{Password, ValidatorSecret};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeystoreError {
    InvalidPassword,
    /// The file is not a keystore this decoder understands
    InvalidFile(String),
}

impl Display for KeystoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KeystoreError::InvalidPassword => write!(f, "Invalid keystore password"),
            KeystoreError::InvalidFile(e) => write!(f, "Invalid keystore file: {}", e),
        }
    }
}

impl std::error::Error for KeystoreError {}

/// Decrypts an encrypted validator key file
pub trait KeystoreDecoder {
    fn decrypt(&self, keystore: &[u8], password: &Password)
        -> Result<ValidatorSecret, KeystoreError>;
}
