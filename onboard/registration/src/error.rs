use keysplit::{EncryptError, SplitError};
use std::fmt::{Display, Formatter};

/// Broad category of a build failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The inputs were unusable
    Validation,
    /// The primitive library failed
    Crypto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Fewer operators are selected than the quorum requires
    QuorumNotMet { selected: usize, required: usize },
    Split(SplitError),
    Encrypt(EncryptError),
    /// The registration cost does not fit in 256 bits
    Fee(String),
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::QuorumNotMet { .. } | BuildError::Fee(_) => ErrorKind::Validation,
            BuildError::Split(SplitError::Crypto(_)) => ErrorKind::Crypto,
            BuildError::Split(_) => ErrorKind::Validation,
            BuildError::Encrypt(EncryptError::Crypto(_)) => ErrorKind::Crypto,
            BuildError::Encrypt(_) => ErrorKind::Validation,
        }
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::QuorumNotMet { selected, required } => write!(
                f,
                "Quorum not met: {} of {} required operators selected",
                selected, required
            ),
            BuildError::Split(e) => write!(f, "{}", e),
            BuildError::Encrypt(e) => write!(f, "{}", e),
            BuildError::Fee(e) => write!(f, "Invalid registration fee: {}", e),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<SplitError> for BuildError {
    fn from(e: SplitError) -> Self {
        BuildError::Split(e)
    }
}

impl From<EncryptError> for BuildError {
    fn from(e: EncryptError) -> Self {
        BuildError::Encrypt(e)
    }
}

/// Errors reading state from the network contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The call itself failed
    Call(String),
    /// The call returned data that does not match the contract interface
    Decode(String),
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Call(e) => write!(f, "Contract call failed: {}", e),
            ReadError::Decode(e) => write!(f, "Failed to decode contract response: {}", e),
        }
    }
}

impl std::error::Error for ReadError {}
