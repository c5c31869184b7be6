/// Errors raised while splitting a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// The secret is not a valid non-zero BLS12-381 scalar
    InvalidSecret(String),
    /// At least one share must be requested
    InvalidCount(usize),
    /// The primitive library failed, this is never retried
    Crypto(String),
}

impl std::error::Error for SplitError {}

impl std::fmt::Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidSecret(reason) => write!(f, "Invalid validator secret: {}", reason),
            Self::InvalidCount(count) => {
                write!(f, "Cannot split a key into {} shares", count)
            }
            Self::Crypto(reason) => write!(f, "Key splitting failed: {}", reason),
        }
    }
}

/// Errors raised while encrypting shares to operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptError {
    /// Shares and recipients must be paired one to one
    LengthMismatch { shares: usize, recipients: usize },
    /// A recipient key could not be parsed
    InvalidRecipientKey(String),
    /// The RSA primitive failed
    Crypto(String),
}

impl std::error::Error for EncryptError {}

impl std::fmt::Display for EncryptError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::LengthMismatch { shares, recipients } => write!(
                f,
                "Got {} shares for {} recipients, they must match",
                shares, recipients
            ),
            Self::InvalidRecipientKey(reason) => {
                write!(f, "Invalid operator public key: {}", reason)
            }
            Self::Crypto(reason) => write!(f, "Share encryption failed: {}", reason),
        }
    }
}
