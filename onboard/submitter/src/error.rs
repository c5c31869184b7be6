use alloy::primitives::B256;
use std::fmt::{Display, Formatter};

/// Failures reported by the wallet or the node behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The RPC request failed
    Rpc(String),
    /// The user declined to sign
    Rejected,
    /// The transaction was mined but did not succeed
    Reverted(B256),
    /// The provider stopped reporting before the transaction reached an outcome
    Disconnected,
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Rpc(e) => write!(f, "RPC error: {}", e),
            ProviderError::Rejected => write!(f, "Transaction rejected by the user"),
            ProviderError::Reverted(hash) => write!(f, "Transaction {} reverted", hash),
            ProviderError::Disconnected => write!(f, "Provider disconnected"),
        }
    }
}

impl std::error::Error for ProviderError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleError(pub String);

impl Display for OracleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Price lookup failed: {}", self.0)
    }
}

impl std::error::Error for OracleError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Gas estimation failed, nothing was sent
    Estimation(ProviderError),
    /// The transaction failed after it was handed to the provider
    Provider(ProviderError),
    /// The requested action is not possible in the current state
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionError::Estimation(e) => write!(f, "Gas estimation failed: {}", e),
            SubmissionError::Provider(e) => write!(f, "Transaction failed: {}", e),
            SubmissionError::InvalidTransition { from, action } => {
                write!(f, "Cannot {} while {}", action, from)
            }
        }
    }
}

impl std::error::Error for SubmissionError {}
