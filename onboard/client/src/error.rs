use crate::KeystoreError;
use keysplit::SplitError;
use quorum::DirectoryError;
use registration::{BuildError, ReadError};
use ssv_types::{OperatorPublicKey, SecretError};
use std::fmt::{Display, Formatter};
use submitter::{ProviderError, SubmissionError};

/// Error associated with Config building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigBuilderError {
    /// At least one operator must be required
    ZeroMinOperators,
    /// Every required operator needs a slot
    SlotsBelowMinimum,
    /// More slots than the largest supported committee
    SlotsAboveMaximum,
    /// The minimum exceeds the largest supported committee
    MinimumAboveMaximum,
    /// Gas can not be free
    ZeroGasPrice,
}

impl std::error::Error for ConfigBuilderError {}

impl Display for ConfigBuilderError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::ZeroMinOperators => write!(f, "At least one operator must be required"),
            Self::SlotsBelowMinimum => write!(f, "Fewer slots than required operators"),
            Self::SlotsAboveMaximum => {
                write!(f, "More slots than the maximum committee size")
            }
            Self::MinimumAboveMaximum => {
                write!(f, "Required operators exceed the maximum committee size")
            }
            Self::ZeroGasPrice => write!(f, "Gas price must be non zero"),
        }
    }
}

const GENERIC_FAILURE: &str = "Something went wrong while preparing your validator, please try again";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No validator key has been loaded, or it was already used
    NoSecret,
    /// The raw key could not be decoded
    Secret(SecretError),
    /// The key decoded but is not a usable validator key
    InvalidKey(SplitError),
    Keystore(KeystoreError),
    UnknownOperator(OperatorPublicKey),
    Directory(DirectoryError),
    Read(ReadError),
    Build(BuildError),
    Submission(SubmissionError),
    Config(ConfigBuilderError),
}

impl SessionError {
    /// Text suitable for showing to the user. Internal failures map to a generic message, the
    /// details are logged where they happen.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::NoSecret => "Please provide your validator key first".to_string(),
            SessionError::Secret(_) | SessionError::InvalidKey(_) => {
                "The validator key is invalid".to_string()
            }
            SessionError::Keystore(KeystoreError::InvalidPassword) => {
                "Invalid keystore password".to_string()
            }
            SessionError::Keystore(KeystoreError::InvalidFile(_)) => {
                "Invalid keystore file".to_string()
            }
            SessionError::UnknownOperator(operator) => {
                format!("Operator {} is not in the operator list", operator)
            }
            SessionError::Directory(_) => {
                "Unable to load the operator list, please try again".to_string()
            }
            SessionError::Read(_) => "Unable to read from the network contract".to_string(),
            SessionError::Build(BuildError::QuorumNotMet { selected, required }) => format!(
                "Please select at least {} operators ({} selected)",
                required, selected
            ),
            SessionError::Build(_) => GENERIC_FAILURE.to_string(),
            SessionError::Submission(SubmissionError::Estimation(e)) => {
                format!("Unable to estimate the transaction cost: {}", e)
            }
            SessionError::Submission(SubmissionError::Provider(ProviderError::Rejected)) => {
                "The transaction was rejected".to_string()
            }
            SessionError::Submission(SubmissionError::Provider(e)) => {
                format!("The transaction failed: {}", e)
            }
            SessionError::Submission(SubmissionError::InvalidTransition { from, .. }) => {
                match *from {
                    "confirmed" => {
                        "The transaction is already confirmed, reset it to start another"
                            .to_string()
                    }
                    "failed" => "The transaction failed, submit it again or reset".to_string(),
                    _ => "A transaction is already in progress".to_string(),
                }
            }
            SessionError::Config(e) => format!("Invalid configuration: {}", e),
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NoSecret => write!(f, "No validator secret loaded"),
            SessionError::Secret(e) => write!(f, "{}", e),
            SessionError::InvalidKey(e) => write!(f, "{}", e),
            SessionError::Keystore(e) => write!(f, "{}", e),
            SessionError::UnknownOperator(operator) => write!(f, "Unknown operator {}", operator),
            SessionError::Directory(e) => write!(f, "{}", e),
            SessionError::Read(e) => write!(f, "{}", e),
            SessionError::Build(e) => write!(f, "{}", e),
            SessionError::Submission(e) => write!(f, "{}", e),
            SessionError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<SecretError> for SessionError {
    fn from(e: SecretError) -> Self {
        SessionError::Secret(e)
    }
}

impl From<KeystoreError> for SessionError {
    fn from(e: KeystoreError) -> Self {
        SessionError::Keystore(e)
    }
}

impl From<DirectoryError> for SessionError {
    fn from(e: DirectoryError) -> Self {
        SessionError::Directory(e)
    }
}

impl From<ReadError> for SessionError {
    fn from(e: ReadError) -> Self {
        SessionError::Read(e)
    }
}

impl From<BuildError> for SessionError {
    fn from(e: BuildError) -> Self {
        SessionError::Build(e)
    }
}

impl From<SubmissionError> for SessionError {
    fn from(e: SubmissionError) -> Self {
        SessionError::Submission(e)
    }
}

impl From<ConfigBuilderError> for SessionError {
    fn from(e: ConfigBuilderError) -> Self {
        SessionError::Config(e)
    }
}
