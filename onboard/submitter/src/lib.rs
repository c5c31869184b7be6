//! Gas estimation and submission of network contract calls.

pub use error::{OracleError, ProviderError, SubmissionError};
pub use provider::{ContractProvider, PriceOracle, SendEvent, TransactionReceipt};
pub use state::{CostEstimate, TransactionState};
pub use submitter::{gas_cost, SubmitterConfig, TransactionSubmitter};

mod error;
mod provider;
mod state;
mod submitter;
