use crate::{SubmissionError, TransactionReceipt};
use alloy::primitives::B256;

/// Estimated cost of a call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub gas_units: u64,
    /// In native token
    pub gas_cost: f64,
    /// Zero when conversion is disabled or the price is unavailable
    pub fiat_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TransactionState {
    #[default]
    Idle,
    EstimatingGas,
    Estimated(CostEstimate),
    Submitting,
    Pending(B256),
    Confirmed(TransactionReceipt),
    Failed(SubmissionError),
}

impl TransactionState {
    pub fn name(&self) -> &'static str {
        match self {
            TransactionState::Idle => "idle",
            TransactionState::EstimatingGas => "estimating gas",
            TransactionState::Estimated(_) => "estimated",
            TransactionState::Submitting => "submitting",
            TransactionState::Pending(_) => "pending",
            TransactionState::Confirmed(_) => "confirmed",
            TransactionState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionState::Confirmed(_) | TransactionState::Failed(_)
        )
    }
}
