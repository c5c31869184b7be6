use crate::{
    ContractProvider, CostEstimate, PriceOracle, ProviderError, SendEvent, SubmissionError,
    TransactionReceipt, TransactionState,
};
use alloy::primitives::B256;
use ssv_types::ContractCall;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

const GWEI: f64 = 1e-9;

/// Cost in native token of `gas_units` at `gas_price_gwei`
pub fn gas_cost(gas_units: u64, gas_price_gwei: u64) -> f64 {
    gas_units as f64 * gas_price_gwei as f64 * GWEI
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitterConfig {
    pub gas_price_gwei: u64,
    /// Consult the price oracle when estimating
    pub fiat_conversion: bool,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            gas_price_gwei: 1,
            fiat_conversion: true,
        }
    }
}

/// Drives a single call through estimation, submission and confirmation.
///
/// The current [`TransactionState`] is published on a watch channel, see [`Self::subscribe`].
/// Nothing is retried automatically: after a failure the caller submits again.
pub struct TransactionSubmitter<P, O> {
    provider: P,
    oracle: O,
    config: SubmitterConfig,
    state: watch::Sender<TransactionState>,
}

impl<P: ContractProvider, O: PriceOracle> TransactionSubmitter<P, O> {
    pub fn new(provider: P, oracle: O, config: SubmitterConfig) -> Self {
        let (state, _) = watch::channel(TransactionState::Idle);
        Self {
            provider,
            oracle,
            config,
            state,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn state(&self) -> TransactionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TransactionState> {
        self.state.subscribe()
    }

    /// Returns to `Idle`. Tracking of a transaction already sent is abandoned, the transaction
    /// itself can not be recalled.
    pub fn reset(&mut self) {
        self.transition(TransactionState::Idle);
    }

    fn transition(&self, next: TransactionState) {
        let previous = self.state.send_replace(next);
        debug!(
            from = previous.name(),
            to = self.state.borrow().name(),
            "Transaction state changed"
        );
    }

    /// Estimates the gas and fiat cost of `call`. Only a gas estimation failure is an error, an
    /// unavailable price yields a zero fiat cost.
    #[instrument(skip_all, fields(method = call.method))]
    pub async fn estimate_cost(
        &mut self,
        call: &ContractCall,
    ) -> Result<CostEstimate, SubmissionError> {
        let current = self.state();
        if !matches!(
            current,
            TransactionState::Idle | TransactionState::Estimated(_)
        ) {
            return Err(SubmissionError::InvalidTransition {
                from: current.name(),
                action: "estimate",
            });
        }
        self.transition(TransactionState::EstimatingGas);

        let gas_units = match self.provider.estimate_gas(call).await {
            Ok(gas_units) => gas_units,
            Err(e) => {
                warn!(error = %e, "Gas estimation failed");
                self.transition(TransactionState::Idle);
                return Err(SubmissionError::Estimation(e));
            }
        };
        let gas_cost = gas_cost(gas_units, self.config.gas_price_gwei);

        let fiat_cost = if self.config.fiat_conversion {
            match self.oracle.estimate_fiat_value(gas_cost).await {
                Ok(rate) => gas_cost * rate,
                Err(e) => {
                    debug!(error = %e, "Price unavailable, reporting zero fiat cost");
                    0.0
                }
            }
        } else {
            0.0
        };

        let estimate = CostEstimate {
            gas_units,
            gas_cost,
            fiat_cost,
        };
        info!(gas_units, gas_cost, fiat_cost, "Estimated transaction cost");
        self.transition(TransactionState::Estimated(estimate));
        Ok(estimate)
    }

    /// Sends `call` and follows it until it is confirmed or fails. `on_hash` is invoked every
    /// time the provider reports the transaction hash.
    ///
    /// Submitting after a failure is allowed, a confirmed transaction must be [`Self::reset`]
    /// first.
    #[instrument(skip_all, fields(method = call.method))]
    pub async fn submit<F>(
        &mut self,
        call: ContractCall,
        mut on_hash: F,
    ) -> Result<TransactionReceipt, SubmissionError>
    where
        F: FnMut(B256),
    {
        let current = self.state();
        if !matches!(
            current,
            TransactionState::Idle | TransactionState::Estimated(_) | TransactionState::Failed(_)
        ) {
            return Err(SubmissionError::InvalidTransition {
                from: current.name(),
                action: "submit",
            });
        }
        self.transition(TransactionState::Submitting);

        let mut events = self.provider.send(call);
        while let Some(event) = events.recv().await {
            match event {
                SendEvent::TransactionHash(hash) => {
                    if !matches!(self.state(), TransactionState::Pending(_)) {
                        info!(%hash, "Transaction pending");
                        self.transition(TransactionState::Pending(hash));
                    }
                    on_hash(hash);
                }
                SendEvent::Receipt(receipt) => {
                    if receipt.is_success() {
                        info!(
                            hash = %receipt.transaction_hash,
                            block = ?receipt.block_number,
                            "Transaction confirmed"
                        );
                        self.transition(TransactionState::Confirmed(receipt.clone()));
                        return Ok(receipt);
                    }
                    return Err(
                        self.fail(ProviderError::Reverted(receipt.transaction_hash))
                    );
                }
                SendEvent::Error(e) => return Err(self.fail(e)),
            }
        }
        Err(self.fail(ProviderError::Disconnected))
    }

    fn fail(&self, e: ProviderError) -> SubmissionError {
        error!(error = %e, "Transaction failed");
        let err = SubmissionError::Provider(e);
        self.transition(TransactionState::Failed(err.clone()));
        err
    }
}
