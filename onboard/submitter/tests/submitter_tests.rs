use alloy::primitives::{Address, Bytes, B256};
use parking_lot::Mutex;
use ssv_types::ContractCall;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use submitter::{
    gas_cost, ContractProvider, OracleError, PriceOracle, ProviderError, SendEvent,
    SubmissionError, SubmitterConfig, TransactionReceipt, TransactionState, TransactionSubmitter,
};
use tokio::sync::{mpsc, watch};

const HASH: B256 = B256::repeat_byte(0x11);

// Replays one scripted list of events per send
#[derive(Default)]
struct ScriptedProvider {
    gas: Option<u64>,
    scripts: Mutex<VecDeque<Vec<SendEvent>>>,
    // States observed at the moment each send happens
    observed: Arc<Mutex<Vec<TransactionState>>>,
    watcher: Arc<Mutex<Option<watch::Receiver<TransactionState>>>>,
}

impl ScriptedProvider {
    fn new(gas: Option<u64>, scripts: Vec<Vec<SendEvent>>) -> Self {
        Self {
            gas,
            scripts: Mutex::new(scripts.into()),
            ..Default::default()
        }
    }
}

impl ContractProvider for ScriptedProvider {
    fn account(&self) -> Address {
        Address::repeat_byte(0xaa)
    }

    async fn estimate_gas(&self, _call: &ContractCall) -> Result<u64, ProviderError> {
        self.gas
            .ok_or_else(|| ProviderError::Rpc("execution reverted".to_string()))
    }

    fn send(&self, _call: ContractCall) -> mpsc::UnboundedReceiver<SendEvent> {
        if let Some(watcher) = self.watcher.lock().as_ref() {
            self.observed.lock().push(watcher.borrow().clone());
        }
        let (tx, rx) = mpsc::unbounded_channel();
        for event in self.scripts.lock().pop_front().unwrap_or_default() {
            tx.send(event).unwrap();
        }
        rx
    }
}

#[derive(Default)]
struct FixedOracle {
    rate: Option<f64>,
    lookups: AtomicUsize,
}

impl PriceOracle for FixedOracle {
    async fn estimate_fiat_value(&self, _native_amount: f64) -> Result<f64, OracleError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.rate
            .ok_or_else(|| OracleError("price feed offline".to_string()))
    }
}

fn call() -> ContractCall {
    ContractCall {
        from: Address::repeat_byte(0xaa),
        to: Address::repeat_byte(0xbb),
        input: Bytes::from_static(&[1, 2, 3, 4]),
        method: "registerValidator",
    }
}

fn receipt(status: Option<bool>) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: HASH,
        block_number: Some(100),
        gas_used: 21_000,
        status,
    }
}

fn new_submitter(
    provider: ScriptedProvider,
    rate: Option<f64>,
) -> TransactionSubmitter<ScriptedProvider, FixedOracle> {
    TransactionSubmitter::new(
        provider,
        FixedOracle {
            rate,
            ..Default::default()
        },
        SubmitterConfig::default(),
    )
}

#[tokio::test]
async fn oracle_failure_still_estimates() {
    let mut submitter = new_submitter(ScriptedProvider::new(Some(2_000_000), vec![]), None);

    let estimate = submitter.estimate_cost(&call()).await.unwrap();
    assert_eq!(estimate.gas_units, 2_000_000);
    assert_eq!(estimate.gas_cost, gas_cost(2_000_000, 1));
    assert_eq!(estimate.fiat_cost, 0.0);
    assert_eq!(submitter.state(), TransactionState::Estimated(estimate));
}

#[tokio::test]
async fn estimate_converts_to_fiat() {
    let mut submitter = new_submitter(ScriptedProvider::new(Some(1_000_000_000), vec![]), Some(2.5));

    let estimate = submitter.estimate_cost(&call()).await.unwrap();
    assert!((estimate.gas_cost - 1.0).abs() < 1e-12);
    assert!((estimate.fiat_cost - 2.5).abs() < 1e-12);
}

#[tokio::test]
async fn disabled_conversion_skips_oracle() {
    let mut submitter = TransactionSubmitter::new(
        ScriptedProvider::new(Some(10), vec![]),
        FixedOracle {
            rate: Some(3.0),
            ..Default::default()
        },
        SubmitterConfig {
            gas_price_gwei: 1,
            fiat_conversion: false,
        },
    );

    let estimate = submitter.estimate_cost(&call()).await.unwrap();
    assert_eq!(estimate.fiat_cost, 0.0);
}

#[tokio::test]
async fn gas_failure_returns_to_idle() {
    let mut submitter = new_submitter(ScriptedProvider::new(None, vec![]), Some(1.0));

    let err = submitter.estimate_cost(&call()).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Estimation(ProviderError::Rpc(_))));
    assert_eq!(submitter.state(), TransactionState::Idle);
}

#[tokio::test]
async fn confirmed_submission_reports_hash() {
    let provider = ScriptedProvider::new(
        Some(10),
        vec![vec![
            SendEvent::TransactionHash(HASH),
            SendEvent::TransactionHash(HASH),
            SendEvent::Receipt(receipt(Some(true))),
        ]],
    );
    let mut submitter = new_submitter(provider, None);
    let states = submitter.subscribe();

    let mut hashes = Vec::new();
    let confirmed = submitter
        .submit(call(), |hash| hashes.push(hash))
        .await
        .unwrap();

    assert_eq!(confirmed, receipt(Some(true)));
    assert_eq!(hashes, vec![HASH, HASH]);
    assert_eq!(
        *states.borrow(),
        TransactionState::Confirmed(receipt(Some(true)))
    );

    // Confirmed is terminal until reset
    let err = submitter.submit(call(), |_| {}).await.unwrap_err();
    assert_eq!(
        err,
        SubmissionError::InvalidTransition {
            from: "confirmed",
            action: "submit"
        }
    );
    submitter.reset();
    assert_eq!(submitter.state(), TransactionState::Idle);
}

#[tokio::test]
async fn provider_error_fails_and_resubmit_is_accepted() {
    let provider = ScriptedProvider::new(
        Some(10),
        vec![
            vec![
                SendEvent::TransactionHash(HASH),
                SendEvent::Error(ProviderError::Rpc("nonce too low".to_string())),
            ],
            vec![
                SendEvent::TransactionHash(HASH),
                SendEvent::Receipt(receipt(Some(true))),
            ],
        ],
    );
    let observed = provider.observed.clone();
    let watcher = provider.watcher.clone();
    let mut submitter = new_submitter(provider, None);
    *watcher.lock() = Some(submitter.subscribe());

    let err = submitter.submit(call(), |_| {}).await.unwrap_err();
    let expected = SubmissionError::Provider(ProviderError::Rpc("nonce too low".to_string()));
    assert_eq!(err, expected);
    assert_eq!(submitter.state(), TransactionState::Failed(expected));

    submitter.submit(call(), |_| {}).await.unwrap();
    assert!(matches!(submitter.state(), TransactionState::Confirmed(_)));
    assert_eq!(
        *observed.lock(),
        vec![TransactionState::Submitting, TransactionState::Submitting]
    );
}

#[tokio::test]
async fn unsuccessful_receipt_fails() {
    for status in [Some(false), None] {
        let provider = ScriptedProvider::new(Some(10), vec![vec![SendEvent::Receipt(receipt(status))]]);
        let mut submitter = new_submitter(provider, None);

        let err = submitter.submit(call(), |_| {}).await.unwrap_err();
        assert_eq!(err, SubmissionError::Provider(ProviderError::Reverted(HASH)));
        assert!(submitter.state().is_terminal());
    }
}

#[tokio::test]
async fn silent_provider_fails() {
    let provider = ScriptedProvider::new(Some(10), vec![vec![SendEvent::TransactionHash(HASH)]]);
    let mut submitter = new_submitter(provider, None);

    let err = submitter.submit(call(), |_| {}).await.unwrap_err();
    assert_eq!(err, SubmissionError::Provider(ProviderError::Disconnected));
}
