use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;
use client::{Config, ConfigBuilder, KeystoreDecoder, KeystoreError, RegistrationSession};
use openssl::pkey::Private;
use openssl::rsa::Rsa;
use parking_lot::Mutex;
use quorum::{DirectoryError, OperatorSource};
use registration::{ContractReader, ReadError, SSVNetwork};
use ssv_types::test_utils::generators;
use ssv_types::{ContractCall, OperatorDescriptor, Password, ValidatorSecret};
use std::collections::VecDeque;
use std::sync::Arc;
use submitter::{
    ContractProvider, OracleError, PriceOracle, ProviderError, SendEvent, TransactionReceipt,
};
use tokio::sync::mpsc;

pub const ACCOUNT: Address = Address::repeat_byte(0xaa);
pub const CONTRACT: Address = Address::repeat_byte(0xcc);
pub const HASH: B256 = B256::repeat_byte(0x22);

pub fn receipt() -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: HASH,
        block_number: Some(1),
        gas_used: 500_000,
        status: Some(true),
    }
}

// Wallet that records sent calls and replays scripted events
#[derive(Default, Clone)]
pub struct MockWallet {
    pub scripts: Arc<Mutex<VecDeque<Vec<SendEvent>>>>,
    pub sent: Arc<Mutex<Vec<ContractCall>>>,
}

impl MockWallet {
    pub fn script(&self, events: Vec<SendEvent>) {
        self.scripts.lock().push_back(events);
    }
}

impl ContractProvider for MockWallet {
    fn account(&self) -> Address {
        ACCOUNT
    }

    async fn estimate_gas(&self, _call: &ContractCall) -> Result<u64, ProviderError> {
        Ok(1_500_000)
    }

    fn send(&self, call: ContractCall) -> mpsc::UnboundedReceiver<SendEvent> {
        self.sent.lock().push(call);
        let (tx, rx) = mpsc::unbounded_channel();
        for event in self.scripts.lock().pop_front().unwrap_or_default() {
            let _ = tx.send(event);
        }
        rx
    }
}

pub struct OfflineOracle;

impl PriceOracle for OfflineOracle {
    async fn estimate_fiat_value(&self, _native_amount: f64) -> Result<f64, OracleError> {
        Err(OracleError("offline".to_string()))
    }
}

pub struct StaticDirectory(pub Vec<OperatorDescriptor>);

impl OperatorSource for StaticDirectory {
    async fn fetch_operators(&self) -> Result<Vec<OperatorDescriptor>, DirectoryError> {
        Ok(self.0.clone())
    }
}

// Contract where every operator charges the same fee
pub struct FlatFeeContract(pub U256);

impl ContractReader for FlatFeeContract {
    async fn call(&self, call: ContractCall) -> Result<Bytes, ReadError> {
        if !call
            .input
            .starts_with(&SSVNetwork::getOperatorCurrentFeeCall::SELECTOR)
        {
            return Err(ReadError::Call(format!("unexpected call to {}", call.method)));
        }
        Ok(SSVNetwork::getOperatorCurrentFeeCall::abi_encode_returns(&(self.0,)).into())
    }
}

// Accepts a single password and hands out a key stored in the "file"
pub struct PlainKeystore;

impl KeystoreDecoder for PlainKeystore {
    fn decrypt(
        &self,
        keystore: &[u8],
        password: &Password,
    ) -> Result<ValidatorSecret, KeystoreError> {
        if password.expose() != "hunter2" {
            return Err(KeystoreError::InvalidPassword);
        }
        let key = std::str::from_utf8(keystore)
            .map_err(|e| KeystoreError::InvalidFile(e.to_string()))?;
        ValidatorSecret::from_hex(key).map_err(|e| KeystoreError::InvalidFile(e.to_string()))
    }
}

// Test fixture for a session with a directory of operators backed by real RSA keys
pub struct TestFixture {
    pub session: RegistrationSession<MockWallet, OfflineOracle>,
    pub wallet: MockWallet,
    pub directory: StaticDirectory,
    pub private_keys: Vec<Rsa<Private>>,
}

impl TestFixture {
    pub fn new(operators: u8) -> Self {
        Self::with_config(
            operators,
            ConfigBuilder::new()
                .with_contract_address(CONTRACT)
                .build()
                .expect("valid config"),
        )
    }

    /// Loads the key and selects the first four directory operators
    pub async fn ready(operators: u8, key: &str) -> Self {
        let mut fixture = Self::new(operators);
        fixture.session.load_raw_key(key).expect("valid key");
        fixture
            .session
            .load_operators(&fixture.directory, false)
            .await
            .expect("static directory");
        fixture.session.auto_select();
        fixture
    }

    pub fn with_config(operators: u8, config: Config) -> Self {
        let (descriptors, private_keys): (Vec<_>, Vec<_>) =
            (1..=operators).map(generators::operator::random).unzip();
        let wallet = MockWallet::default();
        Self {
            session: RegistrationSession::new(config, wallet.clone(), OfflineOracle),
            wallet,
            directory: StaticDirectory(descriptors),
            private_keys,
        }
    }
}
