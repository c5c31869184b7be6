use crate::{Config, ConfigBuilder, KeystoreDecoder, SessionError};
use alloy::primitives::{B256, U256};
use quorum::{OperatorDirectory, OperatorSource, QuorumSelector};
use registration::{
    BuildError, ContractReader, NetworkReader, OperatorRegistration, PayloadBuilder,
    RegistrationPayload,
};
use ssv_types::{
    BlsPublicKey, ContractCall, OperatorDescriptor, OperatorPublicKey, Password, Slot,
    ValidatorSecret,
};
use std::sync::Arc;
use submitter::{
    ContractProvider, CostEstimate, PriceOracle, TransactionReceipt, TransactionState,
    TransactionSubmitter,
};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

/// A session shared between tasks. The lock serialises every operation so that selection and
/// building never interleave.
pub type SharedSession<P, O> = Arc<tokio::sync::Mutex<RegistrationSession<P, O>>>;

/// All state of one onboarding flow.
///
/// The session is the single owner of the validator secret. The secret is scrubbed once the
/// registration is confirmed, when a build fails, when it is replaced and when the flow is
/// cancelled.
pub struct RegistrationSession<P, O> {
    config: Config,
    secret: Option<ValidatorSecret>,
    directory: OperatorDirectory,
    quorum: QuorumSelector,
    builder: PayloadBuilder,
    submitter: TransactionSubmitter<P, O>,
}

impl<P: ContractProvider, O: PriceOracle> RegistrationSession<P, O> {
    pub fn new(config: Config, provider: P, oracle: O) -> Self {
        Self {
            quorum: QuorumSelector::new(config.min_operators(), config.slots()),
            builder: PayloadBuilder::new(config.protocol(), config.fee_schedule()),
            submitter: TransactionSubmitter::new(provider, oracle, config.submitter_config()),
            directory: OperatorDirectory::new(),
            secret: None,
            config,
        }
    }

    /// Validates `builder` and starts a session with the resulting configuration
    pub fn with_builder(
        builder: ConfigBuilder,
        provider: P,
        oracle: O,
    ) -> Result<Self, SessionError> {
        let config = builder.build()?;
        Ok(Self::new(config, provider, oracle))
    }

    pub fn shared(self) -> SharedSession<P, O> {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads a hex encoded validator key, replacing any loaded secret
    pub fn load_raw_key(&mut self, key: &str) -> Result<BlsPublicKey, SessionError> {
        let secret = ValidatorSecret::from_hex(key)?;
        self.replace_secret(secret)
    }

    /// Decrypts a keystore and loads the key it holds, replacing any loaded secret. A failed
    /// decryption leaves the current secret in place.
    pub fn load_keystore<D: KeystoreDecoder>(
        &mut self,
        decoder: &D,
        keystore: &[u8],
        password: &Password,
    ) -> Result<BlsPublicKey, SessionError> {
        let secret = decoder.decrypt(keystore, password).map_err(|e| {
            warn!(error = %e, "Failed to decrypt keystore");
            e
        })?;
        self.replace_secret(secret)
    }

    fn replace_secret(&mut self, mut secret: ValidatorSecret) -> Result<BlsPublicKey, SessionError> {
        let public_key = match keysplit::validator_public_key(&secret) {
            Ok(public_key) => public_key,
            Err(e) => {
                secret.scrub();
                return Err(SessionError::InvalidKey(e));
            }
        };
        self.scrub_secret();
        info!(validator = %public_key, secret = %secret.id(), "Loaded validator key");
        self.secret = Some(secret);
        Ok(public_key)
    }

    fn scrub_secret(&mut self) {
        if let Some(mut secret) = self.secret.take() {
            debug!(secret = %secret.id(), "Scrubbing validator secret");
            secret.scrub();
        }
        self.builder.invalidate();
    }

    pub fn has_secret(&self) -> bool {
        self.secret
            .as_ref()
            .is_some_and(|secret| !secret.is_scrubbed())
    }

    pub fn validator_public_key(&self) -> Option<BlsPublicKey> {
        self.secret
            .as_ref()
            .and_then(|secret| keysplit::validator_public_key(secret).ok())
    }

    /// Fetches the operator list, from cache unless `force` is set
    pub async fn load_operators<S: OperatorSource>(
        &mut self,
        source: &S,
        force: bool,
    ) -> Result<usize, SessionError> {
        let count = self.directory.load(source, force).await?.len();
        self.quorum.set_directory_size(count);
        Ok(count)
    }

    pub fn directory(&self) -> &OperatorDirectory {
        &self.directory
    }

    pub fn quorum(&self) -> &QuorumSelector {
        &self.quorum
    }

    /// Selects a directory operator into `slot`. Returns false if the operator already holds
    /// another slot.
    pub fn select(
        &mut self,
        public_key: &OperatorPublicKey,
        slot: Slot,
    ) -> Result<bool, SessionError> {
        let operator = self
            .directory
            .get(public_key)
            .cloned()
            .ok_or_else(|| SessionError::UnknownOperator(public_key.clone()))?;
        Ok(self.quorum.select(operator, slot))
    }

    /// Selects an operator that need not be part of the directory
    pub fn select_operator(&mut self, operator: OperatorDescriptor, slot: Slot) -> bool {
        self.quorum.select(operator, slot)
    }

    pub fn unselect(&mut self, slot: Slot) -> Option<OperatorDescriptor> {
        self.quorum.unselect(slot).map(|selected| selected.operator)
    }

    pub fn unselect_by_public_key(&mut self, public_key: &OperatorPublicKey) -> usize {
        self.quorum.unselect_by_public_key(public_key)
    }

    /// Replaces the selection with the first operators of the directory
    pub fn auto_select(&mut self) -> usize {
        self.quorum.auto_fill(self.directory.operators())
    }

    /// Reads the current fee of every selected operator from the contract
    #[instrument(skip_all)]
    pub async fn refresh_selected_fees<R: ContractReader>(
        &mut self,
        reader: &NetworkReader<R>,
    ) -> Result<(), SessionError> {
        let selected: Vec<(Slot, OperatorPublicKey, U256)> = self
            .quorum
            .selected()
            .map(|selected| {
                (
                    selected.slot,
                    selected.operator.public_key.clone(),
                    selected.operator.fee,
                )
            })
            .collect();
        for (slot, public_key, current) in selected {
            let fee = reader.operator_fee(&public_key).await?;
            if fee != current {
                debug!(operator = %public_key, %fee, "Operator fee changed");
                self.directory.update_fee(&public_key, fee);
                self.quorum.update_fee(slot, fee);
            }
        }
        Ok(())
    }

    /// Funding required for the current selection
    pub fn registration_cost(&self) -> Result<U256, SessionError> {
        Ok(self.builder.registration_cost(&self.quorum)?)
    }

    /// Builds the registration payload, or returns the cached one if nothing changed.
    ///
    /// A failed build consumes the secret, it has to be provided again before the next attempt.
    /// An unmet quorum leaves it in place.
    pub fn build_payload(&mut self) -> Result<Arc<RegistrationPayload>, SessionError> {
        let owner = self.submitter.provider().account();
        let secret = self.secret.as_mut().ok_or(SessionError::NoSecret)?;
        match self.builder.build(secret, &self.quorum, owner) {
            Ok(payload) => Ok(payload),
            Err(e @ BuildError::QuorumNotMet { .. }) => Err(SessionError::Build(e)),
            Err(e) => {
                self.scrub_secret();
                Err(SessionError::Build(e))
            }
        }
    }

    fn registration_call(&mut self) -> Result<ContractCall, SessionError> {
        let payload = self.build_payload()?;
        let from = self.submitter.provider().account();
        Ok(payload.to_call(from, self.config.contract_address()))
    }

    /// Estimates the cost of registering the validator
    #[instrument(skip_all)]
    pub async fn estimate_registration(&mut self) -> Result<CostEstimate, SessionError> {
        let call = self.registration_call()?;
        Ok(self.submitter.estimate_cost(&call).await?)
    }

    /// Registers the validator. On confirmation the secret is scrubbed and the payload dropped.
    #[instrument(skip_all)]
    pub async fn register_validator<F: FnMut(B256)>(
        &mut self,
        on_hash: F,
    ) -> Result<TransactionReceipt, SessionError> {
        let call = self.registration_call()?;
        match self.submitter.submit(call, on_hash).await {
            Ok(receipt) => {
                info!(hash = %receipt.transaction_hash, "Validator registered");
                self.scrub_secret();
                Ok(receipt)
            }
            Err(e) => {
                error!(error = %e, "Validator registration failed");
                Err(e.into())
            }
        }
    }

    pub async fn estimate_operator_registration(
        &mut self,
        registration: &OperatorRegistration,
    ) -> Result<CostEstimate, SessionError> {
        let call = self.operator_call(registration);
        Ok(self.submitter.estimate_cost(&call).await?)
    }

    pub async fn register_operator<F: FnMut(B256)>(
        &mut self,
        registration: &OperatorRegistration,
        on_hash: F,
    ) -> Result<TransactionReceipt, SessionError> {
        let call = self.operator_call(registration);
        let receipt = self.submitter.submit(call, on_hash).await?;
        info!(name = %registration.name, "Operator registered");
        Ok(receipt)
    }

    fn operator_call(&self, registration: &OperatorRegistration) -> ContractCall {
        let from = self.submitter.provider().account();
        registration.to_call(self.config.protocol(), from, self.config.contract_address())
    }

    pub fn transaction_state(&self) -> TransactionState {
        self.submitter.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<TransactionState> {
        self.submitter.subscribe()
    }

    /// Readies the submitter for another transaction
    pub fn reset_transaction(&mut self) {
        self.submitter.reset();
    }

    /// Abandons the flow: scrubs the secret, clears the selection and forgets the payload and
    /// transaction. A transaction already sent is not recalled.
    pub fn cancel(&mut self) {
        info!("Registration flow cancelled");
        self.scrub_secret();
        self.quorum.unselect_all();
        self.submitter.reset();
    }
}
