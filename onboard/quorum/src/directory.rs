use alloy::primitives::U256;
use ssv_types::{OperatorDescriptor, OperatorPublicKey};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The backing source could not be reached or answered with an error
    Source(String),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryError::Source(e) => write!(f, "Failed to fetch operators: {e}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

/// Where the operator list comes from, e.g. an indexer API or the network contract.
pub trait OperatorSource {
    fn fetch_operators(
        &self,
    ) -> impl Future<Output = Result<Vec<OperatorDescriptor>, DirectoryError>> + Send;
}

/// A cached, ordered list of known operators.
#[derive(Debug, Default)]
pub struct OperatorDirectory {
    operators: Vec<OperatorDescriptor>,
    index: HashMap<OperatorPublicKey, usize>,
    loaded: bool,
}

impl OperatorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the operator list unless it is already cached. `force` always refetches.
    ///
    /// On failure the previous cache is kept.
    pub async fn load<S: OperatorSource>(
        &mut self,
        source: &S,
        force: bool,
    ) -> Result<&[OperatorDescriptor], DirectoryError> {
        if self.loaded && !force {
            debug!(operators = self.operators.len(), "Using cached operators");
            return Ok(&self.operators);
        }

        let fetched = source.fetch_operators().await?;
        self.replace(fetched);
        info!(operators = self.operators.len(), "Loaded operators");
        Ok(&self.operators)
    }

    fn replace(&mut self, fetched: Vec<OperatorDescriptor>) {
        self.operators.clear();
        self.index.clear();
        for operator in fetched {
            if self.index.contains_key(&operator.public_key) {
                warn!(operator = %operator.public_key, "Ignoring duplicate operator");
                continue;
            }
            self.index
                .insert(operator.public_key.clone(), self.operators.len());
            self.operators.push(operator);
        }
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn operators(&self) -> &[OperatorDescriptor] {
        &self.operators
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn get(&self, public_key: &OperatorPublicKey) -> Option<&OperatorDescriptor> {
        self.index.get(public_key).map(|&i| &self.operators[i])
    }

    /// Updates the cached fee of an operator. Returns false if the operator is unknown.
    pub fn update_fee(&mut self, public_key: &OperatorPublicKey, fee: U256) -> bool {
        match self.index.get(public_key) {
            Some(&i) => {
                self.operators[i].fee = fee;
                true
            }
            None => false,
        }
    }

    /// Updates the cached count of validators an operator serves
    pub fn update_validator_count(&mut self, public_key: &OperatorPublicKey, count: u64) -> bool {
        match self.index.get(public_key) {
            Some(&i) => {
                self.operators[i].validator_count = count;
                true
            }
            None => false,
        }
    }

    /// Drops the cache so that the next [`Self::load`] refetches
    pub fn clear(&mut self) {
        self.operators.clear();
        self.index.clear();
        self.loaded = false;
    }
}
