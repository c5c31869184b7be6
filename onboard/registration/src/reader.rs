use crate::encoding::encode_operator_key;
use crate::gen::SSVNetwork;
use crate::ReadError;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use parking_lot::RwLock;
use ssv_types::{ContractCall, OperatorPublicKey};
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, instrument};

/// Executes read only calls against the network contract
pub trait ContractReader {
    fn call(&self, call: ContractCall) -> impl Future<Output = Result<Bytes, ReadError>> + Send;
}

/// An operator can take on another validator while it is below the network limit
pub fn is_operator_registrable(limit: U256, count: U256) -> bool {
    limit > count
}

/// Typed reads of network contract state. Operator fees are cached once read.
pub struct NetworkReader<R> {
    reader: R,
    contract: Address,
    fees: RwLock<HashMap<OperatorPublicKey, U256>>,
}

impl<R: ContractReader> NetworkReader<R> {
    pub fn new(reader: R, contract: Address) -> Self {
        Self {
            reader,
            contract,
            fees: RwLock::new(HashMap::new()),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return, ReadError> {
        let data = self
            .reader
            .call(ContractCall {
                from: Address::ZERO,
                to: self.contract,
                input: call.abi_encode().into(),
                method: C::SIGNATURE,
            })
            .await?;
        C::abi_decode_returns(&data, true).map_err(|e| ReadError::Decode(e.to_string()))
    }

    /// Current fee of an operator in token wei per block
    #[instrument(skip_all, fields(operator = %operator))]
    pub async fn operator_fee(&self, operator: &OperatorPublicKey) -> Result<U256, ReadError> {
        if let Some(fee) = self.fees.read().get(operator) {
            return Ok(*fee);
        }
        let fee = self
            .read(SSVNetwork::getOperatorCurrentFeeCall {
                publicKey: encode_operator_key(operator),
            })
            .await?
            ._0;
        debug!(%fee, "Read operator fee");
        self.fees.write().insert(operator.clone(), fee);
        Ok(fee)
    }

    pub fn clear_fee_cache(&self) {
        self.fees.write().clear();
    }

    pub async fn validators_per_operator_limit(&self) -> Result<U256, ReadError> {
        Ok(self
            .read(SSVNetwork::validatorsPerOperatorLimitCall {})
            .await?
            ._0)
    }

    pub async fn validators_per_operator_count(
        &self,
        operator: &OperatorPublicKey,
    ) -> Result<U256, ReadError> {
        Ok(self
            .read(SSVNetwork::validatorsPerOperatorCountCall {
                publicKey: encode_operator_key(operator),
            })
            .await?
            ._0)
    }

    /// An operator exists once the contract knows an owner for its key
    pub async fn operator_exists(&self, operator: &OperatorPublicKey) -> Result<bool, ReadError> {
        let record = self
            .read(SSVNetwork::operatorsCall {
                publicKey: encode_operator_key(operator),
            })
            .await?;
        Ok(record.ownerAddress != Address::ZERO)
    }

    pub async fn is_operator_registrable(
        &self,
        operator: &OperatorPublicKey,
    ) -> Result<bool, ReadError> {
        let limit = self.validators_per_operator_limit().await?;
        let count = self.validators_per_operator_count(operator).await?;
        Ok(is_operator_registrable(limit, count))
    }
}
