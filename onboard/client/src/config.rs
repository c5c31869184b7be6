use crate::ConfigBuilderError;
use alloy::primitives::{Address, U256};
use registration::{FeeSchedule, ProtocolVersion, DEFAULT_BLOCKS_PER_YEAR};
use serde::{Deserialize, Serialize};
use submitter::SubmitterConfig;

/// Minimum number of operators a validator is split across
pub const DEFAULT_MIN_OPERATORS: usize = 4;
/// Largest committee the network supports
pub const DEFAULT_MAX_OPERATORS: usize = 13;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    min_operators: usize,
    max_operators: usize,
    slots: usize,
    protocol: ProtocolVersion,
    network_fee: U256,
    liquidation_collateral_blocks: u64,
    blocks_per_year: u64,
    gas_price_gwei: u64,
    fiat_conversion: bool,
    contract_address: Address,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_builder(&ConfigBuilder::new())
    }
}

impl Config {
    /// Operators required before a key may be split
    pub fn min_operators(&self) -> usize {
        self.min_operators
    }

    pub fn max_operators(&self) -> usize {
        self.max_operators
    }

    /// Number of selection slots offered
    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn protocol(&self) -> ProtocolVersion {
        self.protocol
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule::new(self.network_fee)
            .with_liquidation_collateral(self.liquidation_collateral_blocks)
            .with_blocks_per_year(self.blocks_per_year)
    }

    pub fn submitter_config(&self) -> SubmitterConfig {
        SubmitterConfig {
            gas_price_gwei: self.gas_price_gwei,
            fiat_conversion: self.fiat_conversion,
        }
    }

    /// Private constructor so it can only be built by our `ConfigBuilder`.
    fn from_builder(builder: &ConfigBuilder) -> Self {
        Self {
            min_operators: builder.min_operators,
            max_operators: builder.max_operators,
            slots: builder.slots,
            protocol: builder.protocol,
            network_fee: builder.network_fee,
            liquidation_collateral_blocks: builder.liquidation_collateral_blocks,
            blocks_per_year: builder.blocks_per_year,
            gas_price_gwei: builder.gas_price_gwei,
            fiat_conversion: builder.fiat_conversion,
            contract_address: builder.contract_address,
        }
    }
}

/// Builder struct for constructing the onboarding configuration
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    min_operators: usize,
    max_operators: usize,
    slots: usize,
    protocol: ProtocolVersion,
    network_fee: U256,
    liquidation_collateral_blocks: u64,
    blocks_per_year: u64,
    gas_price_gwei: u64,
    fiat_conversion: bool,
    contract_address: Address,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        ConfigBuilder {
            min_operators: DEFAULT_MIN_OPERATORS,
            max_operators: DEFAULT_MAX_OPERATORS,
            slots: DEFAULT_MIN_OPERATORS,
            protocol: ProtocolVersion::default(),
            network_fee: U256::ZERO,
            liquidation_collateral_blocks: 0,
            blocks_per_year: DEFAULT_BLOCKS_PER_YEAR,
            gas_price_gwei: 1,
            fiat_conversion: true,
            contract_address: Address::ZERO,
        }
    }

    // Chained setter methods to override defaults
    pub fn with_min_operators(mut self, min_operators: usize) -> Self {
        self.min_operators = min_operators;
        self
    }

    pub fn with_max_operators(mut self, max_operators: usize) -> Self {
        self.max_operators = max_operators;
        self
    }

    pub fn with_slots(mut self, slots: usize) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_protocol(mut self, protocol: ProtocolVersion) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_network_fee(mut self, network_fee: U256) -> Self {
        self.network_fee = network_fee;
        self
    }

    pub fn with_liquidation_collateral_blocks(mut self, blocks: u64) -> Self {
        self.liquidation_collateral_blocks = blocks;
        self
    }

    pub fn with_blocks_per_year(mut self, blocks: u64) -> Self {
        self.blocks_per_year = blocks;
        self
    }

    pub fn with_gas_price_gwei(mut self, gas_price_gwei: u64) -> Self {
        self.gas_price_gwei = gas_price_gwei;
        self
    }

    pub fn with_fiat_conversion(mut self, fiat_conversion: bool) -> Self {
        self.fiat_conversion = fiat_conversion;
        self
    }

    pub fn with_contract_address(mut self, contract_address: Address) -> Self {
        self.contract_address = contract_address;
        self
    }

    pub fn build(self) -> Result<Config, ConfigBuilderError> {
        if self.min_operators == 0 {
            return Err(ConfigBuilderError::ZeroMinOperators);
        }
        if self.min_operators > self.max_operators {
            return Err(ConfigBuilderError::MinimumAboveMaximum);
        }
        if self.slots < self.min_operators {
            return Err(ConfigBuilderError::SlotsBelowMinimum);
        }
        if self.slots > self.max_operators {
            return Err(ConfigBuilderError::SlotsAboveMaximum);
        }
        if self.gas_price_gwei == 0 {
            return Err(ConfigBuilderError::ZeroGasPrice);
        }

        Ok(Config::from_builder(&self))
    }
}
