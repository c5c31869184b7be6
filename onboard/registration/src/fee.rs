use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// Approximate number of blocks produced in a year
pub const DEFAULT_BLOCKS_PER_YEAR: u64 = 2_613_400;

/// Network wide fee inputs. All rates are token wei per block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub network_fee: U256,
    /// Number of blocks of fees held back as liquidation collateral
    pub liquidation_collateral_blocks: u64,
    pub blocks_per_year: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(U256::ZERO)
    }
}

impl FeeSchedule {
    pub fn new(network_fee: U256) -> Self {
        Self {
            network_fee,
            liquidation_collateral_blocks: 0,
            blocks_per_year: DEFAULT_BLOCKS_PER_YEAR,
        }
    }

    pub fn with_liquidation_collateral(mut self, blocks: u64) -> Self {
        self.liquidation_collateral_blocks = blocks;
        self
    }

    pub fn with_blocks_per_year(mut self, blocks: u64) -> Self {
        self.blocks_per_year = blocks;
        self
    }

    /// Cost of running at `rate` for a year
    pub fn annual(&self, rate: U256) -> Option<U256> {
        rate.checked_mul(U256::from(self.blocks_per_year))
    }

    /// Total amount needed to register a validator with operators charging `operator_fees`:
    /// the liquidation collateral on the combined rate plus a year of network and operator fees.
    ///
    /// Returns `None` on overflow.
    pub fn registration_cost(&self, operator_fees: impl IntoIterator<Item = U256>) -> Option<U256> {
        let operators = operator_fees
            .into_iter()
            .try_fold(U256::ZERO, |sum, fee| sum.checked_add(fee))?;
        let collateral = self
            .network_fee
            .checked_add(operators)?
            .checked_mul(U256::from(self.liquidation_collateral_blocks))?;
        collateral
            .checked_add(self.annual(self.network_fee)?)?
            .checked_add(self.annual(operators)?)
    }
}
