//! Worst-case transaction cost.

use shared_types::U256;

/// Gas added on top of every estimate before the balance check.
pub const DEFAULT_GAS_MARGIN: u64 = 100_000;

/// Gas limit and worst-case cost for an estimate, or `None` if either
/// overflows.
pub fn required_funds(estimated_gas: u64, extra_margin: u64, gas_price: U256) -> Option<(u64, U256)> {
    let gas_limit = estimated_gas.checked_add(extra_margin)?;
    let required = U256::from(gas_limit).checked_mul(gas_price)?;
    Some((gas_limit, required))
}
