use shared_types::U256;

/// Outcome of a passed pre-flight check; feeds the transaction's gas fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasQuote {
    /// `estimated_gas + extra_margin`
    pub gas_limit: u64,
    pub gas_price: U256,
    /// Worst-case cost, `gas_limit * gas_price`.
    pub required: U256,
    /// Balance observed during the check.
    pub available: U256,
}
