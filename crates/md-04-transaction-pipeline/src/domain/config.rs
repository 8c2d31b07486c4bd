use std::time::Duration;

use md_03_gas_guard::DEFAULT_GAS_MARGIN;

/// Default receipt wait.
pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default interval between receipt polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Tunables for a `TransactionPipeline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Gas added to every estimate, for both the limit and the balance check.
    pub gas_margin: u64,
    pub receipt_timeout: Duration,
    pub poll_interval: Duration,
    /// Fixed chain id; fetched once from the ledger when `None`.
    pub chain_id: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            gas_margin: DEFAULT_GAS_MARGIN,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            chain_id: None,
        }
    }
}
