use shared_types::U256;
use thiserror::Error;

/// Errors from the pre-flight check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GasGuardError {
    /// Balance does not cover the worst-case gas cost.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// The balance query failed.
    #[error("Balance source unavailable: {0}")]
    SourceUnavailable(String),
}
