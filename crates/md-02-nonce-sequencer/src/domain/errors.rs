use thiserror::Error;

/// Errors from nonce issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NonceError {
    /// The ledger could not report the account's transaction count.
    #[error("Nonce source unavailable: {0}")]
    SourceUnavailable(String),

    /// Counter reached `u64::MAX`.
    #[error("Nonce space exhausted")]
    Exhausted,
}
