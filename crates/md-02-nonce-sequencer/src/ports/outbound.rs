//! Outbound (Driven) ports for the Nonce Sequencer.

use shared_types::Address;

use crate::domain::errors::NonceError;

/// Ledger capability that reports how many transactions an account has sent.
#[async_trait::async_trait]
pub trait NonceSource: Send + Sync {
    /// The ledger's current confirmed transaction count for `address`.
    ///
    /// # Errors
    /// * `NonceError::SourceUnavailable` - the ledger could not be queried
    async fn transaction_count(&self, address: &Address) -> Result<u64, NonceError>;
}

#[async_trait::async_trait]
impl<T: NonceSource + ?Sized> NonceSource for std::sync::Arc<T> {
    async fn transaction_count(&self, address: &Address) -> Result<u64, NonceError> {
        (**self).transaction_count(address).await
    }
}
