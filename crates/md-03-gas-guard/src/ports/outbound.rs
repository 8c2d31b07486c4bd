//! Outbound (Driven) ports for the Gas Guard.

use shared_types::{Address, U256};

use crate::domain::errors::GasGuardError;

/// Ledger capability that reports an account's spendable balance.
#[async_trait::async_trait]
pub trait BalanceSource: Send + Sync {
    /// Current balance of `address` in the smallest ledger unit.
    ///
    /// # Errors
    /// * `GasGuardError::SourceUnavailable` - the ledger could not be queried
    async fn balance(&self, address: &Address) -> Result<U256, GasGuardError>;
}

#[async_trait::async_trait]
impl<T: BalanceSource + ?Sized> BalanceSource for std::sync::Arc<T> {
    async fn balance(&self, address: &Address) -> Result<U256, GasGuardError> {
        (**self).balance(address).await
    }
}
