use std::sync::Arc;

use md_02_nonce_sequencer::{NonceError, NonceSource};
use md_03_gas_guard::{BalanceSource, GasGuardError};
use shared_types::{Address, U256};

use crate::ports::outbound::LedgerClient;

/// `NonceSource` backed by `LedgerClient::transaction_count`.
pub struct LedgerNonceSource<L: LedgerClient>(pub Arc<L>);

#[async_trait::async_trait]
impl<L: LedgerClient> NonceSource for LedgerNonceSource<L> {
    async fn transaction_count(&self, address: &Address) -> Result<u64, NonceError> {
        self.0
            .transaction_count(address)
            .await
            .map_err(|e| NonceError::SourceUnavailable(e.to_string()))
    }
}

/// `BalanceSource` backed by `LedgerClient::balance`.
pub struct LedgerBalanceSource<L: LedgerClient>(pub Arc<L>);

#[async_trait::async_trait]
impl<L: LedgerClient> BalanceSource for LedgerBalanceSource<L> {
    async fn balance(&self, address: &Address) -> Result<U256, GasGuardError> {
        self.0
            .balance(address)
            .await
            .map_err(|e| GasGuardError::SourceUnavailable(e.to_string()))
    }
}
