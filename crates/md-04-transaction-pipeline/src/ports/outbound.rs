//! Outbound (Driven) ports for the Transaction Pipeline.

use shared_types::{Address, Hash, TransactionReceipt, U256};

use crate::domain::errors::LedgerError;

/// Parameters for a gas estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub from: Address,
    /// `None` estimates a contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
}

/// The ledger endpoint.
///
/// Implementations must be safe to share across concurrent submissions.
#[async_trait::async_trait]
pub trait LedgerClient: Send + Sync {
    async fn balance(&self, address: &Address) -> Result<U256, LedgerError>;

    /// Confirmed transaction count (`latest` block).
    async fn transaction_count(&self, address: &Address) -> Result<u64, LedgerError>;

    async fn gas_price(&self) -> Result<U256, LedgerError>;

    async fn chain_id(&self) -> Result<u64, LedgerError>;

    async fn estimate_gas(&self, request: &CallRequest) -> Result<u64, LedgerError>;

    /// Returns the transaction hash the ledger assigned.
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<Hash, LedgerError>;

    /// `Ok(None)` while the transaction is not yet included.
    async fn transaction_receipt(
        &self,
        hash: &Hash,
    ) -> Result<Option<TransactionReceipt>, LedgerError>;
}
