//! # Nonce Sequencer
//!
//! Process-local counter table seeded from the ledger on first use.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{format_address, Address};
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use super::errors::NonceError;
use crate::ports::outbound::NonceSource;

/// Next nonce for one address; `None` until seeded from the ledger.
type Slot = Arc<AsyncMutex<Option<u64>>>;

/// Issues monotonically increasing nonces per signing account.
///
/// Issuance for one address is serialised by that address's slot lock; the
/// table lock is held only long enough to find or create the slot.
pub struct NonceSequencer<S: NonceSource> {
    source: S,
    slots: Mutex<HashMap<Address, Slot>>,
}

impl<S: NonceSource> NonceSequencer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, address: &Address) -> Slot {
        self.slots.lock().entry(*address).or_default().clone()
    }

    /// Reserve the next nonce for `address`.
    ///
    /// The first call per address queries the ledger; later calls only touch
    /// the cached counter.
    pub async fn next(&self, address: &Address) -> Result<u64, NonceError> {
        let slot = self.slot(address);
        let mut counter = slot.lock().await;

        let nonce = match *counter {
            Some(nonce) => nonce,
            None => {
                let seeded = self.source.transaction_count(address).await?;
                debug!(address = %format_address(address), seeded, "Seeded nonce counter from ledger");
                seeded
            }
        };

        *counter = Some(nonce.checked_add(1).ok_or(NonceError::Exhausted)?);
        Ok(nonce)
    }

    /// The nonce the next `next` call would return, if already seeded.
    pub async fn peek(&self, address: &Address) -> Option<u64> {
        *self.slot(address).lock().await
    }

    /// Drop the cached counter so the next call re-reads the ledger.
    ///
    /// Only for operator-driven recovery after inspecting the ledger; calling
    /// it while transactions from `address` are unconfirmed can reissue their
    /// nonces.
    pub async fn resync(&self, address: &Address) {
        *self.slot(address).lock().await = None;
        debug!(address = %format_address(address), "Nonce counter reset");
    }
}
