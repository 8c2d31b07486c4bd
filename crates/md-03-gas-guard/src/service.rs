//! # Pre-flight Gas Guard Service
//!
//! Runs once per transaction, after estimation and before a nonce is
//! reserved, so an unaffordable transaction never consumes one.

use shared_types::{format_address, Address, U256};
use tracing::debug;

use crate::domain::cost::{required_funds, DEFAULT_GAS_MARGIN};
use crate::domain::entities::GasQuote;
use crate::domain::errors::GasGuardError;
use crate::ports::outbound::BalanceSource;

/// Compares a fresh balance against the worst-case gas cost.
pub struct PreflightGasGuard<B: BalanceSource> {
    source: B,
    extra_margin: u64,
}

impl<B: BalanceSource> PreflightGasGuard<B> {
    /// # Arguments
    /// * `source` - balance lookup, queried on every check
    /// * `extra_margin` - gas added to each estimate
    pub fn new(source: B, extra_margin: u64) -> Self {
        Self {
            source,
            extra_margin,
        }
    }

    /// Guard with the default 100 000 gas margin.
    pub fn with_default_margin(source: B) -> Self {
        Self::new(source, DEFAULT_GAS_MARGIN)
    }

    pub fn extra_margin(&self) -> u64 {
        self.extra_margin
    }

    /// Check that `address` can pay for `estimated_gas` at `gas_price`.
    ///
    /// # Errors
    /// * `GasGuardError::InsufficientBalance` - balance below the required amount,
    ///   or the cost does not fit in 256 bits (`required == U256::MAX`)
    /// * `GasGuardError::SourceUnavailable` - balance lookup failed
    pub async fn check(
        &self,
        address: &Address,
        estimated_gas: u64,
        gas_price: U256,
    ) -> Result<GasQuote, GasGuardError> {
        let available = self.source.balance(address).await?;

        let Some((gas_limit, required)) = required_funds(estimated_gas, self.extra_margin, gas_price)
        else {
            return Err(GasGuardError::InsufficientBalance {
                required: U256::MAX,
                available,
            });
        };

        if available < required {
            return Err(GasGuardError::InsufficientBalance {
                required,
                available,
            });
        }

        debug!(
            address = %format_address(address),
            gas_limit,
            %required,
            %available,
            "Pre-flight balance check passed"
        );

        Ok(GasQuote {
            gas_limit,
            gas_price,
            required,
            available,
        })
    }
}
