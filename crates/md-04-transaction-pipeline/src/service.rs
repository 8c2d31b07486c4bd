//! # Transaction Pipeline Service
//!
//! One logical ledger operation per `submit` call:
//!
//! ```text
//! estimate -> gas price -> preflight guard -> chain id -> nonce -> sign -> send -> poll receipt
//! ```
//!
//! Everything before `send` is local or read-only; a nonce is reserved only
//! once the transaction is known to be affordable.

use std::sync::Arc;

use md_02_nonce_sequencer::NonceSequencer;
use md_03_gas_guard::PreflightGasGuard;
use shared_types::{format_hash, Account, DiagnosticEvent, DiagnosticsSink, Hash, TransactionReceipt};
use tokio::sync::OnceCell;
use tokio::time::Instant;
use tracing::warn;

use crate::adapters::ledger_sources::{LedgerBalanceSource, LedgerNonceSource};
use crate::domain::config::PipelineConfig;
use crate::domain::entities::{PendingTransaction, TransactionPayload, TransactionTarget};
use crate::domain::errors::{LedgerError, PipelineError};
use crate::ports::outbound::{CallRequest, LedgerClient};

/// Drives transactions from estimate to receipt against one ledger.
///
/// Shared by reference across concurrent callers; nonce issuance is the only
/// serialised section and only per sender.
pub struct TransactionPipeline<L: LedgerClient> {
    ledger: Arc<L>,
    sequencer: NonceSequencer<LedgerNonceSource<L>>,
    guard: PreflightGasGuard<LedgerBalanceSource<L>>,
    chain_id: OnceCell<u64>,
    config: PipelineConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl<L: LedgerClient> TransactionPipeline<L> {
    pub fn new(ledger: Arc<L>, config: PipelineConfig, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        let chain_id = match config.chain_id {
            Some(id) => OnceCell::from(id),
            None => OnceCell::new(),
        };

        Self {
            sequencer: NonceSequencer::new(LedgerNonceSource(Arc::clone(&ledger))),
            guard: PreflightGasGuard::new(
                LedgerBalanceSource(Arc::clone(&ledger)),
                config.gas_margin,
            ),
            ledger,
            chain_id,
            config,
            diagnostics,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Nonce state, for operator-driven `resync` after a rejected submission.
    pub fn sequencer(&self) -> &NonceSequencer<LedgerNonceSource<L>> {
        &self.sequencer
    }

    /// Estimate, guard, sign, submit and wait for the receipt.
    ///
    /// A reverted transaction is returned as a receipt with `success == false`.
    /// Two identical calls produce two distinct ledger transactions.
    ///
    /// # Errors
    /// * `EstimationFailed`, `InsufficientBalance`, `Ledger`, `Nonce`, `Signing`
    ///   before anything is submitted
    /// * `SubmissionRejected` - the ledger refused the signed bytes
    /// * `ConfirmationTimeout` - submitted but not confirmed in time
    pub async fn submit(
        &self,
        account: &Account,
        target: TransactionTarget,
        payload: TransactionPayload,
    ) -> Result<TransactionReceipt, PipelineError> {
        let sender = account.address();
        let request = CallRequest {
            from: sender,
            to: target.to_address(),
            value: payload.value,
            data: payload.data,
        };

        let estimated_gas = self
            .ledger
            .estimate_gas(&request)
            .await
            .map_err(|e| PipelineError::EstimationFailed(e.to_string()))?;
        self.diagnostics.record(&DiagnosticEvent::GasEstimated {
            sender,
            gas: estimated_gas,
        });

        let gas_price = self.ledger.gas_price().await?;
        let quote = self.guard.check(&sender, estimated_gas, gas_price).await?;
        self.diagnostics.record(&DiagnosticEvent::PreflightPassed {
            sender,
            required: quote.required,
            available: quote.available,
        });

        let chain_id = self.chain_id().await?;

        let nonce = self.sequencer.next(&sender).await?;
        self.diagnostics
            .record(&DiagnosticEvent::NonceReserved { sender, nonce });

        let signed = PendingTransaction {
            sender,
            nonce,
            gas_limit: quote.gas_limit,
            gas_price: quote.gas_price,
            to: request.to,
            value: request.value,
            payload: request.data,
            chain_id,
        }
        .sign(account.secret())?;

        let transaction_hash = self
            .ledger
            .send_raw_transaction(signed.raw())
            .await
            .map_err(|e| PipelineError::SubmissionRejected {
                nonce,
                reason: e.to_string(),
            })?;

        if transaction_hash != signed.hash() {
            warn!(
                local = %format_hash(&signed.hash()),
                ledger = %format_hash(&transaction_hash),
                "Ledger reported a different transaction hash"
            );
        }

        self.diagnostics.record(&DiagnosticEvent::TransactionSubmitted {
            sender,
            nonce,
            transaction_hash,
        });

        self.await_receipt(&transaction_hash).await
    }

    /// Poll for the receipt of an already submitted transaction.
    ///
    /// Transport errors while polling are logged and retried until the
    /// timeout elapses.
    ///
    /// # Errors
    /// * `ConfirmationTimeout` - no receipt within `receipt_timeout`
    pub async fn await_receipt(&self, transaction_hash: &Hash) -> Result<TransactionReceipt, PipelineError> {
        let started = Instant::now();

        loop {
            match self.ledger.transaction_receipt(transaction_hash).await {
                Ok(Some(receipt)) => {
                    self.diagnostics.record(&DiagnosticEvent::ReceiptObserved {
                        transaction_hash: *transaction_hash,
                        success: receipt.success,
                        gas_used: receipt.gas_used,
                    });
                    return Ok(receipt);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(tx_hash = %format_hash(transaction_hash), error = %e, "Receipt poll failed");
                }
            }

            let waited = started.elapsed();
            if waited >= self.config.receipt_timeout {
                self.diagnostics.record(&DiagnosticEvent::ConfirmationTimedOut {
                    transaction_hash: *transaction_hash,
                });
                return Err(PipelineError::ConfirmationTimeout {
                    transaction_hash: *transaction_hash,
                    waited,
                });
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Configured chain id, or the ledger's, fetched once.
    pub async fn chain_id(&self) -> Result<u64, LedgerError> {
        self.chain_id
            .get_or_try_init(|| self.ledger.chain_id())
            .await
            .copied()
    }
}
