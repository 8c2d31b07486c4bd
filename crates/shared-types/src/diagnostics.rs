//! # Diagnostics Sink
//!
//! Pipeline stages report progress through a `DiagnosticsSink` capability
//! that is passed in at construction. `TracingSink` forwards to `tracing`;
//! `MemorySink` keeps events for assertions.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::entities::{format_address, format_hash, Address, Hash, U256};

/// A single observable step of the transaction pipeline or orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// Gas estimation returned for a payload.
    GasEstimated { sender: Address, gas: u64 },
    /// The balance covers the worst-case cost.
    PreflightPassed {
        sender: Address,
        required: U256,
        available: U256,
    },
    /// A nonce was handed out for this sender.
    NonceReserved { sender: Address, nonce: u64 },
    /// Signed bytes accepted by the ledger.
    TransactionSubmitted {
        sender: Address,
        nonce: u64,
        transaction_hash: Hash,
    },
    /// A receipt was observed.
    ReceiptObserved {
        transaction_hash: Hash,
        success: bool,
        gas_used: u64,
    },
    /// No receipt within the bounded wait.
    ConfirmationTimedOut { transaction_hash: Hash },
    /// An orchestration step began.
    StepStarted { step: String },
    /// An orchestration step finished with a successful receipt.
    StepCompleted { step: String, transaction_hash: Hash },
    /// An orchestration step failed; the chain halts.
    StepFailed { step: String, reason: String },
}

/// Capability the pipeline reports through.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

/// Forwards every event to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::GasEstimated { sender, gas } => {
                debug!(sender = %format_address(sender), gas, "Gas estimated");
            }
            DiagnosticEvent::PreflightPassed {
                sender,
                required,
                available,
            } => {
                debug!(
                    sender = %format_address(sender),
                    %required,
                    %available,
                    "Preflight balance check passed"
                );
            }
            DiagnosticEvent::NonceReserved { sender, nonce } => {
                debug!(sender = %format_address(sender), nonce, "Nonce reserved");
            }
            DiagnosticEvent::TransactionSubmitted {
                sender,
                nonce,
                transaction_hash,
            } => {
                info!(
                    sender = %format_address(sender),
                    nonce,
                    tx_hash = %format_hash(transaction_hash),
                    "Transaction submitted"
                );
            }
            DiagnosticEvent::ReceiptObserved {
                transaction_hash,
                success,
                gas_used,
            } => {
                if *success {
                    info!(tx_hash = %format_hash(transaction_hash), gas_used, "Transaction confirmed");
                } else {
                    warn!(tx_hash = %format_hash(transaction_hash), gas_used, "Transaction reverted");
                }
            }
            DiagnosticEvent::ConfirmationTimedOut { transaction_hash } => {
                warn!(tx_hash = %format_hash(transaction_hash), "No receipt before timeout");
            }
            DiagnosticEvent::StepStarted { step } => {
                info!(%step, "Step started");
            }
            DiagnosticEvent::StepCompleted {
                step,
                transaction_hash,
            } => {
                info!(%step, tx_hash = %format_hash(transaction_hash), "Step completed");
            }
            DiagnosticEvent::StepFailed { step, reason } => {
                warn!(%step, %reason, "Step failed");
            }
        }
    }
}

/// Keeps every recorded event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().clone()
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, event: &DiagnosticEvent) {
        self.events.lock().push(event.clone());
    }
}
