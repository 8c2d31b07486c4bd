//! Error types for the transaction pipeline.

use std::time::Duration;

use md_02_nonce_sequencer::NonceError;
use md_03_gas_guard::GasGuardError;
use shared_types::{format_hash, Hash, U256};
use thiserror::Error;

/// Failures talking to the ledger endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The request never produced a response (connect, timeout, HTTP status).
    #[error("Ledger transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a JSON-RPC error object.
    #[error("Ledger RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response could not be interpreted.
    #[error("Invalid ledger response: {0}")]
    InvalidResponse(String),
}

/// Failures building, signing or decoding a transaction locally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    #[error("Signature could not be produced: {0}")]
    SignatureFailed(String),

    #[error("Malformed raw transaction: {0}")]
    MalformedTransaction(String),

    #[error("Unsupported signature value v = {0}")]
    InvalidRecoveryValue(u64),

    #[error("Sender recovery failed")]
    RecoveryFailed,
}

/// Errors returned by `TransactionPipeline::submit`.
///
/// Everything except `SubmissionRejected` and `ConfirmationTimeout` happens
/// before the signed bytes leave the process.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The ledger could not estimate gas (typically the call would revert).
    #[error("Gas estimation failed: {0}")]
    EstimationFailed(String),

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// The ledger refused the signed transaction. The nonce stays consumed.
    #[error("Submission with nonce {nonce} rejected: {reason}")]
    SubmissionRejected { nonce: u64, reason: String },

    /// Submitted, but no receipt within the bounded wait. Re-poll with
    /// `await_receipt` rather than resubmitting.
    #[error("No receipt for {} after {waited:?}", format_hash(.transaction_hash))]
    ConfirmationTimeout {
        transaction_hash: Hash,
        waited: Duration,
    },

    /// A read-only ledger query failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Nonce(#[from] NonceError),

    #[error(transparent)]
    Signing(#[from] SigningError),
}

impl PipelineError {
    /// Only a confirmation timeout can be resolved by waiting longer.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PipelineError::ConfirmationTimeout { .. })
    }
}

impl From<GasGuardError> for PipelineError {
    fn from(err: GasGuardError) -> Self {
        match err {
            GasGuardError::InsufficientBalance {
                required,
                available,
            } => PipelineError::InsufficientBalance {
                required,
                available,
            },
            GasGuardError::SourceUnavailable(reason) => {
                PipelineError::Ledger(LedgerError::Transport(reason))
            }
        }
    }
}
