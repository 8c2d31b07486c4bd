//! # Transaction Pipeline (MD-04)
//!
//! Turns a logical ledger operation ("deploy this", "call that") into a
//! confirmed receipt.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): pending/signed transactions, EIP-155
//!   signing and decoding, pipeline configuration, errors
//! - **Ports Layer** (`ports/`): `LedgerClient`
//! - **Adapters** (`adapters/`): `JsonRpcLedger` and the nonce/balance views
//!   of a ledger consumed by MD-02 and MD-03
//! - **Service** (`service.rs`): `TransactionPipeline`
//!
//! ## Ordering Guarantees
//!
//! | Step | Failure | Nonce consumed | Submitted |
//! |------|---------|----------------|-----------|
//! | estimate | `EstimationFailed` | no | no |
//! | gas price + preflight | `Ledger` / `InsufficientBalance` | no | no |
//! | chain id | `Ledger` | no | no |
//! | nonce | `Nonce` | no | no |
//! | sign | `Signing` | yes | no |
//! | send | `SubmissionRejected` | yes | no |
//! | receipt | `ConfirmationTimeout` | yes | yes |
//!
//! Dropping the `submit` future is safe up to the send step. After that the
//! transaction may be on the ledger; callers recover with `await_receipt`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{JsonRpcLedger, LedgerBalanceSource, LedgerNonceSource};
pub use domain::config::{PipelineConfig, DEFAULT_POLL_INTERVAL, DEFAULT_RECEIPT_TIMEOUT};
pub use domain::entities::{
    PendingTransaction, SignedTransaction, TransactionPayload, TransactionTarget,
};
pub use domain::errors::{LedgerError, PipelineError, SigningError};
pub use domain::signing::decode_signed_transaction;
pub use ports::outbound::{CallRequest, LedgerClient};
pub use service::TransactionPipeline;
