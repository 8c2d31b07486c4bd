//! # Adapters
//!
//! - `json_rpc`: `LedgerClient` over Ethereum JSON-RPC 2.0 / HTTP
//! - `ledger_sources`: views of a `LedgerClient` as the nonce and balance
//!   sources the sequencer and guard consume

pub mod json_rpc;
pub mod ledger_sources;

pub use json_rpc::JsonRpcLedger;
pub use ledger_sources::{LedgerBalanceSource, LedgerNonceSource};
