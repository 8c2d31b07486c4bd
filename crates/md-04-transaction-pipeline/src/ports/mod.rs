//! # Ports Layer
//!
//! - **Outbound (Driven)**: `LedgerClient`, every ledger interaction the pipeline needs

pub mod outbound;
