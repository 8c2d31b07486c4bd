//! # Ports Layer
//!
//! - **Outbound (Driven)**: the ledger query the sequencer seeds from

pub mod outbound;
