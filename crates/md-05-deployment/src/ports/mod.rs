//! # Ports Layer
//!
//! - **Outbound (Driven)**: `Compiler`, Solidity source to ABI + bytecode

pub mod outbound;
