//! # Adapters
//!
//! - `solc`: `Compiler` over the `solc` command-line compiler

pub mod solc;

pub use solc::SolcCompiler;
