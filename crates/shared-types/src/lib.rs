//! # Shared Types Crate
//!
//! This crate contains the entities that flow between the pipeline crates:
//! accounts and roles, receipts, hex encoding helpers and the diagnostics
//! sink. Contract handles belong to `md-05-deployment`.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Secrets stay opaque**: `SecretKey` never renders its bytes; `Debug`
//!   prints a redaction marker and the buffer is zeroized on drop.
//! - **Explicit diagnostics**: Pipeline stages report through a
//!   `DiagnosticsSink` handed to them, never through ambient state.

pub mod crypto;
pub mod diagnostics;
pub mod entities;
pub mod errors;

pub use crypto::{address_from_signing_key, address_from_verifying_key, keccak256};
pub use diagnostics::{DiagnosticEvent, DiagnosticsSink, MemorySink, TracingSink};
pub use entities::*;
pub use errors::*;
