//! # Gas Guard (MD-03)
//!
//! Refuses to spend a nonce on a transaction the sender cannot pay for.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): cost arithmetic and the `GasQuote` it yields
//! - **Ports Layer** (`ports/`): `BalanceSource`, the ledger balance query
//! - **Service** (`service.rs`): `PreflightGasGuard`, fetches a fresh balance per check
//!
//! ## Cost Rule
//!
//! ```text
//! required = (estimated_gas + extra_margin) * gas_price
//! ```
//!
//! computed in 256-bit arithmetic. `balance == required` passes. A product
//! that overflows 256 bits is unaffordable by definition.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::cost::{required_funds, DEFAULT_GAS_MARGIN};
pub use domain::entities::GasQuote;
pub use domain::errors::GasGuardError;
pub use ports::outbound::BalanceSource;
pub use service::PreflightGasGuard;
