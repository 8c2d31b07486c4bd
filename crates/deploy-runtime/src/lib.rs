//! # MECA Deploy Runtime
//!
//! Library half of the `md-deploy` binary.
//!
//! ## Modules
//!
//! - `config/` - `DeployConfig`: defaults, `MD_*` environment overrides, validation
//! - `accounts/` - role-keyed accounts file, loading and generation
//! - `output/` - `contracts.json` with the deployed addresses
//! - `runtime/` - `DeployRuntime`, the orchestrator bound to config and accounts
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, environment, flags)
//! 2. Validate it
//! 3. Load accounts, checking every address against its key
//! 4. Connect the ledger and compiler adapters
//! 5. Run the requested command

pub mod accounts;
pub mod config;
pub mod output;
pub mod runtime;

pub use accounts::AccountStore;
pub use config::{ConfigError, ContractFile, ContractLayout, DeployConfig};
pub use output::ContractAddresses;
pub use runtime::{DeployRuntime, RuntimeError};
