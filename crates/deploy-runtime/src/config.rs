//! # Deploy Configuration
//!
//! Unified configuration for the `md-deploy` runtime.
//!
//! Values are layered: `Default`, then `MD_*` environment variables, then
//! command-line flags (applied by `main`). `validate()` runs last.
//!
//! ## Environment
//!
//! | Variable | Field |
//! |----------|-------|
//! | `MD_RPC_URL` | `rpc_url` |
//! | `MD_GAS_MARGIN` | `gas_margin` |
//! | `MD_RECEIPT_TIMEOUT_SECS` | `receipt_timeout` |
//! | `MD_CHAIN_ID` | `chain_id` |
//! | `MD_ACCOUNTS_FILE` | `accounts_file` |
//! | `MD_CONTRACTS_DIR` | `contracts_dir` |

use std::path::PathBuf;
use std::time::Duration;

use md_04_transaction_pipeline::PipelineConfig;
use md_05_deployment::{
    CompilerError, ContractSource, ContractSources, ContractSpec,
    DEFAULT_EVM_VERSION,
};
use shared_types::{AccountError, Role};
use thiserror::Error;

/// Errors loading configuration, accounts or the contracts file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Receipt timeout must be greater than zero")]
    ZeroReceiptTimeout,

    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("RPC URL is empty")]
    EmptyRpcUrl,

    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Cannot write {path}: {reason}")]
    Unwritable { path: String, reason: String },

    #[error("Malformed {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// The address stored for a role is not the one its key controls.
    #[error("Account {role}: configured address {configured} does not match key ({derived})")]
    AddressMismatch {
        role: Role,
        configured: String,
        derived: String,
    },

    #[error("Account {role}: {source}")]
    InvalidAccount { role: Role, source: AccountError },

    #[error("No account configured for role {0}")]
    MissingRole(Role),

    #[error("Contract source: {0}")]
    ContractSource(#[from] CompilerError),
}

/// One contract: a source file under `contracts_dir` and the contract in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFile {
    pub file: PathBuf,
    pub entry_point: String,
}

impl ContractFile {
    fn new(file: &str, entry_point: &str) -> Self {
        Self {
            file: PathBuf::from(file),
            entry_point: entry_point.to_string(),
        }
    }
}

/// Where each of the five contracts lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractLayout {
    pub dao: ContractFile,
    pub scheduler: ContractFile,
    pub host: ContractFile,
    pub tower: ContractFile,
    pub task: ContractFile,
}

impl Default for ContractLayout {
    fn default() -> Self {
        Self {
            dao: ContractFile::new("MecaContract.sol", "MecaDaoContract"),
            scheduler: ContractFile::new("SchedulerContract.sol", "MecaSchedulerContract"),
            host: ContractFile::new("HostContract.sol", "MecaHostContract"),
            tower: ContractFile::new("TowerContract.sol", "MecaTowerContract"),
            task: ContractFile::new("TaskContract.sol", "MecaTaskContract"),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Ledger JSON-RPC endpoint.
    pub rpc_url: String,
    /// Per-request HTTP timeout.
    pub rpc_timeout: Duration,
    /// Accounts JSON (role -> key, address, balance).
    pub accounts_file: PathBuf,
    /// Directory holding the `.sol` sources; also the import base path.
    pub contracts_dir: PathBuf,
    /// Where deployed addresses are written.
    pub output_file: PathBuf,
    pub solc_path: PathBuf,
    pub evm_version: String,
    /// Gas added on top of every estimate.
    pub gas_margin: u64,
    pub receipt_timeout: Duration,
    pub poll_interval: Duration,
    /// Skip the `eth_chainId` query when set.
    pub chain_id: Option<u64>,
    /// Role that deploys the Scheduler and the Host/Tower/Task contracts.
    pub scheduler_signer: Role,
    pub layout: ContractLayout,
}

impl Default for DeployConfig {
    fn default() -> Self {
        let pipeline = PipelineConfig::default();
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            rpc_timeout: Duration::from_secs(10),
            accounts_file: PathBuf::from("config/accounts.json"),
            contracts_dir: PathBuf::from("contracts"),
            output_file: PathBuf::from("contracts.json"),
            solc_path: PathBuf::from("solc"),
            evm_version: DEFAULT_EVM_VERSION.to_string(),
            gas_margin: pipeline.gas_margin,
            receipt_timeout: pipeline.receipt_timeout,
            poll_interval: pipeline.poll_interval,
            chain_id: pipeline.chain_id,
            scheduler_signer: Role::Dao,
            layout: ContractLayout::default(),
        }
    }
}

impl DeployConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply `MD_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("MD_RPC_URL") {
            self.rpc_url = url;
        }
        if let Some(value) = lookup("MD_GAS_MARGIN") {
            self.gas_margin = parse_number("MD_GAS_MARGIN", &value)?;
        }
        if let Some(value) = lookup("MD_RECEIPT_TIMEOUT_SECS") {
            self.receipt_timeout =
                Duration::from_secs(parse_number("MD_RECEIPT_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = lookup("MD_CHAIN_ID") {
            self.chain_id = Some(parse_number("MD_CHAIN_ID", &value)?);
        }
        if let Some(path) = lookup("MD_ACCOUNTS_FILE") {
            self.accounts_file = PathBuf::from(path);
        }
        if let Some(path) = lookup("MD_CONTRACTS_DIR") {
            self.contracts_dir = PathBuf::from(path);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_url.trim().is_empty() {
            return Err(ConfigError::EmptyRpcUrl);
        }
        if self.receipt_timeout.is_zero() {
            return Err(ConfigError::ZeroReceiptTimeout);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            gas_margin: self.gas_margin,
            receipt_timeout: self.receipt_timeout,
            poll_interval: self.poll_interval,
            chain_id: self.chain_id,
        }
    }

    /// Read one contract's source from `contracts_dir`.
    pub fn contract_spec(&self, contract: &ContractFile) -> Result<ContractSpec, ConfigError> {
        let source = ContractSource::from_file(&self.contracts_dir.join(&contract.file))?;
        Ok(ContractSpec {
            source,
            entry_point: contract.entry_point.clone(),
        })
    }

    /// Read all five sources.
    pub fn contract_sources(&self) -> Result<ContractSources, ConfigError> {
        Ok(ContractSources {
            dao: self.contract_spec(&self.layout.dao)?,
            scheduler: self.contract_spec(&self.layout.scheduler)?,
            host: self.contract_spec(&self.layout.host)?,
            tower: self.contract_spec(&self.layout.tower)?,
            task: self.contract_spec(&self.layout.task)?,
        })
    }
}

fn parse_number(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}
