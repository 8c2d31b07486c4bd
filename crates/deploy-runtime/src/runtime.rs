//! # Deploy Runtime
//!
//! Binds configuration and accounts to a `DeploymentOrchestrator`.
//! `connect` wires the production adapters (JSON-RPC ledger, solc); tests
//! pass their own ledger and compiler to `new`.

use std::sync::Arc;

use md_04_transaction_pipeline::{JsonRpcLedger, LedgerClient, TransactionPipeline};
use md_05_deployment::{
    Compiler, ContractHandle, ContractKind, DeployedContracts, DeploymentError,
    DeploymentOrchestrator, DeploymentPlan, DeploymentStep, HostRegistration, Participants,
    SolcCompiler, TaskRegistration, TowerRegistration,
};
use shared_types::{format_address, DiagnosticsSink, Role, TracingSink, TransactionReceipt};
use thiserror::Error;
use tracing::info;

use crate::accounts::AccountStore;
use crate::config::{ConfigError, DeployConfig};
use crate::output::ContractAddresses;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Deployment(#[from] DeploymentError),
}

pub struct DeployRuntime<L: LedgerClient, C: Compiler> {
    config: DeployConfig,
    accounts: AccountStore,
    orchestrator: DeploymentOrchestrator<L, C>,
}

impl DeployRuntime<JsonRpcLedger, SolcCompiler> {
    /// Production wiring: JSON-RPC ledger at `config.rpc_url`, `solc` compiler,
    /// diagnostics forwarded to `tracing`.
    pub fn connect(config: DeployConfig, accounts: AccountStore) -> Result<Self, ConfigError> {
        config.validate()?;
        let ledger = Arc::new(JsonRpcLedger::with_timeout(
            config.rpc_url.clone(),
            config.rpc_timeout,
        ));
        info!(rpc_url = %ledger.rpc_url(), "Using JSON-RPC ledger");
        let compiler =
            SolcCompiler::new(config.solc_path.clone()).with_evm_version(config.evm_version.clone());
        Ok(Self::new(config, accounts, ledger, compiler, Arc::new(TracingSink)))
    }
}

impl<L: LedgerClient, C: Compiler> DeployRuntime<L, C> {
    pub fn new(
        config: DeployConfig,
        accounts: AccountStore,
        ledger: Arc<L>,
        compiler: C,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let pipeline = Arc::new(TransactionPipeline::new(
            ledger,
            config.pipeline_config(),
            Arc::clone(&diagnostics),
        ));
        let orchestrator = DeploymentOrchestrator::new(pipeline, compiler, diagnostics);
        Self {
            config,
            accounts,
            orchestrator,
        }
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Deploy and wire the five contracts, then write their addresses to
    /// `output_file`.
    pub async fn deploy(&self) -> Result<DeployedContracts, RuntimeError> {
        let plan = DeploymentPlan {
            dao: self.accounts.get(Role::Dao)?.clone(),
            scheduler_signer: self.accounts.get(self.config.scheduler_signer)?.clone(),
            contracts: self.config.contract_sources()?,
            participants: Participants::default(),
        };

        let contracts = self.orchestrator.run(&plan).await?;
        ContractAddresses::from(&contracts).save(&self.config.output_file)?;
        info!(path = %self.config.output_file.display(), "Contract addresses written");
        Ok(contracts)
    }

    pub async fn register_tower(
        &self,
        registration: &TowerRegistration,
    ) -> Result<TransactionReceipt, RuntimeError> {
        let tower = self
            .deployed(ContractKind::Tower, DeploymentStep::RegisterTower)
            .await?;
        let signer = self.accounts.get(Role::TowerOperator)?;
        Ok(self
            .orchestrator
            .register_tower(signer, &tower, registration)
            .await?)
    }

    pub async fn register_host(
        &self,
        registration: &HostRegistration,
    ) -> Result<TransactionReceipt, RuntimeError> {
        let host = self
            .deployed(ContractKind::Host, DeploymentStep::RegisterHost)
            .await?;
        let signer = self.accounts.get(Role::HostOperator)?;
        Ok(self
            .orchestrator
            .register_host(signer, &host, registration)
            .await?)
    }

    pub async fn add_task(
        &self,
        registration: &TaskRegistration,
    ) -> Result<TransactionReceipt, RuntimeError> {
        let task = self
            .deployed(ContractKind::Task, DeploymentStep::AddTask)
            .await?;
        let signer = self.accounts.get(Role::TaskDeveloper)?;
        Ok(self.orchestrator.add_task(signer, &task, registration).await?)
    }

    /// Handle for a contract from an earlier `deploy`: address from the
    /// output file, interface from its source.
    async fn deployed(
        &self,
        kind: ContractKind,
        step: DeploymentStep,
    ) -> Result<ContractHandle, RuntimeError> {
        let address = ContractAddresses::load(&self.config.output_file)?.address(kind)?;
        let layout = &self.config.layout;
        let file = match kind {
            ContractKind::Host => &layout.host,
            ContractKind::Tower => &layout.tower,
            ContractKind::Task => &layout.task,
        };
        let spec = self.config.contract_spec(file)?;
        let compiled = self.orchestrator.compile(step, &spec).await?;

        info!(contract = %kind, address = %format_address(&address), "Using deployed contract");
        Ok(ContractHandle::at(
            compiled.name(),
            compiled.interface().clone(),
            address,
        ))
    }
}
