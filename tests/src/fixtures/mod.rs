//! # Test Fixtures
//!
//! Shared setup for the integration flows: deterministic accounts, a
//! contracts directory on disk, and the in-memory ledger and compiler.

pub mod compiler;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use deploy_runtime::{AccountStore, ContractLayout, DeployConfig, DeployRuntime};
use md_04_transaction_pipeline::{PipelineConfig, TransactionPipeline};
use md_05_deployment::{
    ContractSource, ContractSources, ContractSpec, DeploymentOrchestrator, DeploymentPlan,
    Participants,
};
use shared_types::{format_address, Account, MemorySink, U256};
use tempfile::TempDir;

pub use compiler::FixtureCompiler;
pub use ledger::{create_address, InMemoryLedger, LedgerTransaction};

/// Plenty for every flow at gas price 1.
pub const FUNDING: u64 = 1_000_000_000;

/// Account whose private key is `byte` in the last position.
pub fn account(byte: u8) -> Account {
    let mut key = [0u8; 32];
    key[31] = byte;
    Account::from_private_key(&hex::encode(key)).expect("valid fixture key")
}

/// Short waits so timeout paths finish quickly.
pub fn fast_pipeline_config() -> PipelineConfig {
    PipelineConfig {
        receipt_timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(5),
        ..PipelineConfig::default()
    }
}

/// Ledger with each account funded with `FUNDING`.
pub fn funded_ledger(accounts: &[&Account]) -> Arc<InMemoryLedger> {
    let ledger = Arc::new(InMemoryLedger::default());
    for account in accounts {
        ledger.fund(account.address(), U256::from(FUNDING));
    }
    ledger
}

pub fn pipeline(ledger: &Arc<InMemoryLedger>) -> (Arc<TransactionPipeline<InMemoryLedger>>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let pipeline = Arc::new(TransactionPipeline::new(
        Arc::clone(ledger),
        fast_pipeline_config(),
        sink.clone(),
    ));
    (pipeline, sink)
}

pub fn orchestrator(
    ledger: &Arc<InMemoryLedger>,
) -> (DeploymentOrchestrator<InMemoryLedger, FixtureCompiler>, Arc<MemorySink>) {
    let (pipeline, sink) = pipeline(ledger);
    (
        DeploymentOrchestrator::new(pipeline, FixtureCompiler, sink.clone()),
        sink,
    )
}

fn spec(entry_point: &str) -> ContractSpec {
    ContractSpec {
        source: ContractSource::new(format!("contract {entry_point} {{}}"), "."),
        entry_point: entry_point.to_string(),
    }
}

pub fn contract_sources() -> ContractSources {
    ContractSources {
        dao: spec("MecaDaoContract"),
        scheduler: spec("MecaSchedulerContract"),
        host: spec("MecaHostContract"),
        tower: spec("MecaTowerContract"),
        task: spec("MecaTaskContract"),
    }
}

pub fn plan(dao: &Account, scheduler_signer: &Account) -> DeploymentPlan {
    DeploymentPlan {
        dao: dao.clone(),
        scheduler_signer: scheduler_signer.clone(),
        contracts: contract_sources(),
        participants: Participants::default(),
    }
}

/// Source files for the default layout.
pub fn write_contracts(dir: &Path) {
    let layout = ContractLayout::default();
    for contract in [
        &layout.dao,
        &layout.scheduler,
        &layout.host,
        &layout.tower,
        &layout.task,
    ] {
        std::fs::write(
            dir.join(&contract.file),
            format!("contract {} {{}}", contract.entry_point),
        )
        .expect("write contract source");
    }
}

/// Accounts file in the legacy layout, one key per role.
pub fn write_accounts(path: &Path, accounts: &[(&str, &Account)]) {
    let entries: serde_json::Map<String, serde_json::Value> = accounts
        .iter()
        .map(|(name, account)| {
            (
                name.to_string(),
                serde_json::json!({
                    "private_key": account.secret().to_hex(),
                    "account_address": format_address(&account.address()),
                    "balance": 1000,
                }),
            )
        })
        .collect();
    std::fs::write(path, serde_json::Value::Object(entries).to_string())
        .expect("write accounts file");
}

/// A runtime rooted in a temporary directory.
pub struct RuntimeFixture {
    pub dir: TempDir,
    pub ledger: Arc<InMemoryLedger>,
    pub sink: Arc<MemorySink>,
    pub runtime: DeployRuntime<InMemoryLedger, FixtureCompiler>,
}

pub const DAO_KEY: u8 = 1;
pub const TOWER_KEY: u8 = 2;
pub const HOST_KEY: u8 = 3;
pub const TASK_KEY: u8 = 4;

impl RuntimeFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        write_contracts(dir.path());

        let dao = account(DAO_KEY);
        let tower = account(TOWER_KEY);
        let host = account(HOST_KEY);
        let task = account(TASK_KEY);

        let accounts_file = dir.path().join("accounts.json");
        write_accounts(
            &accounts_file,
            &[
                ("meca_dao", &dao),
                ("meca_tower", &tower),
                ("meca_host", &host),
                ("meca_task", &task),
                ("meca_user", &account(5)),
            ],
        );

        let config = DeployConfig {
            accounts_file: accounts_file.clone(),
            contracts_dir: dir.path().to_path_buf(),
            output_file: dir.path().join("contracts.json"),
            receipt_timeout: Duration::from_millis(200),
            poll_interval: Duration::from_millis(5),
            ..DeployConfig::default()
        };
        let accounts = AccountStore::load(&accounts_file).expect("load accounts");

        let ledger = funded_ledger(&[&dao, &tower, &host, &task]);
        let sink = Arc::new(MemorySink::new());
        let runtime = DeployRuntime::new(
            config,
            accounts,
            Arc::clone(&ledger),
            FixtureCompiler,
            sink.clone(),
        );

        Self {
            dir,
            ledger,
            sink,
            runtime,
        }
    }
}

impl Default for RuntimeFixture {
    fn default() -> Self {
        Self::new()
    }
}
