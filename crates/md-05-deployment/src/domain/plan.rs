//! # Deployment Plan
//!
//! What `DeploymentOrchestrator::run` deploys, who signs each step, and the
//! steps a failure can be attributed to.

use std::fmt;

use shared_types::{Account, Address};

use super::contract::ContractHandle;
use super::kinds::ContractKind;
use super::registration::{HostRegistration, TaskRegistration, TowerRegistration};
use crate::ports::outbound::ContractSource;

/// One ledger-visible step of the deployment chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentStep {
    DeployDao,
    DeployScheduler,
    SetSchedulerOnDao,
    DeployContract(ContractKind),
    RegisterContract(ContractKind),
    RegisterTower,
    RegisterHost,
    AddTask,
}

impl fmt::Display for DeploymentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentStep::DeployDao => f.write_str("deploy-dao"),
            DeploymentStep::DeployScheduler => f.write_str("deploy-scheduler"),
            DeploymentStep::SetSchedulerOnDao => f.write_str("set-scheduler-on-dao"),
            DeploymentStep::DeployContract(kind) => write!(f, "deploy-{kind}-contract"),
            DeploymentStep::RegisterContract(kind) => write!(f, "register-{kind}-contract"),
            DeploymentStep::RegisterTower => f.write_str("register-tower"),
            DeploymentStep::RegisterHost => f.write_str("register-host"),
            DeploymentStep::AddTask => f.write_str("add-task"),
        }
    }
}

/// A source file and the contract in it to deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSpec {
    pub source: ContractSource,
    pub entry_point: String,
}

/// Sources for the five contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSources {
    pub dao: ContractSpec,
    pub scheduler: ContractSpec,
    pub host: ContractSpec,
    pub tower: ContractSpec,
    pub task: ContractSpec,
}

impl ContractSources {
    pub fn for_kind(&self, kind: ContractKind) -> &ContractSpec {
        match kind {
            ContractKind::Host => &self.host,
            ContractKind::Tower => &self.tower,
            ContractKind::Task => &self.task,
        }
    }
}

/// Participant registrations, each with its signer. Any number of towers,
/// hosts and tasks may be registered in one run.
#[derive(Debug, Clone, Default)]
pub struct Participants {
    pub towers: Vec<(Account, TowerRegistration)>,
    pub hosts: Vec<(Account, HostRegistration)>,
    pub tasks: Vec<(Account, TaskRegistration)>,
}

impl Participants {
    pub fn is_empty(&self) -> bool {
        self.towers.is_empty() && self.hosts.is_empty() && self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.towers.len() + self.hosts.len() + self.tasks.len()
    }
}

/// Input to `DeploymentOrchestrator::run`.
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    /// Deploys the DAO and points it at the Scheduler.
    pub dao: Account,
    /// Deploys the Scheduler and the Host/Tower/Task contracts and registers them.
    pub scheduler_signer: Account,
    pub contracts: ContractSources,
    pub participants: Participants,
}

/// Every contract of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContracts {
    pub dao: ContractHandle,
    pub scheduler: ContractHandle,
    pub host: ContractHandle,
    pub tower: ContractHandle,
    pub task: ContractHandle,
}

impl DeployedContracts {
    /// `(name, address)` pairs in deployment order.
    pub fn addresses(&self) -> [(&'static str, Address); 5] {
        [
            ("dao", self.dao.address()),
            ("scheduler", self.scheduler.address()),
            ("host", self.host.address()),
            ("tower", self.tower.address()),
            ("task", self.task.address()),
        ]
    }
}
