//! # Deployment Orchestrator
//!
//! Sequences the MECA contract deployment as dependent pipeline steps:
//!
//! ```text
//! DAO -> Scheduler -> DAO.setSchedulerContract(Scheduler)
//!     -> for kind in [Host, Tower, Task]: deploy kind contract, Scheduler.set<Kind>Contract(addr)
//!     -> participant registrations (per signer in order, signers concurrently)
//! ```
//!
//! A step only runs once every step it depends on has a successful receipt.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use md_04_transaction_pipeline::{
    LedgerClient, TransactionPayload, TransactionPipeline, TransactionTarget,
};
use shared_types::{
    format_address, Account, Address, DiagnosticEvent, DiagnosticsSink, TransactionReceipt,
};
use tracing::{debug, info};

use crate::domain::abi::AbiValue;
use crate::domain::contract::{CompiledContract, ContractHandle};
use crate::domain::errors::DeploymentError;
use crate::domain::kinds::ContractKind;
use crate::domain::plan::{
    ContractSpec, DeployedContracts, DeploymentPlan, DeploymentStep, Participants,
};
use crate::domain::registration::{HostRegistration, TaskRegistration, TowerRegistration};
use crate::ports::outbound::Compiler;

const SET_SCHEDULER: &str = "setSchedulerContract";

enum Registration<'a> {
    Tower(&'a TowerRegistration),
    Host(&'a HostRegistration),
    Task(&'a TaskRegistration),
}

fn enqueue<'a>(
    groups: &mut Vec<(&'a Account, Vec<Registration<'a>>)>,
    signer: &'a Account,
    registration: Registration<'a>,
) {
    match groups
        .iter_mut()
        .find(|(existing, _)| existing.address() == signer.address())
    {
        Some((_, queue)) => queue.push(registration),
        None => groups.push((signer, vec![registration])),
    }
}

/// Drives deployment and registration through a shared `TransactionPipeline`.
pub struct DeploymentOrchestrator<L: LedgerClient, C: Compiler> {
    pipeline: Arc<TransactionPipeline<L>>,
    compiler: C,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl<L: LedgerClient, C: Compiler> DeploymentOrchestrator<L, C> {
    pub fn new(
        pipeline: Arc<TransactionPipeline<L>>,
        compiler: C,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            pipeline,
            compiler,
            diagnostics,
        }
    }

    /// Deploy and wire the full contract set, then register any participants.
    ///
    /// # Errors
    /// The first failing step, as `Step`, `StepReverted`, `Abi`, `Compiler`
    /// or `MissingContractAddress`. Nothing after it is attempted.
    pub async fn run(&self, plan: &DeploymentPlan) -> Result<DeployedContracts, DeploymentError> {
        let dao = self
            .deploy(DeploymentStep::DeployDao, &plan.dao, &plan.contracts.dao)
            .await?;
        let scheduler = self
            .deploy(
                DeploymentStep::DeployScheduler,
                &plan.scheduler_signer,
                &plan.contracts.scheduler,
            )
            .await?;

        self.call(
            DeploymentStep::SetSchedulerOnDao,
            &plan.dao,
            &dao,
            SET_SCHEDULER,
            &[AbiValue::Address(scheduler.address())],
        )
        .await?;

        let host = self
            .deploy_slot(ContractKind::Host, plan, &scheduler)
            .await?;
        let tower = self
            .deploy_slot(ContractKind::Tower, plan, &scheduler)
            .await?;
        let task = self
            .deploy_slot(ContractKind::Task, plan, &scheduler)
            .await?;

        let contracts = DeployedContracts {
            dao,
            scheduler,
            host,
            tower,
            task,
        };

        for (name, address) in contracts.addresses() {
            info!(contract = name, address = %format_address(&address), "Contract deployed");
        }

        if plan.participants.is_empty() {
            debug!("No participants to register");
        } else {
            info!(registrations = plan.participants.len(), "Registering participants");
            self.register_participants(&contracts, &plan.participants)
                .await?;
        }
        Ok(contracts)
    }

    async fn deploy_slot(
        &self,
        kind: ContractKind,
        plan: &DeploymentPlan,
        scheduler: &ContractHandle,
    ) -> Result<ContractHandle, DeploymentError> {
        let contract = self
            .deploy(
                DeploymentStep::DeployContract(kind),
                &plan.scheduler_signer,
                plan.contracts.for_kind(kind),
            )
            .await?;
        self.register_contract(&plan.scheduler_signer, scheduler, kind, contract.address())
            .await?;
        Ok(contract)
    }

    /// Compile a contract without deploying it.
    pub async fn compile(
        &self,
        step: DeploymentStep,
        spec: &ContractSpec,
    ) -> Result<CompiledContract, DeploymentError> {
        self.compiler
            .compile(&spec.source, &spec.entry_point)
            .await
            .map_err(|source| DeploymentError::Compiler { step, source })
    }

    /// Compile and deploy one contract (no constructor arguments).
    pub async fn deploy(
        &self,
        step: DeploymentStep,
        signer: &Account,
        spec: &ContractSpec,
    ) -> Result<ContractHandle, DeploymentError> {
        self.tracked(step, async {
            let compiled = self.compile(step, spec).await?;
            let init_code = compiled
                .init_code(&[])
                .map_err(|source| DeploymentError::Abi { step, source })?;

            let receipt = self
                .execute(step, signer, TransactionTarget::Deploy, init_code)
                .await?;
            let address = receipt
                .contract_address
                .ok_or(DeploymentError::MissingContractAddress { step })?;

            Ok(compiled.deployed(address))
        })
        .await
    }

    /// Point the Scheduler's `kind` slot at `contract`.
    pub async fn register_contract(
        &self,
        signer: &Account,
        scheduler: &ContractHandle,
        kind: ContractKind,
        contract: Address,
    ) -> Result<TransactionReceipt, DeploymentError> {
        self.call(
            DeploymentStep::RegisterContract(kind),
            signer,
            scheduler,
            kind.scheduler_setter(),
            &[AbiValue::Address(contract)],
        )
        .await
    }

    /// `register_contract` for a raw contract-type tag.
    ///
    /// # Errors
    /// * `DeploymentError::InvalidContractType` - tag outside 0..=2, before
    ///   any ledger interaction
    pub async fn register_contract_tag(
        &self,
        signer: &Account,
        scheduler: &ContractHandle,
        tag: u8,
        contract: Address,
    ) -> Result<TransactionReceipt, DeploymentError> {
        let kind = ContractKind::try_from(tag)?;
        self.register_contract(signer, scheduler, kind, contract)
            .await
    }

    pub async fn register_tower(
        &self,
        signer: &Account,
        tower: &ContractHandle,
        registration: &TowerRegistration,
    ) -> Result<TransactionReceipt, DeploymentError> {
        self.call(
            DeploymentStep::RegisterTower,
            signer,
            tower,
            TowerRegistration::METHOD,
            &registration.arguments(),
        )
        .await
    }

    pub async fn register_host(
        &self,
        signer: &Account,
        host: &ContractHandle,
        registration: &HostRegistration,
    ) -> Result<TransactionReceipt, DeploymentError> {
        self.call(
            DeploymentStep::RegisterHost,
            signer,
            host,
            HostRegistration::METHOD,
            &registration.arguments(),
        )
        .await
    }

    pub async fn add_task(
        &self,
        signer: &Account,
        task: &ContractHandle,
        registration: &TaskRegistration,
    ) -> Result<TransactionReceipt, DeploymentError> {
        self.call(
            DeploymentStep::AddTask,
            signer,
            task,
            TaskRegistration::METHOD,
            &registration.arguments(),
        )
        .await
    }

    /// Registrations sharing a signer run in order; different signers run
    /// concurrently. Returns the first failure in plan order.
    pub async fn register_participants(
        &self,
        contracts: &DeployedContracts,
        participants: &Participants,
    ) -> Result<(), DeploymentError> {
        let mut groups: Vec<(&Account, Vec<Registration<'_>>)> = Vec::new();
        for (signer, registration) in &participants.towers {
            enqueue(&mut groups, signer, Registration::Tower(registration));
        }
        for (signer, registration) in &participants.hosts {
            enqueue(&mut groups, signer, Registration::Host(registration));
        }
        for (signer, registration) in &participants.tasks {
            enqueue(&mut groups, signer, Registration::Task(registration));
        }

        let runs = groups.into_iter().map(|(signer, queue)| async move {
            for registration in queue {
                match registration {
                    Registration::Tower(r) => self.register_tower(signer, &contracts.tower, r).await?,
                    Registration::Host(r) => self.register_host(signer, &contracts.host, r).await?,
                    Registration::Task(r) => self.add_task(signer, &contracts.task, r).await?,
                };
            }
            Ok::<(), DeploymentError>(())
        });

        join_all(runs).await.into_iter().collect()
    }

    async fn call(
        &self,
        step: DeploymentStep,
        signer: &Account,
        contract: &ContractHandle,
        method: &str,
        args: &[AbiValue],
    ) -> Result<TransactionReceipt, DeploymentError> {
        self.tracked(step, async {
            let calldata = contract
                .encode_call(method, args)
                .map_err(|source| DeploymentError::Abi { step, source })?;
            self.execute(
                step,
                signer,
                TransactionTarget::Call {
                    contract: contract.address(),
                },
                calldata,
            )
            .await
        })
        .await
    }

    async fn execute(
        &self,
        step: DeploymentStep,
        signer: &Account,
        target: TransactionTarget,
        data: Vec<u8>,
    ) -> Result<TransactionReceipt, DeploymentError> {
        let receipt = self
            .pipeline
            .submit(signer, target, TransactionPayload::new(data))
            .await
            .map_err(|source| DeploymentError::Step { step, source })?;

        if !receipt.success {
            return Err(DeploymentError::StepReverted {
                step,
                transaction_hash: receipt.transaction_hash,
            });
        }

        self.diagnostics.record(&DiagnosticEvent::StepCompleted {
            step: step.to_string(),
            transaction_hash: receipt.transaction_hash,
        });
        Ok(receipt)
    }

    async fn tracked<T>(
        &self,
        step: DeploymentStep,
        work: impl Future<Output = Result<T, DeploymentError>>,
    ) -> Result<T, DeploymentError> {
        self.diagnostics.record(&DiagnosticEvent::StepStarted {
            step: step.to_string(),
        });

        let result = work.await;
        if let Err(err) = &result {
            self.diagnostics.record(&DiagnosticEvent::StepFailed {
                step: step.to_string(),
                reason: err.to_string(),
            });
        }
        result
    }
}
