//! # Deployment Flow
//!
//! The DAO -> Scheduler -> Host/Tower/Task chain against the in-memory
//! ledger, checked through the values the contracts end up storing.

#[cfg(test)]
mod tests {
    use md_04_transaction_pipeline::PipelineError;
    use md_05_deployment::{ContractKind, DeploymentError, DeploymentStep};
    use shared_types::{DiagnosticEvent, U256};

    use crate::fixtures::compiler::bytecode;
    use crate::fixtures::{
        account, contract_sources, create_address, funded_ledger, orchestrator, plan,
        InMemoryLedger,
    };

    #[tokio::test]
    async fn test_single_signer_wires_every_contract() {
        let dao = account(1);
        let ledger = funded_ledger(&[&dao]);
        let (orchestrator, _) = orchestrator(&ledger);

        let contracts = orchestrator.run(&plan(&dao, &dao)).await.unwrap();

        // create, create, set, then create + register per slot
        let d = create_address(&dao.address(), 0);
        let s = create_address(&dao.address(), 1);
        let h = create_address(&dao.address(), 3);
        let t = create_address(&dao.address(), 5);
        let k = create_address(&dao.address(), 7);
        assert_eq!(contracts.dao.address(), d);
        assert_eq!(contracts.scheduler.address(), s);
        assert_eq!(contracts.host.address(), h);
        assert_eq!(contracts.tower.address(), t);
        assert_eq!(contracts.task.address(), k);

        assert_eq!(ledger.stored_address(&d, "setSchedulerContract"), Some(s));
        assert_eq!(ledger.stored_address(&s, "setHostContract"), Some(h));
        assert_eq!(ledger.stored_address(&s, "setTowerContract"), Some(t));
        assert_eq!(ledger.stored_address(&s, "setTaskContract"), Some(k));

        assert_eq!(ledger.code(&h), Some(bytecode("MecaHostContract")));
        let nonces: Vec<u64> = ledger.transactions().iter().map(|tx| tx.nonce).collect();
        assert_eq!(nonces, (0..9).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_separate_scheduler_signer() {
        let dao = account(1);
        let operator = account(2);
        let ledger = funded_ledger(&[&dao, &operator]);
        let (orchestrator, _) = orchestrator(&ledger);

        let contracts = orchestrator.run(&plan(&dao, &operator)).await.unwrap();

        let dao_txs = ledger.transactions_from(&dao.address());
        assert_eq!(dao_txs.len(), 2);
        assert_eq!(dao_txs[1].to, Some(contracts.dao.address()));

        assert_eq!(
            contracts.scheduler.address(),
            create_address(&operator.address(), 0)
        );
        assert_eq!(ledger.transactions_from(&operator.address()).len(), 7);
        assert_eq!(
            ledger.stored_address(&contracts.dao.address(), "setSchedulerContract"),
            Some(contracts.scheduler.address())
        );
    }

    #[tokio::test]
    async fn test_host_registered_alone_leaves_other_slots_unset() {
        let signer = account(3);
        let ledger = funded_ledger(&[&signer]);
        let (orchestrator, _) = orchestrator(&ledger);
        let sources = contract_sources();

        let scheduler = orchestrator
            .deploy(DeploymentStep::DeployScheduler, &signer, &sources.scheduler)
            .await
            .unwrap();
        let host = orchestrator
            .deploy(
                DeploymentStep::DeployContract(ContractKind::Host),
                &signer,
                &sources.host,
            )
            .await
            .unwrap();
        orchestrator
            .register_contract(&signer, &scheduler, ContractKind::Host, host.address())
            .await
            .unwrap();

        let s = scheduler.address();
        assert_eq!(ledger.stored_address(&s, "setHostContract"), Some(host.address()));
        assert_eq!(ledger.stored_address(&s, "setTowerContract"), None);
        assert_eq!(ledger.stored_address(&s, "setTaskContract"), None);
    }

    #[tokio::test]
    async fn test_reverted_registration_halts_the_chain() {
        let dao = account(1);
        let ledger = funded_ledger(&[&dao]);
        ledger.revert_on("setHostContract(address)");
        let (orchestrator, sink) = orchestrator(&ledger);

        let err = orchestrator.run(&plan(&dao, &dao)).await.unwrap_err();

        assert_eq!(
            err.step(),
            Some(DeploymentStep::RegisterContract(ContractKind::Host))
        );
        assert!(matches!(err, DeploymentError::StepReverted { .. }));
        // DAO, Scheduler, setScheduler, Host, reverted setHost; no Tower
        assert_eq!(ledger.transactions().len(), 5);
        assert!(!ledger.is_contract(&create_address(&dao.address(), 5)));

        let failed: Vec<String> = sink
            .events()
            .into_iter()
            .filter_map(|e| match e {
                DiagnosticEvent::StepFailed { step, .. } => Some(step),
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec!["register-host-contract"]);
    }

    #[tokio::test]
    async fn test_unfunded_scheduler_signer_stops_before_submission() {
        let dao = account(1);
        let operator = account(2);
        let ledger = funded_ledger(&[&dao]);
        let (orchestrator, _) = orchestrator(&ledger);

        let err = orchestrator.run(&plan(&dao, &operator)).await.unwrap_err();

        match err {
            DeploymentError::Step {
                step: DeploymentStep::DeployScheduler,
                source: PipelineError::InsufficientBalance { available, .. },
            } => assert_eq!(available, U256::zero()),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ledger.transactions().len(), 1);
        assert!(ledger.transactions_from(&operator.address()).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_contract_type_tag() {
        let signer = account(3);
        let ledger = funded_ledger(&[&signer]);
        let (orchestrator, _) = orchestrator(&ledger);
        let scheduler = orchestrator
            .deploy(
                DeploymentStep::DeployScheduler,
                &signer,
                &contract_sources().scheduler,
            )
            .await
            .unwrap();

        let err = orchestrator
            .register_contract_tag(&signer, &scheduler, 3, [0x11; 20])
            .await
            .unwrap_err();

        assert_eq!(err, DeploymentError::InvalidContractType(3));
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_chain_id_comes_from_ledger() {
        let dao = account(1);
        let ledger = std::sync::Arc::new(InMemoryLedger::new(5));
        ledger.fund(dao.address(), U256::from(crate::fixtures::FUNDING));
        let (orchestrator, _) = orchestrator(&ledger);

        let contracts = orchestrator.run(&plan(&dao, &dao)).await.unwrap();
        assert!(ledger.is_contract(&contracts.task.address()));
    }
}
