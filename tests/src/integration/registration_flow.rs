//! # Registration Flow
//!
//! Participant registration after deployment, and the content identifier
//! checks that gate task registration.

#[cfg(test)]
mod tests {
    use md_01_content_identifier::CidError;
    use md_05_deployment::{
        ComputingType, DeploymentError, FeeType, HostRegistration, Participants, PublicKeyType,
        TaskRegistration, TowerRegistration,
    };
    use shared_types::U256;

    use crate::fixtures::{account, funded_ledger, orchestrator, plan};

    fn tower_registration() -> TowerRegistration {
        TowerRegistration {
            size_limit: 4096,
            public_connection: "tower.meca.test:7777".into(),
            fee: U256::from(25u64),
            fee_type: FeeType::Linear,
        }
    }

    fn host_registration() -> HostRegistration {
        HostRegistration {
            public_key: vec![0x04; 65],
            public_key_type: PublicKeyType::Ecdsa,
            block_timeout_limit: 12,
        }
    }

    fn zero_digest_v0() -> String {
        let mut multihash = vec![0x12, 0x20];
        multihash.extend_from_slice(&[0u8; 32]);
        bs58::encode(multihash).into_string()
    }

    fn word(value: u64) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        word
    }

    #[tokio::test]
    async fn test_participants_registered_on_their_contracts() {
        let dao = account(1);
        let tower_operator = account(2);
        let host_operator = account(3);
        let developer = account(4);
        let ledger = funded_ledger(&[&dao, &tower_operator, &host_operator, &developer]);
        let (orchestrator, _) = orchestrator(&ledger);

        let identifier = md_01_content_identifier::parse(&zero_digest_v0()).unwrap();
        let mut plan = plan(&dao, &dao);
        plan.participants = Participants {
            towers: vec![(tower_operator.clone(), tower_registration())],
            hosts: vec![(host_operator.clone(), host_registration())],
            tasks: vec![(
                developer.clone(),
                TaskRegistration {
                    identifier,
                    fee: U256::from(3u64),
                    computing_type: ComputingType::Sgx,
                    size: 512,
                },
            )],
        };

        let contracts = orchestrator.run(&plan).await.unwrap();

        let tower_args = ledger
            .stored_arguments(
                &contracts.tower.address(),
                "registerTower(uint256,string,uint256,uint8)",
            )
            .unwrap();
        assert_eq!(&tower_args[..32], &word(4096));
        assert_eq!(&tower_args[96..128], &word(1));

        let host_args = ledger
            .stored_arguments(&contracts.host.address(), "registerHost(bytes,uint8,uint256)")
            .unwrap();
        assert_eq!(&host_args[32..64], &word(1));
        assert_eq!(&host_args[64..96], &word(12));

        let task_args = ledger
            .stored_arguments(
                &contracts.task.address(),
                "addTask(bytes32,uint256,uint8,uint256)",
            )
            .unwrap();
        assert_eq!(task_args.len(), 4 * 32);
        assert_eq!(&task_args[..32], &[0u8; 32]);
        assert_eq!(&task_args[64..96], &word(2));

        for participant in [&tower_operator, &host_operator, &developer] {
            let sent = ledger.transactions_from(&participant.address());
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].nonce, 0);
        }
    }

    #[tokio::test]
    async fn test_shared_signer_registers_in_sequence() {
        let dao = account(1);
        let operator = account(2);
        let ledger = funded_ledger(&[&dao, &operator]);
        let (orchestrator, _) = orchestrator(&ledger);

        let mut plan = plan(&dao, &dao);
        plan.participants.towers.push((operator.clone(), tower_registration()));
        plan.participants.hosts.push((operator.clone(), host_registration()));

        let contracts = orchestrator.run(&plan).await.unwrap();

        let sent = ledger.transactions_from(&operator.address());
        assert_eq!(sent.len(), 2);
        assert_eq!((sent[0].nonce, sent[0].to), (0, Some(contracts.tower.address())));
        assert_eq!((sent[1].nonce, sent[1].to), (1, Some(contracts.host.address())));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_hosts_register_from_their_own_signers() {
        let dao = account(1);
        let first = account(5);
        let second = account(6);
        let ledger = funded_ledger(&[&dao, &first, &second]);
        let (orchestrator, _) = orchestrator(&ledger);

        let mut plan = plan(&dao, &dao);
        for (signer, timeout) in [(&first, 10u64), (&first, 11), (&second, 20), (&second, 21)] {
            plan.participants.hosts.push((
                signer.clone(),
                HostRegistration {
                    block_timeout_limit: timeout,
                    ..host_registration()
                },
            ));
        }

        let contracts = orchestrator.run(&plan).await.unwrap();

        let host_selector = md_05_deployment::selector("registerHost(bytes,uint8,uint256)");
        for (signer, timeouts) in [(&first, [10u64, 11]), (&second, [20, 21])] {
            let sent = ledger.transactions_from(&signer.address());
            assert_eq!(sent.len(), 2);
            for (nonce, (tx, timeout)) in sent.iter().zip(timeouts).enumerate() {
                assert_eq!(tx.nonce, nonce as u64);
                assert_eq!(tx.to, Some(contracts.host.address()));
                assert_eq!(&tx.data[..4], &host_selector);
                // selector, key offset, key type, then the timeout word
                assert_eq!(&tx.data[4 + 64..4 + 96], &word(timeout));
            }
        }
    }

    #[tokio::test]
    async fn test_reverted_participant_reports_its_step() {
        let dao = account(1);
        let developer = account(4);
        let ledger = funded_ledger(&[&dao, &developer]);
        ledger.revert_on("addTask(bytes32,uint256,uint8,uint256)");
        let (orchestrator, _) = orchestrator(&ledger);

        let mut plan = plan(&dao, &dao);
        plan.participants.tasks.push((
            developer,
            TaskRegistration {
                identifier: md_01_content_identifier::parse(&zero_digest_v0()).unwrap(),
                fee: U256::one(),
                computing_type: ComputingType::Cpu,
                size: 1,
            },
        ));

        let err = orchestrator.run(&plan).await.unwrap_err();
        assert_eq!(err.step().map(|s| s.to_string()).as_deref(), Some("add-task"));
    }

    #[test]
    fn test_zero_digest_v0_identifier_is_accepted() {
        let identifier = md_01_content_identifier::parse(&zero_digest_v0()).unwrap();
        assert_eq!(identifier.digest(), &[0u8; 32]);
    }

    #[test]
    fn test_short_digest_never_becomes_a_registration() {
        let raw = format!("f01701220{}", "00".repeat(31));
        assert_eq!(
            md_01_content_identifier::parse(&raw).unwrap_err(),
            CidError::TruncatedOrOversizedDigest {
                expected: 32,
                actual: 31
            }
        );
    }

    #[test]
    fn test_unknown_tags_rejected() {
        assert!(matches!(
            FeeType::try_from(2),
            Err(DeploymentError::InvalidTag { tag: 2, .. })
        ));
        assert!(PublicKeyType::try_from(2).is_err());
        assert!(ComputingType::try_from(3).is_err());
    }
}
