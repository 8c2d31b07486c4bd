//! # Pipeline Flow
//!
//! `TransactionPipeline` against the in-memory ledger: nonce uniqueness under
//! concurrency, the preflight boundary, and receipt timeouts.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use futures::future::join_all;
    use md_04_transaction_pipeline::{
        PipelineError, TransactionPayload, TransactionPipeline, TransactionTarget,
    };
    use shared_types::{DiagnosticEvent, MemorySink, U256};

    use crate::fixtures::{account, fast_pipeline_config, funded_ledger, pipeline, InMemoryLedger};

    fn call_payload() -> TransactionPayload {
        TransactionPayload::new(vec![0xde, 0xad, 0xbe, 0xef])
    }

    #[tokio::test]
    async fn test_identical_submissions_are_distinct_transactions() {
        let sender = account(7);
        let ledger = funded_ledger(&[&sender]);
        let (pipeline, _) = pipeline(&ledger);

        let first = pipeline
            .submit(&sender, TransactionTarget::Deploy, call_payload())
            .await
            .unwrap();
        let second = pipeline
            .submit(&sender, TransactionTarget::Deploy, call_payload())
            .await
            .unwrap();

        assert_ne!(first.transaction_hash, second.transaction_hash);
        assert_ne!(first.contract_address, second.contract_address);

        let sent = ledger.transactions_from(&sender.address());
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].nonce, 0);
        assert_eq!(sent[1].nonce, 1);
        assert_eq!(sent[0].data, sent[1].data);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_get_unique_nonces() {
        let sender = account(8);
        let ledger = funded_ledger(&[&sender]);
        let (pipeline, _) = pipeline(&ledger);
        let target = [0x42; 20];

        let submissions = (0..16).map(|_| {
            let pipeline = Arc::clone(&pipeline);
            let sender = sender.clone();
            tokio::spawn(async move {
                pipeline
                    .submit(
                        &sender,
                        TransactionTarget::Call { contract: target },
                        call_payload(),
                    )
                    .await
            })
        });

        for result in join_all(submissions).await {
            result.unwrap().unwrap();
        }

        let nonces: BTreeSet<u64> = ledger
            .transactions_from(&sender.address())
            .iter()
            .map(|tx| tx.nonce)
            .collect();
        assert_eq!(nonces, (0..16).collect());
    }

    #[tokio::test]
    async fn test_preflight_boundary() {
        let ledger = Arc::new(InMemoryLedger::default().with_gas(30_000, U256::from(2u64)));
        // (30_000 + 100_000) * 2
        let required = U256::from(260_000u64);

        let exact = account(9);
        let short = account(10);
        ledger.fund(exact.address(), required);
        ledger.fund(short.address(), required - 1);

        let (pipeline, _) = pipeline(&ledger);

        let receipt = pipeline
            .submit(&exact, TransactionTarget::Deploy, call_payload())
            .await
            .unwrap();
        assert!(receipt.success);
        assert_eq!(ledger.transactions_from(&exact.address())[0].gas_limit, 130_000);

        let err = pipeline
            .submit(&short, TransactionTarget::Deploy, call_payload())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::InsufficientBalance {
                required,
                available: required - 1,
            }
        );
        assert!(ledger.transactions_from(&short.address()).is_empty());
        assert_eq!(pipeline.sequencer().peek(&short.address()).await, None);
    }

    #[tokio::test]
    async fn test_timeout_then_recover_by_hash() {
        let sender = account(11);
        let ledger = funded_ledger(&[&sender]);
        let (pipeline, _) = pipeline(&ledger);

        ledger.withhold_receipts();
        let err = pipeline
            .submit(&sender, TransactionTarget::Deploy, call_payload())
            .await
            .unwrap_err();

        let hash = match &err {
            PipelineError::ConfirmationTimeout {
                transaction_hash, ..
            } => *transaction_hash,
            other => panic!("expected timeout, got {other}"),
        };
        assert!(err.is_retryable());
        assert_eq!(ledger.transactions().len(), 1);

        ledger.release_receipts();
        let receipt = pipeline.await_receipt(&hash).await.unwrap();
        assert!(receipt.success);
        assert!(receipt.contract_address.is_some());

        // The timed-out transaction kept its nonce
        pipeline
            .submit(&sender, TransactionTarget::Deploy, call_payload())
            .await
            .unwrap();
        assert_eq!(ledger.transactions_from(&sender.address())[1].nonce, 1);
    }

    #[tokio::test]
    async fn test_configured_chain_id_must_match_ledger() {
        let sender = account(12);
        let ledger = funded_ledger(&[&sender]);
        let mut config = fast_pipeline_config();
        config.chain_id = Some(1);
        let pipeline = TransactionPipeline::new(
            Arc::clone(&ledger),
            config,
            Arc::new(MemorySink::new()),
        );

        let err = pipeline
            .submit(&sender, TransactionTarget::Deploy, call_payload())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::SubmissionRejected { nonce: 0, .. }));
        assert!(ledger.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_diagnostics_follow_pipeline_order() {
        let sender = account(13);
        let ledger = funded_ledger(&[&sender]);
        let (pipeline, sink) = pipeline(&ledger);

        pipeline
            .submit(&sender, TransactionTarget::Deploy, call_payload())
            .await
            .unwrap();

        let kinds: Vec<&str> = sink
            .events()
            .iter()
            .map(|event| match event {
                DiagnosticEvent::GasEstimated { .. } => "estimated",
                DiagnosticEvent::PreflightPassed { .. } => "preflight",
                DiagnosticEvent::NonceReserved { .. } => "nonce",
                DiagnosticEvent::TransactionSubmitted { .. } => "submitted",
                DiagnosticEvent::ReceiptObserved { .. } => "receipt",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["estimated", "preflight", "nonce", "submitted", "receipt"]);
    }
}
