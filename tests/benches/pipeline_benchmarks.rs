//! # Pipeline Benchmarks
//!
//! The CPU-bound steps of one ledger operation:
//!
//! | Crate | Step |
//! |-------|------|
//! | md-01 Content Identifier | parse base16 and CIDv0 |
//! | md-04 Transaction Pipeline | EIP-155 sign, decode + recover |
//! | md-05 Deployment | ABI call encoding |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use md_04_transaction_pipeline::{decode_signed_transaction, PendingTransaction};
use md_05_deployment::{selector, AbiType, AbiValue, InterfaceDescriptor};
use shared_types::{Account, U256};
use std::time::Duration;

fn account() -> Account {
    Account::from_private_key(&format!("{:064x}", 0x4242u64)).expect("valid key")
}

fn pending(account: &Account, payload_len: usize) -> PendingTransaction {
    PendingTransaction {
        sender: account.address(),
        nonce: 7,
        gas_limit: 150_000,
        gas_price: U256::from(1_000_000_000u64),
        to: Some([0x11; 20]),
        value: U256::zero(),
        payload: vec![0xab; payload_len],
        chain_id: 1337,
    }
}

fn bench_content_identifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("md-01-content-identifier");

    let base16 = format!("f01701220{}", "ab".repeat(32));
    let mut multihash = vec![0x12, 0x20];
    multihash.extend_from_slice(&[0xab; 32]);
    let v0 = bs58::encode(multihash).into_string();

    group.bench_function("parse_base16", |b| {
        b.iter(|| black_box(md_01_content_identifier::parse(black_box(&base16)).is_ok()))
    });
    group.bench_function("parse_v0", |b| {
        b.iter(|| black_box(md_01_content_identifier::parse(black_box(&v0)).is_ok()))
    });

    group.finish();
}

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("md-04-transaction-pipeline");
    group.measurement_time(Duration::from_secs(5));

    let account = account();

    for size in [0usize, 256, 4096] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("sign", size), &size, |b, &size| {
            b.iter_batched(
                || pending(&account, size),
                |tx| black_box(tx.sign(account.secret()).is_ok()),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    let signed = pending(&account, 256)
        .sign(account.secret())
        .expect("sign fixture");
    group.bench_function("decode_and_recover", |b| {
        b.iter(|| black_box(decode_signed_transaction(black_box(signed.raw())).is_ok()))
    });

    group.finish();
}

fn bench_abi_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("md-05-deployment");

    let abi = serde_json::json!([{
        "type": "function",
        "name": "registerTower",
        "inputs": [
            { "type": "uint256" }, { "type": "string" }, { "type": "uint256" }, { "type": "uint8" }
        ]
    }]);
    let interface = InterfaceDescriptor::from_json_abi(&abi).expect("fixture abi");
    let args = vec![
        AbiValue::from(4096u64),
        AbiValue::String("tower.meca.test:7777".into()),
        AbiValue::from(25u64),
        AbiValue::from(1u64),
    ];

    group.bench_function("selector", |b| {
        b.iter(|| black_box(selector(black_box("registerTower(uint256,string,uint256,uint8)"))))
    });
    group.bench_function("encode_register_tower", |b| {
        b.iter(|| black_box(interface.encode_call("registerTower", &args).is_ok()))
    });
    group.bench_function("parse_type", |b| {
        b.iter(|| black_box(AbiType::parse(black_box("bytes32"))))
    });

    group.finish();
}

criterion_group!(benches, bench_content_identifier, bench_signing, bench_abi_encoding);
criterion_main!(benches);
