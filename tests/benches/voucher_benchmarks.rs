//! # Voucher Benchmarks
//!
//! | Operation | Work per call |
//! |-----------|---------------|
//! | Signing hash | 4 keccak256 over the domain and voucher |
//! | Issue | Signing hash + secp256k1 sign |
//! | Verify | Signing hash + public key recovery |
//! | Batch verify | Parallel recovery over rayon |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;
use tokio::runtime::Runtime;

use sbt_lazy_mint::domain::eip712::voucher_typed_data;
use sbt_lazy_mint::test_utils::{deterministic_signer_on, new_york_metadata};
use sbt_lazy_mint::{
    Address, LazyMintApi, LazyMintConfig, LazyMintService, LazyMintVoucher, LocalKeySigner, U256,
};

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn service() -> LazyMintService<LocalKeySigner> {
    LazyMintService::new(
        deterministic_signer_on(1, 1),
        LazyMintConfig::for_testing().verifying_contract,
    )
}

fn issue_many(
    rt: &Runtime,
    service: &LazyMintService<LocalKeySigner>,
    n: u64,
) -> Vec<LazyMintVoucher> {
    let minter = service.signer().account();
    rt.block_on(async {
        let mut vouchers = Vec::with_capacity(n as usize);
        for id in 0..n {
            vouchers.push(
                service
                    .create_voucher(U256::from(id), minter, new_york_metadata())
                    .await
                    .unwrap(),
            );
        }
        vouchers
    })
}

fn bench_signing_hash(c: &mut Criterion) {
    let domain = LazyMintConfig::for_testing().domain(1);
    let minter = Address([0x42; 20]);
    let metadata = new_york_metadata();

    c.bench_function("eip712_signing_hash", |b| {
        b.iter(|| {
            let data = voucher_typed_data(domain.clone(), U256::from(42u64), minter, &metadata);
            black_box(data.signing_hash().unwrap())
        })
    });
}

fn bench_issue_and_verify(c: &mut Criterion) {
    let rt = runtime();
    let service = service();
    let minter = service.signer().account();

    let mut group = c.benchmark_group("voucher");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("create_voucher", |b| {
        b.iter(|| {
            rt.block_on(service.create_voucher(U256::from(42u64), minter, new_york_metadata()))
                .unwrap()
        })
    });

    let voucher = issue_many(&rt, &service, 1).remove(0);
    group.bench_function("verify_voucher", |b| {
        b.iter(|| black_box(rt.block_on(service.verify_voucher(&voucher))))
    });

    group.finish();
}

fn bench_verify_batch(c: &mut Criterion) {
    let rt = runtime();
    let service = service();

    let mut group = c.benchmark_group("voucher_batch");
    for size in [10u64, 100, 500] {
        let vouchers = issue_many(&rt, &service, size);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(
            BenchmarkId::new("verify_batch", size),
            &vouchers,
            |b, vouchers| b.iter(|| black_box(rt.block_on(service.verify_batch(vouchers)).valid_count)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_signing_hash, bench_issue_and_verify, bench_verify_batch);
criterion_main!(benches);
