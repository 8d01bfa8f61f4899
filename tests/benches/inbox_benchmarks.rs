//! # Anonymous Inbox Benchmarks
//!
//! | Path | Work per iteration |
//! |------|--------------------|
//! | Paying send | plan + apply one slot creation |
//! | Whitelisted send | plan + apply one slot reuse |
//! | Signed request | ed25519 verify + nonce check + dispatch |

use anon_inbox::{
    signing_bytes, Ed25519SignatureVerifier, Identity, InboxApi, InboxConfig, InboxRequest,
    InboxService, RequestHandler, SignedRequest,
};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ed25519_dalek::{Signer, SigningKey};
use std::sync::Arc;

const FUNDS: u64 = 1_000_000_000_000;

fn id(byte: u8) -> Identity {
    Identity::from_bytes([byte; 32])
}

fn funded_service(max_slots: u64) -> InboxService {
    let service = InboxService::new(InboxConfig::default().with_max_slots(max_slots));
    for byte in 1..=3 {
        service.credit_wallet(id(byte), FUNDS).unwrap();
    }
    service.initialize(id(1)).unwrap();
    service
}

fn bench_paying_send(c: &mut Criterion) {
    let mut group = c.benchmark_group("paying-send");

    for len in [12usize, 1_024, 10_196] {
        group.bench_with_input(BenchmarkId::new("send_regular_message", len), &len, |b, &len| {
            b.iter_batched(
                || funded_service(1),
                |service| {
                    black_box(
                        service
                            .send_regular_message(id(2), id(3), vec![7; len])
                            .unwrap(),
                    )
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_whitelisted_send(c: &mut Criterion) {
    let mut group = c.benchmark_group("whitelisted-send");

    group.bench_function("reuse_shrink", |b| {
        b.iter_batched(
            || {
                let service = funded_service(1);
                service.send_regular_message(id(2), id(3), vec![1; 256]).unwrap();
                service.add_to_whitelist(id(1), id(3)).unwrap();
                service
            },
            |service| {
                black_box(
                    service
                        .send_whitelisted_message(id(3), id(2), b"Hi!".to_vec())
                        .unwrap(),
                )
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_signed_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("signed-request");
    let key = SigningKey::from_bytes(&[9; 32]);
    let signer = Identity::from_bytes(key.verifying_key().to_bytes());

    group.bench_function("verify_and_dispatch", |b| {
        b.iter_batched(
            || {
                let service = InboxService::new(InboxConfig::default());
                service.credit_wallet(signer, FUNDS).unwrap();
                let request = InboxRequest::Initialize;
                let bytes = signing_bytes(&signer, 1, &request).unwrap();
                let signed = SignedRequest {
                    signer,
                    nonce: 1,
                    signature: key.sign(&bytes).to_bytes(),
                    request,
                };
                (
                    RequestHandler::new(Arc::new(service), Ed25519SignatureVerifier::new()),
                    signed,
                )
            },
            |(handler, signed)| black_box(handler.handle(signed).unwrap()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_paying_send,
    bench_whitelisted_send,
    bench_signed_request
);
criterion_main!(benches);
