use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sign_tx_id_bench(c: &mut Criterion) {
    let kp = airmile_crypto::keypair_from_name("Alice");
    let tx_id = airmile_crypto::blake2b_256(b"transaction body");

    c.bench_function("ed25519_sign_tx_id", |b| {
        b.iter(|| airmile_crypto::sign_message(black_box(&tx_id), &kp.private))
    });
}

fn verify_tx_id_bench(c: &mut Criterion) {
    let kp = airmile_crypto::keypair_from_name("Alice");
    let tx_id = airmile_crypto::blake2b_256(b"transaction body");
    let sig = airmile_crypto::sign_message(&tx_id, &kp.private);

    c.bench_function("ed25519_verify_tx_id", |b| {
        b.iter(|| airmile_crypto::verify_signature(black_box(&tx_id), &sig, &kp.public))
    });
}

fn hash_transaction_bench(c: &mut Criterion) {
    let body = vec![0xCDu8; 1024];

    c.bench_function("hash_transaction_1KB", |b| {
        b.iter(|| airmile_crypto::hash_transaction(black_box(&body)))
    });
}

fn keypair_from_name_bench(c: &mut Criterion) {
    c.bench_function("keypair_from_name", |b| {
        b.iter(|| airmile_crypto::keypair_from_name(black_box("Bob")))
    });
}

criterion_group!(
    benches,
    sign_tx_id_bench,
    verify_tx_id_bench,
    hash_transaction_bench,
    keypair_from_name_bench,
);
criterion_main!(benches);
