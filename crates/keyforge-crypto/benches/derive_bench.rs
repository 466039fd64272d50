use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keyforge_crypto::hd::FULL_FUNDRAISER_PATH;
use keyforge_crypto::{compute_master, derive_for_path, registry};

const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn bench_derivation(c: &mut Criterion) {
    let master = compute_master(&[7u8; 64]);
    c.bench_function("derive_for_path_bip44", |b| {
        b.iter(|| derive_for_path(black_box(&master), black_box(FULL_FUNDRAISER_PATH)))
    });

    // Dominated by the 2048 PBKDF2 rounds of the seed deriver.
    let algo = registry::resolve("secp256k1").unwrap();
    c.bench_function("secp256k1_derive_from_mnemonic", |b| {
        b.iter(|| algo.derive(black_box(MNEMONIC), "", FULL_FUNDRAISER_PATH))
    });
}

fn bench_keys(c: &mut Criterion) {
    let secp = registry::resolve("secp256k1").unwrap().generate(&[9u8; 32]);
    let pk = secp.pub_key().unwrap();
    let sig = secp.sign(b"bench message").unwrap();

    c.bench_function("secp256k1_sign", |b| b.iter(|| secp.sign(black_box(b"bench message"))));
    c.bench_function("secp256k1_verify", |b| {
        b.iter(|| pk.verify_signature(black_box(b"bench message"), black_box(&sig)))
    });

    let dil = registry::resolve("dilithium2").unwrap().generate(&[9u8; 32]);
    c.bench_function("dilithium2_generate", |b| {
        b.iter(|| registry::resolve("dilithium2").unwrap().generate(black_box(&[9u8; 32])))
    });
    c.bench_function("dilithium2_equals", |b| b.iter(|| dil.equals(black_box(dil.as_ref()))));
}

criterion_group!(benches, bench_derivation, bench_keys);
criterion_main!(benches);
