use asymcrypt::security::elgamal::{
    cipher, signer, ElGamalKeyGenConfig, ElGamalKeyPair, ElGamalParams, ElGamalParamsConfig,
    ElGamalSignConfig,
};
use asymcrypt::Error;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn keypair(bits: usize) -> ElGamalKeyPair {
    let config = ElGamalParamsConfig {
        prime_bits: bits,
        seed: Some(42),
        ..Default::default()
    };
    ElGamalParams::generate(&config)
        .unwrap()
        .generate_keypair(&ElGamalKeyGenConfig { seed: Some(43) })
        .unwrap()
}

fn bench_encrypt_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("elgamal_cipher");
    let message = vec![b'm'; 1024];

    for bits in [256usize, 512, 1024] {
        let kp = keypair(bits);
        let ciphertext = kp.public.encrypt(&message).unwrap();

        group.bench_with_input(BenchmarkId::new("encrypt_1k", bits), &bits, |b, _| {
            b.iter(|| kp.public.encrypt(black_box(&message)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decrypt_1k", bits), &bits, |b, _| {
            b.iter(|| cipher::decrypt(&kp.private, black_box(&ciphertext)).unwrap())
        });
    }

    group.finish();
}

fn bench_sign_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("elgamal_signer");
    let message = b"benchmark message".to_vec();

    for bits in [256usize, 512] {
        let kp = keypair(bits);
        let signature = (0..)
            .find_map(|seed| {
                match signer::sign(&kp.private, &message, &ElGamalSignConfig { seed: Some(seed) }) {
                    Ok(sig) => Some(sig),
                    Err(Error::NonInvertible) => None,
                    Err(e) => panic!("signing failed: {e}"),
                }
            })
            .unwrap();

        group.bench_with_input(BenchmarkId::new("sign", bits), &bits, |b, _| {
            // NonInvertible is an expected outcome, the work is the same
            b.iter(|| kp.private.sign(black_box(&message)).ok())
        });
        group.bench_with_input(BenchmarkId::new("verify", bits), &bits, |b, _| {
            b.iter(|| kp.public.verify(black_box(&message), &signature).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encrypt_decrypt, bench_sign_verify);
criterion_main!(benches);
