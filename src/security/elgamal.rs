//! DISCLAIMER: This library is a toy example of ElGamal Encryption in pure Rust.
//! It is *EXCLUSIVELY* for demonstration and educational purposes.
//! Absolutely DO NOT use it for real cryptographic or security-sensitive operations.
//! It is not audited, not vetted, and very likely insecure in practice.
//!
//! If you need ElGamal or any cryptographic operations in production, please use a
//! vetted, well-reviewed cryptography library.
//!
//! # Overview
//! - [`ElGamalParams`] / [`ElGamalKeyPair`]: domain and keys, generated from a
//!   [`PrimeSupplier`].
//! - [`cipher`]: chunked encryption of arbitrarily long byte strings.
//! - [`signer`]: signatures over the raw message integer.
//! - [`codec`]: the `c1,c2|...` and `r,s` hex wire format.
//! - [`ElGamalKeyStore`]: an owned holder for one key pair, replaced on every
//!   [`ElGamalKeyStore::generate_keys`].

pub mod cipher;
pub mod codec;
pub mod signer;

use log::debug;
use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::security::arith::{config_rng, random_exponent};
use crate::security::prime::{PrimeSupplier, RandomPrimeSupplier};

pub use cipher::{ElGamalCiphertext, ElGamalEncryptConfig};
pub use signer::{ElGamalSignConfig, ElGamalSignature};

/// Generator used when none is configured. No order check is made on it.
pub const DEFAULT_GENERATOR: u64 = 2;

/// ElGamal parameters: a large prime `p` and a generator `g`.
///
/// *This is for demonstration only. DO NOT use in real systems.*
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalParams {
    /// A large prime modulus.
    pub p: BigUint,
    /// A generator for the multiplicative group modulo `p`.
    pub g: BigUint,
}

/// A structure holding the ElGamal public key:
/// - `p` and `g` from the system parameters.
/// - `y = g^x mod p`, where `x` is the secret exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalPublicKey {
    pub p: BigUint,
    pub g: BigUint,
    pub y: BigUint,
}

/// A structure holding the ElGamal private key:
/// - the same `p`, `g`,
/// - plus the secret exponent `x` in `[1, p-2]`.
#[derive(Debug, Clone)]
pub struct ElGamalPrivateKey {
    pub p: BigUint,
    pub g: BigUint,
    pub x: BigUint,
}

/// Combined keypair, storing both public and private halves together.
#[derive(Debug, Clone)]
pub struct ElGamalKeyPair {
    pub public: ElGamalPublicKey,
    pub private: ElGamalPrivateKey,
}

/// Configuration for generating ElGamal parameters.
#[derive(Debug, Clone)]
pub struct ElGamalParamsConfig {
    /// The bit length of the prime `p`.
    pub prime_bits: usize,
    /// The generator `g`. Defaults to [`DEFAULT_GENERATOR`].
    pub generator: BigUint,
    /// Optional RNG seed for reproducibility in tests.
    pub seed: Option<u64>,
}

impl Default for ElGamalParamsConfig {
    fn default() -> Self {
        ElGamalParamsConfig {
            prime_bits: 512,
            generator: BigUint::from(DEFAULT_GENERATOR),
            seed: None,
        }
    }
}

/// Configuration for keypair generation given certain ElGamal parameters.
#[derive(Debug, Clone, Default)]
pub struct ElGamalKeyGenConfig {
    /// Optional RNG seed for reproducibility in tests.
    pub seed: Option<u64>,
}

impl ElGamalParams {
    pub fn new(p: BigUint, g: BigUint) -> Self {
        ElGamalParams { p, g }
    }

    /// Generate parameters with a fresh probable prime of `prime_bits` bits.
    ///
    /// # Warnings
    /// - No safe-prime or generator-order validation is performed.
    pub fn generate(config: &ElGamalParamsConfig) -> Result<Self> {
        let mut supplier = RandomPrimeSupplier::new(config_rng(config.seed));
        Self::generate_with(config, &mut supplier)
    }

    /// Generate parameters with `p` taken from `supplier`.
    pub fn generate_with<S>(config: &ElGamalParamsConfig, supplier: &mut S) -> Result<Self>
    where
        S: PrimeSupplier + ?Sized,
    {
        let p = supplier.probable_prime(config.prime_bits)?;
        debug!(
            "generated {}-bit ElGamal domain with generator {}",
            p.bits(),
            config.generator
        );
        Ok(ElGamalParams {
            p,
            g: config.generator.clone(),
        })
    }

    /// Generate an ElGamal keypair: pick private x in [1, p-2], public y = g^x mod p.
    pub fn generate_keypair(&self, config: &ElGamalKeyGenConfig) -> Result<ElGamalKeyPair> {
        let mut rng = config_rng(config.seed);
        self.generate_keypair_with_rng(&mut rng)
    }

    pub fn generate_keypair_with_rng<R>(&self, rng: &mut R) -> Result<ElGamalKeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let x = random_exponent(rng, &self.p)?;
        let y = self.g.modpow(&x, &self.p);

        let public = ElGamalPublicKey {
            p: self.p.clone(),
            g: self.g.clone(),
            y,
        };
        let private = ElGamalPrivateKey {
            p: self.p.clone(),
            g: self.g.clone(),
            x,
        };

        Ok(ElGamalKeyPair { public, private })
    }

    /// Plaintext chunk size, in bytes, used by [`cipher::encrypt`].
    pub fn chunk_size(&self) -> usize {
        cipher::chunk_size(&self.p)
    }
}

impl ElGamalKeyPair {
    /// Fresh domain and keys of `bits` bits with the default generator.
    pub fn generate(bits: usize) -> Result<Self> {
        let config = ElGamalParamsConfig {
            prime_bits: bits,
            ..Default::default()
        };
        ElGamalParams::generate(&config)?.generate_keypair(&ElGamalKeyGenConfig::default())
    }

    pub fn params(&self) -> ElGamalParams {
        ElGamalParams::new(self.public.p.clone(), self.public.g.clone())
    }
}

/// Holds at most one ElGamal key pair.
///
/// Key generation takes `&mut self`, so it can never overlap with the `&self`
/// operations; those only read the keys and may run from many threads at once.
#[derive(Debug, Clone)]
pub struct ElGamalKeyStore {
    generator: BigUint,
    keys: Option<ElGamalKeyPair>,
}

impl Default for ElGamalKeyStore {
    fn default() -> Self {
        Self::with_generator(BigUint::from(DEFAULT_GENERATOR))
    }
}

impl ElGamalKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(generator: BigUint) -> Self {
        ElGamalKeyStore {
            generator,
            keys: None,
        }
    }

    /// Replace the keys with a fresh `bits`-bit domain and key pair.
    pub fn generate_keys(&mut self, bits: usize) -> Result<()> {
        let mut supplier = RandomPrimeSupplier::new(config_rng(None));
        self.generate_keys_with(bits, &mut supplier)
    }

    /// Like [`generate_keys`](Self::generate_keys) with `p` taken from `supplier`.
    /// On failure the store is left empty.
    pub fn generate_keys_with<S>(&mut self, bits: usize, supplier: &mut S) -> Result<()>
    where
        S: PrimeSupplier + ?Sized,
    {
        self.keys = None;
        let config = ElGamalParamsConfig {
            prime_bits: bits,
            generator: self.generator.clone(),
            seed: None,
        };
        let params = ElGamalParams::generate_with(&config, supplier)?;
        self.keys = Some(params.generate_keypair(&ElGamalKeyGenConfig::default())?);
        Ok(())
    }

    pub fn keys(&self) -> Result<&ElGamalKeyPair> {
        self.keys.as_ref().ok_or(Error::KeysNotGenerated)
    }

    pub fn encrypt(&self, message: &[u8]) -> Result<String> {
        self.keys()?.public.encrypt(message)
    }

    pub fn decrypt(&self, ciphertext: &str) -> Result<Vec<u8>> {
        self.keys()?.private.decrypt(ciphertext)
    }

    pub fn sign(&self, message: &[u8]) -> Result<String> {
        self.keys()?.private.sign(message)
    }

    pub fn verify(&self, message: &[u8], signature: &str) -> Result<bool> {
        self.keys()?.public.verify(message, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::prime::FixedPrime;
    use num_traits::One;

    #[test]
    fn test_toy_elgamal() {
        let params_cfg = ElGamalParamsConfig {
            prime_bits: 256,
            seed: Some(42),
            ..Default::default()
        };
        let params = ElGamalParams::generate(&params_cfg).unwrap();
        assert_eq!(params.p.bits(), 256);
        assert_eq!(params.g, BigUint::from(2u64));

        let keypair = params
            .generate_keypair(&ElGamalKeyGenConfig { seed: Some(100) })
            .unwrap();

        let x = &keypair.private.x;
        assert!(*x >= BigUint::one());
        assert!(*x <= &params.p - BigUint::from(2u64));
        assert_eq!(keypair.public.y, params.g.modpow(x, &params.p));
        assert_eq!(keypair.params(), params);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let cfg = ElGamalParamsConfig {
            prime_bits: 64,
            seed: Some(9),
            ..Default::default()
        };
        let a = ElGamalParams::generate(&cfg).unwrap();
        let b = ElGamalParams::generate(&cfg).unwrap();
        assert_eq!(a, b);

        let key_cfg = ElGamalKeyGenConfig { seed: Some(10) };
        assert_eq!(
            a.generate_keypair(&key_cfg).unwrap().public,
            b.generate_keypair(&key_cfg).unwrap().public
        );
    }

    #[test]
    fn test_custom_generator() {
        let mut supplier = FixedPrime::from_decimal("65521").unwrap();
        let cfg = ElGamalParamsConfig {
            prime_bits: 16,
            generator: BigUint::from(17u64),
            seed: None,
        };
        let params = ElGamalParams::generate_with(&cfg, &mut supplier).unwrap();
        assert_eq!(params.g, BigUint::from(17u64));

        let kp = params.generate_keypair(&ElGamalKeyGenConfig::default()).unwrap();
        let ciphertext = kp.public.encrypt(b"hi").unwrap();
        assert_eq!(kp.private.decrypt(&ciphertext).unwrap(), b"hi".to_vec());
    }

    #[test]
    fn test_generate_rejects_bad_bit_length() {
        assert!(matches!(
            ElGamalKeyPair::generate(1),
            Err(Error::InvalidBitLength(1))
        ));
    }

    #[test]
    fn test_key_store_requires_generation() {
        let store = ElGamalKeyStore::new();
        assert!(matches!(store.encrypt(b"x"), Err(Error::KeysNotGenerated)));
        assert!(matches!(store.decrypt(""), Err(Error::KeysNotGenerated)));
        assert!(matches!(store.sign(b"x"), Err(Error::KeysNotGenerated)));
        assert!(matches!(
            store.verify(b"x", "1,2"),
            Err(Error::KeysNotGenerated)
        ));
    }

    #[test]
    fn test_key_store_round_trip() {
        let mut store = ElGamalKeyStore::new();
        store.generate_keys(128).unwrap();
        assert_eq!(store.keys().unwrap().public.p.bits(), 128);

        let message = b"stored keys, owned by the caller";
        let ciphertext = store.encrypt(message).unwrap();
        assert_eq!(store.decrypt(&ciphertext).unwrap(), message.to_vec());
    }

    #[test]
    fn test_key_store_regeneration_replaces_keys() {
        let mut store = ElGamalKeyStore::new();
        store.generate_keys(64).unwrap();
        let old = store.keys().unwrap().clone();

        store.generate_keys(96).unwrap();
        let new = store.keys().unwrap();
        assert_eq!(new.public.p.bits(), 96);
        assert_ne!(new.public, old.public);
    }

    #[test]
    fn test_key_store_failed_generation_clears_keys() {
        let mut store = ElGamalKeyStore::new();
        store.generate_keys(64).unwrap();

        let mut supplier = FixedPrime::from_decimal("65521").unwrap();
        assert!(store.generate_keys_with(32, &mut supplier).is_err());
        assert!(matches!(store.keys(), Err(Error::KeysNotGenerated)));
    }

    #[test]
    fn test_concurrent_operations_share_keys() {
        let mut store = ElGamalKeyStore::new();
        store.generate_keys(128).unwrap();
        let store = &store;

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4u8)
                .map(|i| {
                    scope.spawn(move || {
                        let message = vec![b'a' + i; 40];
                        let ciphertext = store.encrypt(&message).unwrap();
                        (ciphertext, message)
                    })
                })
                .collect();

            let mut seen = Vec::new();
            for handle in handles {
                let (ciphertext, message) = handle.join().unwrap();
                assert_eq!(store.decrypt(&ciphertext).unwrap(), message);
                seen.push(ciphertext);
            }
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), 4);
        });
    }
}
