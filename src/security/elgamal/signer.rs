//! ElGamal signatures over the raw message integer.
//!
//! The message is not hashed: its big-endian integer is used directly as the
//! digest, whatever its size. Verification checks `g^h == y^r * r^s (mod p)`
//! and nothing else; in particular `r` is not range-checked.

use log::debug;
use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use super::codec;
use super::{ElGamalPrivateKey, ElGamalPublicKey};
use crate::error::{Error, Result};
use crate::security::arith::{bytes_to_int, config_rng, mod_inverse, mod_sub, random_exponent};

/// An ElGamal signature `(r, s)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalSignature {
    pub r: BigUint,
    pub s: BigUint,
}

/// Configuration for signing.
#[derive(Debug, Clone, Default)]
pub struct ElGamalSignConfig {
    /// Optional RNG seed for reproducible tests.
    ///
    /// # Warnings
    /// - A repeated seed repeats `k`, which reveals the private exponent from
    ///   two signatures. DO NOT set this outside of tests.
    #[doc(hidden)]
    pub seed: Option<u64>,
}

/// Sign `message` with a fresh ephemeral secret k in [1, p-2]:
/// r = g^k mod p, s = (h - x*r) * k^-1 mod (p-1).
///
/// Fails with [`Error::NonInvertible`] when k shares a factor with p-1.
/// The failure is returned as is; no new k is drawn.
pub fn elgamal_sign<R>(
    private_key: &ElGamalPrivateKey,
    message: &[u8],
    rng: &mut R,
) -> Result<ElGamalSignature>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let p = &private_key.p;
    let k = random_exponent(rng, p)?;
    let order = p - BigUint::one();
    let h = bytes_to_int(message);

    let r = private_key.g.modpow(&k, p);
    let diff = mod_sub(&h, &(&private_key.x * &r), &order);
    let k_inv = mod_inverse(&k, &order).ok_or_else(|| {
        debug!("ephemeral secret is not invertible modulo p-1");
        Error::NonInvertible
    })?;
    let s = (diff * k_inv) % &order;

    Ok(ElGamalSignature { r, s })
}

/// Check `g^h == y^r * r^s (mod p)` for the message integer `h`.
pub fn elgamal_verify(
    public_key: &ElGamalPublicKey,
    message: &[u8],
    signature: &ElGamalSignature,
) -> bool {
    let p = &public_key.p;
    if p.is_zero() {
        return false;
    }
    let h = bytes_to_int(message);

    let v1 = public_key.g.modpow(&h, p);
    let v2 = (public_key.y.modpow(&signature.r, p) * signature.r.modpow(&signature.s, p)) % p;

    v1 == v2
}

/// Sign and encode as `r,s` hex.
pub fn sign(
    private_key: &ElGamalPrivateKey,
    message: &[u8],
    config: &ElGamalSignConfig,
) -> Result<String> {
    let mut rng = config_rng(config.seed);
    let signature = elgamal_sign(private_key, message, &mut rng)?;
    Ok(codec::encode_signature(&signature))
}

/// Decode an `r,s` hex signature and verify it.
pub fn verify(public_key: &ElGamalPublicKey, message: &[u8], signature: &str) -> Result<bool> {
    let signature = codec::decode_signature(signature)?;
    Ok(elgamal_verify(public_key, message, &signature))
}

impl ElGamalPrivateKey {
    pub fn sign(&self, message: &[u8]) -> Result<String> {
        sign(self, message, &ElGamalSignConfig::default())
    }
}

impl ElGamalPublicKey {
    pub fn verify(&self, message: &[u8], signature: &str) -> Result<bool> {
        verify(self, message, signature)
    }
}
