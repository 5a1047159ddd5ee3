//! Chunked ElGamal encryption.
//!
//! Plaintext is split into chunks of `floor(bits(p)/8) - 1` bytes, each chunk
//! is read as a big-endian integer and encrypted under its own ephemeral
//! secret. No padding is applied, so leading zero bytes of a chunk are lost
//! on decryption.

use log::{debug, trace};
use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};

use super::codec;
use super::{ElGamalPrivateKey, ElGamalPublicKey};
use crate::error::{Error, Result};
use crate::security::arith::{
    bytes_to_int, config_rng, int_to_bytes, mod_inverse, random_exponent,
};

/// A ciphertext in ElGamal encryption consists of two values, (c1, c2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalCiphertext {
    pub c1: BigUint,
    pub c2: BigUint,
}

/// Configuration for message encryption.
#[derive(Debug, Clone, Default)]
pub struct ElGamalEncryptConfig {
    /// Optional RNG seed for reproducible tests. Leave it `None` otherwise.
    ///
    /// # Warnings
    /// - Every call with the same seed draws the same ephemeral secrets, so
    ///   equal `c1` values leak plaintext ratios across ciphertexts.
    /// - DO NOT set this outside of tests.
    #[doc(hidden)]
    pub seed: Option<u64>,
    /// Overrides the chunk size derived from `p`.
    pub chunk_size: Option<usize>,
}

/// Largest chunk, in bytes, that is guaranteed to stay below `p`.
pub fn chunk_size(p: &BigUint) -> usize {
    (p.bits() / 8).saturating_sub(1)
}

/// Encrypt a single integer `message < p`:
/// c1 = g^k mod p, c2 = message * y^k mod p, for a fresh k in [1, p-2].
pub fn elgamal_encrypt<R>(
    public_key: &ElGamalPublicKey,
    message: &BigUint,
    rng: &mut R,
) -> Result<ElGamalCiphertext>
where
    R: RngCore + CryptoRng + ?Sized,
{
    encrypt_int(public_key, message, 0, rng)
}

fn encrypt_int<R>(
    public_key: &ElGamalPublicKey,
    message: &BigUint,
    chunk: usize,
    rng: &mut R,
) -> Result<ElGamalCiphertext>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let p = &public_key.p;
    if message >= p {
        return Err(Error::MessageTooLarge { chunk });
    }

    let k = random_exponent(rng, p)?;
    let c1 = public_key.g.modpow(&k, p);
    let shared = public_key.y.modpow(&k, p);
    let c2 = (message * &shared) % p;

    Ok(ElGamalCiphertext { c1, c2 })
}

/// Decrypt one chunk: message = c2 * (c1^x)^-1 mod p.
pub fn elgamal_decrypt(
    private_key: &ElGamalPrivateKey,
    ciphertext: &ElGamalCiphertext,
) -> Result<BigUint> {
    let p = &private_key.p;
    if p <= &BigUint::from(2u64) {
        return Err(Error::ModulusTooSmall);
    }
    let shared = ciphertext.c1.modpow(&private_key.x, p);
    let shared_inv = mod_inverse(&shared, p).ok_or(Error::NonInvertible)?;
    Ok((&ciphertext.c2 * &shared_inv) % p)
}

/// Split `message` into `chunk_size`-byte chunks and encrypt each one in order.
/// An empty message yields no chunks.
pub fn encrypt_chunks<R>(
    public_key: &ElGamalPublicKey,
    message: &[u8],
    chunk_size: usize,
    rng: &mut R,
) -> Result<Vec<ElGamalCiphertext>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if message.is_empty() {
        return Ok(Vec::new());
    }
    // not even one byte fits below p
    if chunk_size == 0 {
        return Err(Error::MessageTooLarge { chunk: 0 });
    }

    message
        .chunks(chunk_size)
        .enumerate()
        .map(|(i, chunk)| {
            trace!("encrypting chunk {} ({} bytes)", i, chunk.len());
            encrypt_int(public_key, &bytes_to_int(chunk), i, &mut *rng)
        })
        .collect()
}

/// Decrypt chunks in order and concatenate their minimal byte encodings.
pub fn decrypt_chunks(
    private_key: &ElGamalPrivateKey,
    chunks: &[ElGamalCiphertext],
) -> Result<Vec<u8>> {
    let mut message = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        trace!("decrypting chunk {}", i);
        let m = elgamal_decrypt(private_key, chunk)?;
        message.extend(int_to_bytes(&m));
    }
    Ok(message)
}

/// Encrypt an arbitrarily long message into the `c1,c2|c1,c2|...` wire form.
pub fn encrypt(
    public_key: &ElGamalPublicKey,
    message: &[u8],
    config: &ElGamalEncryptConfig,
) -> Result<String> {
    let mut rng = config_rng(config.seed);
    let size = config
        .chunk_size
        .unwrap_or_else(|| chunk_size(&public_key.p));
    let chunks = encrypt_chunks(public_key, message, size, &mut rng)?;
    debug!(
        "encrypted {} bytes into {} chunks of up to {} bytes",
        message.len(),
        chunks.len(),
        size
    );
    Ok(codec::encode_ciphertext(&chunks))
}

/// Decrypt the wire form produced by [`encrypt`].
pub fn decrypt(private_key: &ElGamalPrivateKey, ciphertext: &str) -> Result<Vec<u8>> {
    let chunks = codec::decode_ciphertext(ciphertext)?;
    debug!("decrypting {} chunks", chunks.len());
    decrypt_chunks(private_key, &chunks)
}

impl ElGamalPublicKey {
    /// Encrypt with fresh entropy and the chunk size derived from `p`.
    pub fn encrypt(&self, message: &[u8]) -> Result<String> {
        encrypt(self, message, &ElGamalEncryptConfig::default())
    }
}

impl ElGamalPrivateKey {
    pub fn decrypt(&self, ciphertext: &str) -> Result<Vec<u8>> {
        decrypt(self, ciphertext)
    }
}
