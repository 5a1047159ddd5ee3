//! RSA with chunked long-message encryption, delegating every primitive to the
//! `rsa` crate.
//!
//! Blocks are encrypted with RSA-OAEP-SHA256 and joined as base64 with `,`.
//! Signatures are PKCS#1 v1.5 over a bare SHA-256 digest (no DigestInfo
//! prefix), base64-encoded.

use ::rsa::{traits::PublicKeyParts, Oaep, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use base64::{prelude::BASE64_STANDARD, Engine};
use log::debug;
use num_bigint_dig::BigUint;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::security::arith::config_rng;

/// SHA-256 output size in bytes.
pub const SHA256_SIZE: usize = 32;
/// Separator between encrypted blocks.
pub const BLOCK_SEPARATOR: &str = ",";

/// `key_bytes - 2*hLen - 2` for OAEP with SHA-256.
fn oaep_block_size(key_bytes: usize) -> Result<usize> {
    key_bytes
        .checked_sub(2 * SHA256_SIZE + 2)
        .filter(|&n| n > 0)
        .ok_or(Error::RsaBlockSize { key_bytes })
}

/// Configuration for RSA key generation.
#[derive(Debug, Clone)]
pub struct RSAKeyGenConfig {
    /// Key size in bits (e.g. 1024, 2048).
    pub key_size: usize,
    pub public_exponent: u64,
    /// Optional RNG seed for reproducibility in tests.
    pub seed: Option<u64>,
}

impl Default for RSAKeyGenConfig {
    fn default() -> Self {
        RSAKeyGenConfig {
            key_size: 2048,
            public_exponent: 65537,
            seed: None,
        }
    }
}

/// RSA KeyPair holds both public and private keys.
#[derive(Debug, Clone)]
pub struct RSAKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RSAKeyPair {
    pub fn generate(config: &RSAKeyGenConfig) -> Result<Self> {
        let mut rng = config_rng(config.seed);
        let exponent = BigUint::from(config.public_exponent);
        let private_key = RsaPrivateKey::new_with_exp(&mut rng, config.key_size, &exponent)?;
        debug!("generated {}-bit RSA key", config.key_size);
        Ok(Self::from_private_key(private_key))
    }

    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        RSAKeyPair {
            public_key: private_key.to_public_key(),
            private_key,
        }
    }

    /// Largest plaintext block OAEP-SHA256 accepts for this key.
    pub fn block_size(&self) -> Result<usize> {
        oaep_block_size(self.public_key.size())
    }

    /// Encrypt one block (at most [`block_size`](Self::block_size) bytes) to base64.
    pub fn encrypt(&self, block: &[u8]) -> Result<String> {
        let mut rng = config_rng(None);
        let ciphertext = self
            .public_key
            .encrypt(&mut rng, Oaep::new::<Sha256>(), block)?;
        Ok(BASE64_STANDARD.encode(ciphertext))
    }

    pub fn decrypt(&self, block: &str) -> Result<Vec<u8>> {
        let ciphertext = BASE64_STANDARD.decode(block)?;
        Ok(self.private_key.decrypt(Oaep::new::<Sha256>(), &ciphertext)?)
    }

    /// Split `message` into blocks and encrypt each one. Empty input gives `""`.
    pub fn encrypt_long(&self, message: &[u8]) -> Result<String> {
        if message.is_empty() {
            return Ok(String::new());
        }
        let size = self.block_size()?;
        let blocks = message
            .chunks(size)
            .map(|block| self.encrypt(block))
            .collect::<Result<Vec<_>>>()?;
        debug!("encrypted {} bytes into {} RSA blocks", message.len(), blocks.len());
        Ok(blocks.join(BLOCK_SEPARATOR))
    }

    /// Decrypt the output of [`encrypt_long`](Self::encrypt_long).
    pub fn decrypt_long(&self, joined: &str) -> Result<Vec<u8>> {
        if joined.is_empty() {
            return Ok(Vec::new());
        }
        let mut message = Vec::new();
        for block in joined.split(BLOCK_SEPARATOR) {
            message.extend(self.decrypt(block)?);
        }
        Ok(message)
    }

    pub fn sign(&self, message: &[u8]) -> Result<String> {
        let hashed = Sha256::digest(message);
        let signature = self
            .private_key
            .sign(Pkcs1v15Sign::new_unprefixed(), &hashed)?;
        Ok(BASE64_STANDARD.encode(signature))
    }

    /// `false` for anything that does not decode and verify.
    pub fn verify(&self, message: &[u8], signature: &str) -> bool {
        let Ok(signature) = BASE64_STANDARD.decode(signature) else {
            return false;
        };
        let hashed = Sha256::digest(message);
        self.public_key
            .verify(Pkcs1v15Sign::new_unprefixed(), &hashed, &signature)
            .is_ok()
    }
}
