use thiserror::Error;

/// Errors produced by the ElGamal and RSA routines in this crate.
#[derive(Debug, Error)]
pub enum Error {
    // ── ElGamal ───────────────────────────────────────────────────────
    /// A plaintext chunk, read as a big-endian integer, is not below `p`.
    #[error("message chunk {chunk} is too large for the domain modulus")]
    MessageTooLarge { chunk: usize },
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
    /// The modular inverse needed by the operation does not exist.
    #[error("value is not invertible modulo the given modulus")]
    NonInvertible,

    // ── Domain / keys ─────────────────────────────────────────────────
    #[error("cannot generate a prime of {0} bits")]
    InvalidBitLength(usize),
    #[error("domain modulus is too small to draw an exponent from")]
    ModulusTooSmall,
    #[error("prime generation failed: {0}")]
    PrimeGeneration(String),
    #[error("keys have not been generated")]
    KeysNotGenerated,

    // ── RSA ───────────────────────────────────────────────────────────
    #[error("RSA operation failed: {0}")]
    Rsa(#[from] rsa::Error),
    #[error("RSA key of {key_bytes} bytes is too small for OAEP-SHA256 blocks")]
    RsaBlockSize { key_bytes: usize },
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
