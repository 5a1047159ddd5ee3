//! Text wire format for ElGamal ciphertexts and signatures.
//!
//! Ciphertext: `c1,c2|c1,c2|...`. Signature: `r,s`. Every integer is
//! lowercase hex with no `0x` prefix and no padding.

use std::fmt;
use std::str::FromStr;

use num_bigint_dig::BigUint;

use super::cipher::ElGamalCiphertext;
use super::signer::ElGamalSignature;
use crate::error::{Error, Result};

/// Separator between ciphertext chunks.
pub const CHUNK_SEPARATOR: &str = "|";
/// Separator between the two integers of a chunk or signature.
pub const FIELD_SEPARATOR: &str = ",";

fn encode_hex(value: &BigUint) -> String {
    value.to_str_radix(16)
}

fn decode_hex(s: &str) -> Option<BigUint> {
    if s.is_empty() {
        return None;
    }
    let bytes = if s.len() % 2 == 1 {
        hex::decode(format!("0{s}"))
    } else {
        hex::decode(s)
    };
    bytes.ok().map(|b| BigUint::from_bytes_be(&b))
}

/// Split `s` into exactly two hex integers, or describe why not.
fn decode_pair(s: &str) -> std::result::Result<(BigUint, BigUint), String> {
    let fields: Vec<&str> = s.split(FIELD_SEPARATOR).collect();
    if fields.len() != 2 {
        return Err(format!("expected 2 fields, found {}", fields.len()));
    }
    let first = decode_hex(fields[0]).ok_or_else(|| format!("invalid hex {:?}", fields[0]))?;
    let second = decode_hex(fields[1]).ok_or_else(|| format!("invalid hex {:?}", fields[1]))?;
    Ok((first, second))
}

impl fmt::Display for ElGamalCiphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            encode_hex(&self.c1),
            FIELD_SEPARATOR,
            encode_hex(&self.c2)
        )
    }
}

impl FromStr for ElGamalCiphertext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (c1, c2) = decode_pair(s).map_err(Error::MalformedCiphertext)?;
        Ok(ElGamalCiphertext { c1, c2 })
    }
}

impl fmt::Display for ElGamalSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            encode_hex(&self.r),
            FIELD_SEPARATOR,
            encode_hex(&self.s)
        )
    }
}

impl FromStr for ElGamalSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (r, s) = decode_pair(s).map_err(Error::MalformedSignature)?;
        Ok(ElGamalSignature { r, s })
    }
}

/// Join ciphertext chunks into the wire string. No chunks gives `""`.
pub fn encode_ciphertext(chunks: &[ElGamalCiphertext]) -> String {
    chunks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR)
}

/// Parse the wire string back into chunks, stopping at the first bad one.
/// `""` is the encoding of zero chunks.
pub fn decode_ciphertext(s: &str) -> Result<Vec<ElGamalCiphertext>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(CHUNK_SEPARATOR)
        .enumerate()
        .map(|(i, chunk)| {
            decode_pair(chunk)
                .map(|(c1, c2)| ElGamalCiphertext { c1, c2 })
                .map_err(|e| Error::MalformedCiphertext(format!("chunk {i}: {e}")))
        })
        .collect()
}

pub fn encode_signature(signature: &ElGamalSignature) -> String {
    signature.to_string()
}

pub fn decode_signature(s: &str) -> Result<ElGamalSignature> {
    s.parse()
}
