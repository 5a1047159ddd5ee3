//! Sources of domain primes.
//!
//! Prime generation itself is delegated to `num-bigint-dig`; this module only
//! defines the seam key generation calls through.

use num_bigint_dig::{BigUint, RandPrime};
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Produces a probable prime of a requested bit length.
pub trait PrimeSupplier {
    fn probable_prime(&mut self, bits: usize) -> Result<BigUint>;
}

/// Generates fresh probable primes from the wrapped RNG.
#[derive(Debug)]
pub struct RandomPrimeSupplier<R> {
    rng: R,
}

impl<R> RandomPrimeSupplier<R> {
    pub fn new(rng: R) -> Self {
        RandomPrimeSupplier { rng }
    }
}

impl<R: RngCore + CryptoRng> PrimeSupplier for RandomPrimeSupplier<R> {
    fn probable_prime(&mut self, bits: usize) -> Result<BigUint> {
        // gen_prime panics below 2 bits
        if bits < 2 {
            return Err(Error::InvalidBitLength(bits));
        }
        Ok(self.rng.gen_prime(bits))
    }
}

/// Hands back a prime the caller already holds, parsed from its decimal form.
///
/// Useful for tests that need a known small domain, and for embedders that
/// ship a fixed modulus.
#[derive(Debug, Clone)]
pub struct FixedPrime {
    prime: BigUint,
}

impl FixedPrime {
    pub fn new(prime: BigUint) -> Self {
        FixedPrime { prime }
    }

    pub fn from_decimal(s: &str) -> Result<Self> {
        BigUint::parse_bytes(s.trim().as_bytes(), 10)
            .map(FixedPrime::new)
            .ok_or_else(|| Error::PrimeGeneration(format!("not a decimal integer: {s:?}")))
    }
}

impl PrimeSupplier for FixedPrime {
    /// Returns the held prime if it has exactly `bits` bits.
    fn probable_prime(&mut self, bits: usize) -> Result<BigUint> {
        if bits < 2 {
            return Err(Error::InvalidBitLength(bits));
        }
        if self.prime.bits() != bits {
            return Err(Error::PrimeGeneration(format!(
                "fixed prime has {} bits, {} requested",
                self.prime.bits(),
                bits
            )));
        }
        Ok(self.prime.clone())
    }
}
