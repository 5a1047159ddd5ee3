//! Modular arithmetic helpers shared by the ElGamal routines.
//!
//! Only what ElGamal needs lives here: uniform draws over a range, the
//! extended Euclidean inverse, and conversions between byte strings and
//! big-endian integers.

use num_bigint_dig::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::{Error, Result};

/// Build the RNG used by a config: seeded for reproducibility, otherwise from OS entropy.
pub fn config_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_entropy(),
    }
}

/// Draw uniformly from `[0, bound)`.
pub fn random_below<R>(rng: &mut R, bound: &BigUint) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bound.is_zero() {
        return Err(Error::ModulusTooSmall);
    }
    Ok(rng.gen_biguint_below(bound))
}

/// Draw an exponent uniformly from `[1, p-2]`.
///
/// The draw is taken over `[0, p-3]` and shifted by one, so the range stays
/// contiguous and the result is unbiased.
pub fn random_exponent<R>(rng: &mut R, p: &BigUint) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let two = BigUint::from(2u64);
    if *p <= two {
        return Err(Error::ModulusTooSmall);
    }
    let bound = p - &two;
    Ok(random_below(rng, &bound)? + BigUint::one())
}

/// `(a - b) mod m`, always in `[0, m)`.
pub fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

/// Modular inverse of `a` modulo `m` via the extended Euclidean algorithm.
/// Returns `None` when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());
    let (g, x, _) = extended_gcd(BigInt::from_biguint(Sign::Plus, a.clone()), m_int.clone());
    if !g.is_one() {
        return None;
    }
    let mut result = x % &m_int;
    if result.sign() == Sign::Minus {
        result += &m_int;
    }
    result.to_biguint()
}

/// Returns `(gcd(a, b), x, y)` with `a*x + b*y = gcd(a, b)`.
fn extended_gcd(mut a: BigInt, mut b: BigInt) -> (BigInt, BigInt, BigInt) {
    let mut x0 = BigInt::one();
    let mut x1 = BigInt::zero();
    let mut y0 = BigInt::zero();
    let mut y1 = BigInt::one();

    while !b.is_zero() {
        let (q, r) = a.div_rem(&b);
        a = b;
        b = r;

        let tmpx = x0 - &q * &x1;
        x0 = x1;
        x1 = tmpx;

        let tmpy = y0 - &q * &y1;
        y0 = y1;
        y1 = tmpy;
    }
    (a, x0, y0)
}

/// Interpret bytes as a big-endian non-negative integer. Empty input is zero.
pub fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal big-endian encoding. Zero encodes to no bytes at all, so leading
/// zero bytes of the original input are not recoverable.
pub fn int_to_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_exponent_stays_in_range() {
        let mut rng = config_rng(Some(7));
        let p = BigUint::from(11u64);
        for _ in 0..500 {
            let k = random_exponent(&mut rng, &p).unwrap();
            assert!(k >= BigUint::one());
            assert!(k <= BigUint::from(9u64));
        }
    }

    #[test]
    fn test_random_exponent_smallest_domain() {
        // p = 3 leaves exactly one exponent: 1
        let mut rng = config_rng(Some(1));
        let k = random_exponent(&mut rng, &BigUint::from(3u64)).unwrap();
        assert_eq!(k, BigUint::one());
    }

    #[test]
    fn test_random_exponent_rejects_tiny_modulus() {
        let mut rng = config_rng(Some(1));
        assert!(matches!(
            random_exponent(&mut rng, &BigUint::from(2u64)),
            Err(Error::ModulusTooSmall)
        ));
        assert!(matches!(
            random_below(&mut rng, &BigUint::zero()),
            Err(Error::ModulusTooSmall)
        ));
    }

    #[test]
    fn test_mod_inverse() {
        let m = BigUint::from(65520u64);
        for a in [11u64, 17, 65519] {
            let a = BigUint::from(a);
            let inv = mod_inverse(&a, &m).unwrap();
            assert_eq!((&a * &inv) % &m, BigUint::one());
        }

        // 65520 = 2^4 * 3^2 * 5 * 7 * 13
        assert!(mod_inverse(&BigUint::from(4u64), &m).is_none());
        assert!(mod_inverse(&BigUint::from(7u64), &m).is_none());
        assert!(mod_inverse(&BigUint::zero(), &BigUint::from(13u64)).is_none());
    }

    #[test]
    fn test_mod_sub_wraps() {
        let m = BigUint::from(10u64);
        assert_eq!(
            mod_sub(&BigUint::from(3u64), &BigUint::from(7u64), &m),
            BigUint::from(6u64)
        );
        assert_eq!(
            mod_sub(&BigUint::from(27u64), &BigUint::from(4u64), &m),
            BigUint::from(3u64)
        );
    }

    #[test]
    fn test_int_to_bytes_strips_leading_zeros() {
        let value = bytes_to_int(&[0x00, 0x00, 0x41, 0x42]);
        assert_eq!(int_to_bytes(&value), b"AB".to_vec());
        assert!(int_to_bytes(&bytes_to_int(&[0x00, 0x00])).is_empty());
        assert!(int_to_bytes(&bytes_to_int(&[])).is_empty());
    }
}
