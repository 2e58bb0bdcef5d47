//! Blum prime generation (primes congruent to 3 mod 4)

use num_bigint::{BigUint, RandBigInt};
use rand::thread_rng;

use crate::error::{CryptoError, Result};
use crate::primality::is_probable_prime;
use crate::types::PrimeSearchConfig;

/// Generate a random Blum prime of exactly `bit_size` bits
///
/// Candidates have their top bit set and their bottom two bits set (so `p = 3 mod 4`)
/// before being tested with Miller-Rabin.
pub fn generate_blum_prime(bit_size: u64, config: &PrimeSearchConfig) -> Result<BigUint> {
    if bit_size < 2 {
        return Err(CryptoError::InvalidParameter(format!(
            "Blum primes need at least 2 bits, got {}",
            bit_size
        )));
    }

    let mut rng = thread_rng();

    for _ in 0..config.max_attempts {
        let mut candidate = rng.gen_biguint(bit_size);
        candidate.set_bit(bit_size - 1, true);
        candidate |= BigUint::from(3u32);

        if is_probable_prime(&candidate, config.primality_rounds) {
            return Ok(candidate);
        }
    }

    Err(CryptoError::PrimeSearchExhausted {
        bits: bit_size,
        attempts: config.max_attempts,
    })
}

/// Generate two distinct Blum primes of `p_bits` and `q_bits` bits, redrawing `q` on collision
pub fn generate_blum_pair(
    p_bits: u64,
    q_bits: u64,
    config: &PrimeSearchConfig,
) -> Result<(BigUint, BigUint)> {
    let p = generate_blum_prime(p_bits, config)?;

    for _ in 0..config.max_attempts {
        let q = generate_blum_prime(q_bits, config)?;
        if q != p {
            return Ok((p, q));
        }
    }

    Err(CryptoError::PrimeSearchExhausted {
        bits: q_bits,
        attempts: config.max_attempts,
    })
}

/// True when `n` is a probable prime with `n = 3 mod 4`
pub fn is_blum_prime(n: &BigUint, rounds: usize) -> bool {
    n % 4u32 == BigUint::from(3u32) && is_probable_prime(n, rounds)
}
