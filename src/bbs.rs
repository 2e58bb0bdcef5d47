//! Blum Blum Shub pseudorandom bit generator and prime source

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::thread_rng;
use std::fmt;

use crate::blum::{generate_blum_pair, is_blum_prime};
use crate::error::{CryptoError, Result};
use crate::modular::{gcd, mod_exp};
use crate::primality::{is_probable_prime, passes_small_prime_filter};
use crate::types::PrimeSearchConfig;

/// Blum Blum Shub generator state
///
/// The residue `x` advances by one squaring modulo `n = p * q` per emitted bit and is
/// never rewound. Two generators built from the same `(p, q, seed)` yield the same
/// stream. Share between threads only behind a lock, or clone per caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BbsGenerator {
    p: BigUint,
    q: BigUint,
    n: BigUint,
    x: BigUint,
    config: PrimeSearchConfig,
}

impl BbsGenerator {
    /// Create a generator whose modulus has roughly `modulus_bits` bits
    pub fn new(modulus_bits: u64) -> Result<Self> {
        Self::with_config(modulus_bits, PrimeSearchConfig::default())
    }

    /// Create a generator with a custom prime search configuration
    pub fn with_config(modulus_bits: u64, config: PrimeSearchConfig) -> Result<Self> {
        if modulus_bits < 4 {
            return Err(CryptoError::InvalidParameter(format!(
                "BBS modulus needs at least 4 bits, got {}",
                modulus_bits
            )));
        }

        let p_bits = modulus_bits / 2;
        let q_bits = modulus_bits - p_bits;
        let (p, q) = generate_blum_pair(p_bits, q_bits, &config)?;
        let n = &p * &q;

        let seed = random_coprime_seed(&n, &config)?;
        let x = mod_exp(&seed, &BigUint::from(2u32), &n);

        Ok(BbsGenerator { p, q, n, x, config })
    }

    /// Create a generator from explicit Blum primes and seed
    pub fn from_parts(
        p: BigUint,
        q: BigUint,
        seed: &BigUint,
        config: PrimeSearchConfig,
    ) -> Result<Self> {
        let rounds = config.primality_rounds;
        if !is_blum_prime(&p, rounds) || !is_blum_prime(&q, rounds) {
            return Err(CryptoError::InvalidParameter(
                "p and q must be primes congruent to 3 mod 4".to_string(),
            ));
        }
        if p == q {
            return Err(CryptoError::InvalidParameter(
                "p and q must be distinct".to_string(),
            ));
        }

        let n = &p * &q;
        let mut generator = BbsGenerator {
            p,
            q,
            x: BigUint::one(),
            n,
            config,
        };
        generator.reseed(seed)?;

        Ok(generator)
    }

    /// Restart the stream from `seed`, which must be coprime to `n`
    pub fn reseed(&mut self, seed: &BigUint) -> Result<()> {
        if !gcd(seed, &self.n).is_one() {
            return Err(CryptoError::InvalidSeed);
        }

        self.x = mod_exp(seed, &BigUint::from(2u32), &self.n);
        Ok(())
    }

    /// Produce `count` bits, squaring the state once per bit
    pub fn next_bits(&mut self, count: usize) -> Vec<u8> {
        let mut bits = Vec::with_capacity(count);

        for _ in 0..count {
            self.x = (&self.x * &self.x) % &self.n;
            bits.push(u8::from(self.x.is_odd()));
        }

        bits
    }

    /// Produce an integer of exactly `bit_length` bits whose low bits come from the stream
    pub fn next_integer(&mut self, bit_length: u64) -> Result<BigUint> {
        if bit_length == 0 {
            return Err(CryptoError::InvalidParameter(
                "Bit length must be positive".to_string(),
            ));
        }

        let bits = self.next_bits(bit_length as usize);
        let mut value = BigUint::one() << (bit_length - 1);

        for (i, &bit) in bits.iter().take(bit_length as usize - 1).enumerate() {
            if bit == 1 {
                value.set_bit(i as u64, true);
            }
        }

        Ok(value)
    }

    /// Draw odd candidates of exactly `bit_length` bits from the stream until one is a probable prime
    pub fn next_prime(&mut self, bit_length: u64) -> Result<BigUint> {
        if bit_length < 2 {
            return Err(CryptoError::InvalidParameter(format!(
                "Primes need at least 2 bits, got {}",
                bit_length
            )));
        }

        for _ in 0..self.config.max_attempts {
            let mut candidate = self.next_integer(bit_length)?;
            candidate.set_bit(0, true);

            if !passes_small_prime_filter(&candidate) {
                continue;
            }

            if is_probable_prime(&candidate, self.config.primality_rounds) {
                return Ok(candidate);
            }
        }

        Err(CryptoError::PrimeSearchExhausted {
            bits: bit_length,
            attempts: self.config.max_attempts,
        })
    }

    /// Get the first Blum prime
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Get the second Blum prime
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Get the modulus n = p * q
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// Get the current quadratic residue
    pub fn state(&self) -> &BigUint {
        &self.x
    }

    /// Get the configuration
    pub fn config(&self) -> &PrimeSearchConfig {
        &self.config
    }
}

impl fmt::Display for BbsGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BbsGenerator({} bits)", self.n.bits())
    }
}

/// Random seed in [2, n - 1) coprime to n
fn random_coprime_seed(n: &BigUint, config: &PrimeSearchConfig) -> Result<BigUint> {
    let mut rng = thread_rng();
    let low = BigUint::from(2u32);
    let high = n - BigUint::one();

    for _ in 0..config.max_attempts {
        let r = rng.gen_biguint_range(&low, &high);
        if gcd(&r, n).is_one() {
            return Ok(r);
        }
    }

    Err(CryptoError::InvalidSeed)
}
