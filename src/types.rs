//! Core types and data structures

use num_bigint::BigUint;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Public exponent used when the caller does not choose one
pub const DEFAULT_PUBLIC_EXPONENT: u32 = 65537;

/// Miller-Rabin rounds used when the caller does not choose a count
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 10;

/// Candidate limit for every randomized search loop
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000;

/// ElGamal ciphertext (c1, c2)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ciphertext {
    pub(crate) c1: BigUint,
    pub(crate) c2: BigUint,
}

impl Ciphertext {
    /// Create a new ciphertext
    pub fn new(c1: BigUint, c2: BigUint) -> Self {
        Ciphertext { c1, c2 }
    }

    /// Get the first component (g^k mod p)
    pub fn c1(&self) -> &BigUint {
        &self.c1
    }

    /// Get the second component (m * y^k mod p)
    pub fn c2(&self) -> &BigUint {
        &self.c2
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.c1.to_bytes_be().len() + self.c2.to_bytes_be().len()
    }
}

impl From<(BigUint, BigUint)> for Ciphertext {
    fn from((c1, c2): (BigUint, BigUint)) -> Self {
        Ciphertext { c1, c2 }
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.c1, self.c2)
    }
}

/// Configuration for randomized prime searches
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrimeSearchConfig {
    /// Number of Miller-Rabin rounds for primality testing
    pub primality_rounds: usize,
    /// Maximum number of candidates drawn before giving up
    pub max_attempts: u64,
}

impl PrimeSearchConfig {
    /// Create a configuration with explicit rounds and attempt cap
    pub fn new(primality_rounds: usize, max_attempts: u64) -> Self {
        PrimeSearchConfig {
            primality_rounds,
            max_attempts,
        }
    }
}

impl Default for PrimeSearchConfig {
    fn default() -> Self {
        PrimeSearchConfig {
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
