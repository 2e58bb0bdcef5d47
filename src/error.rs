//! Error types for the toycrypt library

use num_bigint::BigUint;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("No modular inverse for {value} mod {modulus}")]
    NoInverse { value: BigUint, modulus: BigUint },

    #[error("Message out of range for modulus")]
    MessageOutOfRange,

    #[error("Ciphertext out of range for modulus")]
    CiphertextOutOfRange,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Public exponent is not coprime to phi(n)")]
    InvalidExponent,

    #[error("Seed must be coprime to the BBS modulus")]
    InvalidSeed,

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Failed to find a {bits}-bit prime after {attempts} attempts")]
    PrimeSearchExhausted { bits: u64, attempts: u64 },
}
