//! # Toy Public-Key Cryptography Library
//!
//! Number-theoretic building blocks for classroom public-key demonstrations:
//! - Modular arithmetic (extended Euclid, inverses, exponentiation, CRT)
//! - Miller-Rabin primality testing and Blum prime generation
//! - A Blum Blum Shub bit generator that doubles as a prime source
//! - RSA with an optional CRT decryption path
//! - ElGamal with a string <-> integer message encoding
//! - Pollard's p-1 factorization for breaking undersized RSA moduli
//!
//! Everything here is toy-scale (32-64 bit moduli) and variable-time. Do not use it
//! to protect real data.
//!
//! ## Example
//!
//! ```rust
//! use num_bigint::BigUint;
//! use toycrypt::{BbsGenerator, RsaKeyPair};
//!
//! let mut bbs = BbsGenerator::new(64).unwrap();
//! let keys = RsaKeyPair::generate(&mut bbs, 32).unwrap();
//!
//! let m = BigUint::from(42u32);
//! let c = keys.public_key().encrypt(&m).unwrap();
//! assert_eq!(keys.decrypt_crt(&c).unwrap(), m);
//! ```

pub mod bbs;
pub mod blum;
pub mod elgamal;
pub mod encoding;
pub mod error;
pub mod factor;
pub mod keys;
pub mod modular;
pub mod primality;
pub mod rsa;
pub mod types;

// Re-export main types for convenience
pub use bbs::BbsGenerator;
pub use elgamal::ElGamal;
pub use encoding::{decode_integer_to_string, encode_string_to_integer};
pub use error::{CryptoError, Result};
pub use factor::{default_smoothness_bound, factor_pollard_p1, recover_rsa_key};
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use primality::is_probable_prime;
pub use rsa::{RsaKeyPair, RsaPublicKey};
pub use types::{
    Ciphertext, PrimeSearchConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_PRIMALITY_ROUNDS,
    DEFAULT_PUBLIC_EXPONENT,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
