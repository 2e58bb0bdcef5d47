//! ElGamal key generation and management

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::thread_rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};
use crate::modular::mod_exp;

/// ElGamal public key
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PublicKey {
    pub(crate) p: BigUint, // Prime modulus
    pub(crate) g: BigUint, // Generator
    pub(crate) y: BigUint, // g^x mod p
}

impl PublicKey {
    /// Create a new public key
    pub fn new(p: BigUint, g: BigUint, y: BigUint) -> Self {
        PublicKey { p, g, y }
    }

    /// Get the prime modulus
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Get the generator
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// Get the public component (g^x mod p)
    pub fn public_component(&self) -> &BigUint {
        &self.y
    }

    /// Get the bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.p.bits()
    }

    /// Validate the public key
    pub fn validate(&self) -> Result<()> {
        validate_domain(&self.p, &self.g)?;

        // y = g^x mod p is a unit, so never 0
        if self.y.is_zero() || self.y >= self.p {
            return Err(CryptoError::InvalidParameter(
                "Public component y must be in range [1, p)".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p={}, g={}, y={}", self.p, self.g, self.y)
    }
}

/// ElGamal private key
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrivateKey {
    pub(crate) p: BigUint,
    pub(crate) g: BigUint,
    pub(crate) x: BigUint, // Secret exponent
}

impl PrivateKey {
    /// Create a new private key
    pub fn new(p: BigUint, g: BigUint, x: BigUint) -> Self {
        PrivateKey { p, g, x }
    }

    /// Get the prime modulus
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Get the generator
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// Get the secret exponent
    pub fn secret_exponent(&self) -> &BigUint {
        &self.x
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(***)")
    }
}

/// ElGamal key pair
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair over caller-supplied domain parameters
    ///
    /// The secret exponent is drawn uniformly from `[1, p - 2]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use toycrypt::KeyPair;
    ///
    /// let keypair = KeyPair::generate(&467u32.into(), &2u32.into()).unwrap();
    /// assert!(keypair.public_key.validate().is_ok());
    /// ```
    pub fn generate(p: &BigUint, g: &BigUint) -> Result<Self> {
        validate_domain(p, g)?;

        let mut rng = thread_rng();
        let x = rng.gen_biguint_range(&BigUint::one(), &(p - 1u32));

        Self::from_components(p.clone(), g.clone(), x)
    }

    /// Create a key pair from existing components
    pub fn from_components(p: BigUint, g: BigUint, x: BigUint) -> Result<Self> {
        validate_domain(&p, &g)?;

        if x.is_zero() || x > &p - 2u32 {
            return Err(CryptoError::InvalidParameter(
                "Secret exponent x must be in range [1, p - 2]".to_string(),
            ));
        }

        let y = mod_exp(&g, &x, &p);
        let public_key = PublicKey {
            p: p.clone(),
            g: g.clone(),
            y,
        };
        let private_key = PrivateKey { p, g, x };

        public_key.validate()?;

        Ok(KeyPair {
            public_key,
            private_key,
        })
    }

    /// Get the bit size of the keys
    pub fn bit_size(&self) -> u64 {
        self.public_key.bit_size()
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({} bits)", self.bit_size())
    }
}

/// Check `p > 2` and `1 < g < p`
fn validate_domain(p: &BigUint, g: &BigUint) -> Result<()> {
    if p <= &BigUint::from(2u32) {
        return Err(CryptoError::InvalidParameter(
            "Modulus p must be > 2".to_string(),
        ));
    }

    if g <= &BigUint::one() || g >= p {
        return Err(CryptoError::InvalidParameter(
            "Generator g must be in range (1, p)".to_string(),
        ));
    }

    Ok(())
}
