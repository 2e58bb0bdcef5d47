//! Core ElGamal encryption and decryption operations

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::thread_rng;

use crate::encoding::{decode_integer_to_string, encode_string_to_integer};
use crate::error::{CryptoError, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::modular::{mod_exp, mod_inverse};
use crate::types::Ciphertext;

/// ElGamal encryption over a fixed public key
#[derive(Clone, Debug)]
pub struct ElGamal {
    pub public_key: PublicKey,
}

impl ElGamal {
    /// Create a new ElGamal instance
    pub fn new(public_key: PublicKey) -> Self {
        ElGamal { public_key }
    }

    /// Encrypt a plaintext message `m` with `0 < m < p`, using a fresh ephemeral key
    pub fn encrypt(&self, plaintext: &BigUint) -> Result<Ciphertext> {
        self.encrypt_with_randomness(plaintext, None)
    }

    /// Encrypt with specific randomness (for testing)
    ///
    /// Reusing `k` across messages leaks the ratio of the plaintexts; only pass
    /// `Some(k)` for reproducible test vectors.
    pub fn encrypt_with_randomness(
        &self,
        plaintext: &BigUint,
        randomness: Option<BigUint>,
    ) -> Result<Ciphertext> {
        self.public_key.validate()?;
        let p = &self.public_key.p;

        if plaintext.is_zero() || plaintext >= p {
            return Err(CryptoError::MessageOutOfRange);
        }

        let k = match randomness {
            Some(k) => {
                if k.is_zero() || k > p - 2u32 {
                    return Err(CryptoError::InvalidParameter(
                        "Ephemeral key k must be in range [1, p - 2]".to_string(),
                    ));
                }
                k
            }
            None => thread_rng().gen_biguint_range(&BigUint::one(), &(p - 1u32)),
        };

        let c1 = mod_exp(&self.public_key.g, &k, p);
        let shared = mod_exp(&self.public_key.y, &k, p);
        let c2 = (plaintext * shared) % p;

        Ok(Ciphertext::new(c1, c2))
    }

    /// Decrypt a ciphertext using the private key
    pub fn decrypt(&self, ciphertext: &Ciphertext, private_key: &PrivateKey) -> Result<BigUint> {
        if private_key.p != self.public_key.p {
            return Err(CryptoError::InvalidParameter(
                "Private key belongs to a different modulus".to_string(),
            ));
        }

        decrypt(ciphertext, private_key)
    }

    /// Encrypt a string through its big-endian UTF-8 encoding
    pub fn encrypt_str(&self, message: &str) -> Result<Ciphertext> {
        self.encrypt(&encode_string_to_integer(message))
    }

    /// Decrypt a ciphertext produced by [`ElGamal::encrypt_str`]
    pub fn decrypt_str(&self, ciphertext: &Ciphertext, private_key: &PrivateKey) -> Result<String> {
        let m = self.decrypt(ciphertext, private_key)?;
        decode_integer_to_string(&m)
    }

    /// A uniformly random message in `[1, p - 1]`
    pub fn random_message(&self) -> BigUint {
        thread_rng().gen_biguint_range(&BigUint::one(), &self.public_key.p)
    }

    /// Recover a secret exponent from the public key by exhaustive search
    ///
    /// Only feasible for toy moduli: gives up (`None`) when `p > max_attempts`.
    /// Returns the smallest `x >= 1` with `g^x = y (mod p)`.
    pub fn find_private_key(&self, max_attempts: u64) -> Option<BigUint> {
        let PublicKey { p, g, y } = &self.public_key;

        if p > &BigUint::from(max_attempts) {
            return None;
        }

        let mut x = BigUint::one();
        let mut current = g % p;

        while &x < p {
            if &current == y {
                return Some(x);
            }
            current = (current * g) % p;
            x += 1u32;
        }

        None
    }
}

/// Decrypt `(c1, c2)`: `m = c2 * (c1^x)^-1 mod p`
pub fn decrypt(ciphertext: &Ciphertext, private_key: &PrivateKey) -> Result<BigUint> {
    let p = &private_key.p;
    if p <= &BigUint::from(2u32) {
        return Err(CryptoError::InvalidParameter(
            "Modulus p must be > 2".to_string(),
        ));
    }

    let s = mod_exp(&ciphertext.c1, &private_key.x, p);
    let s_inv = mod_inverse(&s, p)?;

    Ok((&ciphertext.c2 * s_inv) % p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyPair;
    use num_bigint::ToBigUint;

    fn big(n: u64) -> BigUint {
        n.to_biguint().unwrap()
    }

    fn textbook() -> (ElGamal, KeyPair) {
        let keypair = KeyPair::from_components(big(467), big(2), big(153)).unwrap();
        (ElGamal::new(keypair.public_key.clone()), keypair)
    }

    #[test]
    fn test_encryption_decryption() {
        let keypair = KeyPair::generate(&big(467), &big(2)).unwrap();
        let elgamal = ElGamal::new(keypair.public_key.clone());

        let plaintext = 42u32.to_biguint().unwrap();
        let ciphertext = elgamal.encrypt(&plaintext).unwrap();
        let decrypted = elgamal.decrypt(&ciphertext, &keypair.private_key).unwrap();

        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn test_textbook_vector() {
        let (elgamal, keypair) = textbook();
        assert_eq!(elgamal.public_key.public_component(), &big(224));

        let ct = elgamal
            .encrypt_with_randomness(&big(331), Some(big(197)))
            .unwrap();
        assert_eq!(ct, Ciphertext::new(big(87), big(57)));
        assert_eq!(decrypt(&ct, &keypair.private_key).unwrap(), big(331));
    }

    #[test]
    fn test_every_message_round_trips() {
        let (elgamal, keypair) = textbook();
        for m in 1u64..467 {
            let ct = elgamal.encrypt(&big(m)).unwrap();
            assert_eq!(elgamal.decrypt(&ct, &keypair.private_key).unwrap(), big(m));
        }
    }

    #[test]
    fn test_fresh_randomness_per_encryption() {
        let keypair = KeyPair::generate(&big(2_147_483_647), &big(7)).unwrap();
        let elgamal = ElGamal::new(keypair.public_key.clone());
        let m = big(123_456_789);

        let ct1 = elgamal.encrypt(&m).unwrap();
        let ct2 = elgamal.encrypt(&m).unwrap();

        // Ciphertexts should be different
        assert_ne!(ct1, ct2);

        // But decrypt to the same plaintext
        assert_eq!(elgamal.decrypt(&ct1, &keypair.private_key).unwrap(), m);
        assert_eq!(elgamal.decrypt(&ct2, &keypair.private_key).unwrap(), m);
    }

    #[test]
    fn test_message_range() {
        let (elgamal, _) = textbook();
        assert_eq!(elgamal.encrypt(&big(0)), Err(CryptoError::MessageOutOfRange));
        assert_eq!(elgamal.encrypt(&big(467)), Err(CryptoError::MessageOutOfRange));
        assert!(elgamal.encrypt(&big(466)).is_ok());
    }

    #[test]
    fn test_invalid_randomness() {
        let (elgamal, _) = textbook();
        assert!(elgamal.encrypt_with_randomness(&big(5), Some(big(0))).is_err());
        assert!(elgamal.encrypt_with_randomness(&big(5), Some(big(466))).is_err());
        assert!(elgamal.encrypt_with_randomness(&big(5), Some(big(465))).is_ok());
    }

    #[test]
    fn test_string_messages() {
        let keypair = KeyPair::generate(&big(2_147_483_647), &big(7)).unwrap();
        let elgamal = ElGamal::new(keypair.public_key.clone());

        let ct = elgamal.encrypt_str("Hi!").unwrap();
        assert_eq!(elgamal.decrypt_str(&ct, &keypair.private_key).unwrap(), "Hi!");

        // "Hello" needs 40 bits and does not fit under a 31-bit prime
        assert_eq!(elgamal.encrypt_str("Hello"), Err(CryptoError::MessageOutOfRange));
        assert_eq!(elgamal.encrypt_str(""), Err(CryptoError::MessageOutOfRange));
    }

    #[test]
    fn test_decrypt_with_zero_c1() {
        let (_, keypair) = textbook();
        let ct = Ciphertext::new(big(0), big(10));
        assert!(matches!(
            decrypt(&ct, &keypair.private_key),
            Err(CryptoError::NoInverse { .. })
        ));
    }

    #[test]
    fn test_mismatched_private_key() {
        let (elgamal, _) = textbook();
        let other = KeyPair::from_components(big(503), big(5), big(10)).unwrap();
        let ct = elgamal.encrypt(&big(7)).unwrap();
        assert!(elgamal.decrypt(&ct, &other.private_key).is_err());
    }

    #[test]
    fn test_random_message_range() {
        let (elgamal, _) = textbook();
        for _ in 0..200 {
            let m = elgamal.random_message();
            assert!(m >= big(1) && m < big(467));
        }
    }

    #[test]
    fn test_find_private_key() {
        let (elgamal, keypair) = textbook();
        let x = elgamal.find_private_key(1_000_000).unwrap();
        assert_eq!(
            mod_exp(&big(2), &x, &big(467)),
            keypair.public_key.public_component().clone()
        );
        // 2 is a primitive root mod 467, so the exponent is unique
        assert_eq!(x, big(153));

        assert_eq!(elgamal.find_private_key(100), None);
    }
}
