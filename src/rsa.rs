//! RSA key generation, encryption and decryption (plain and CRT)

use num_bigint::BigUint;
use num_traits::One;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bbs::BbsGenerator;
use crate::error::{CryptoError, Result};
use crate::modular::{gcd, mod_exp, mod_inverse};
use crate::primality::{is_prime_trial, is_probable_prime};
use crate::types::{DEFAULT_PRIMALITY_ROUNDS, DEFAULT_PUBLIC_EXPONENT};

/// Caller-supplied primes up to this size are checked by trial division
const TRIAL_DIVISION_BITS: u64 = 32;

/// RSA public key (n, e)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaPublicKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
}

impl RsaPublicKey {
    /// Create a new public key
    pub fn new(n: BigUint, e: BigUint) -> Self {
        RsaPublicKey { n, e }
    }

    /// Get the modulus
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// Get the public exponent
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// Encrypt `m` under this key
    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint> {
        encrypt(m, &self.n, &self.e)
    }
}

impl fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.n, self.e)
    }
}

/// RSA key pair; `d` is derived from `e`, `p` and `q` and never changes afterwards
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsaKeyPair {
    p: BigUint,
    q: BigUint,
    n: BigUint,
    phi: BigUint,
    e: BigUint,
    d: BigUint,
}

impl RsaKeyPair {
    /// Generate a key pair with `e = 65537`, drawing two `prime_bits`-bit primes from `bbs`
    pub fn generate(bbs: &mut BbsGenerator, prime_bits: u64) -> Result<Self> {
        Self::generate_with_exponent(bbs, prime_bits, &BigUint::from(DEFAULT_PUBLIC_EXPONENT))
    }

    /// Generate a key pair with a caller-chosen public exponent
    pub fn generate_with_exponent(
        bbs: &mut BbsGenerator,
        prime_bits: u64,
        e: &BigUint,
    ) -> Result<Self> {
        let p = bbs.next_prime(prime_bits)?;

        let max_attempts = bbs.config().max_attempts;
        for _ in 0..max_attempts {
            let q = bbs.next_prime(prime_bits)?;
            if q != p {
                return Self::derive(p, q, e);
            }
        }

        Err(CryptoError::PrimeSearchExhausted {
            bits: prime_bits,
            attempts: max_attempts,
        })
    }

    /// Build a key pair from explicit primes
    ///
    /// # Example
    ///
    /// ```rust
    /// use num_bigint::BigUint;
    /// use toycrypt::RsaKeyPair;
    ///
    /// let keys = RsaKeyPair::from_primes(61u32.into(), 53u32.into(), &17u32.into()).unwrap();
    /// assert_eq!(keys.private_exponent(), &BigUint::from(2753u32));
    /// ```
    pub fn from_primes(p: BigUint, q: BigUint, e: &BigUint) -> Result<Self> {
        if !is_supplied_prime(&p) || !is_supplied_prime(&q) {
            return Err(CryptoError::InvalidParameter(
                "p and q must be prime".to_string(),
            ));
        }
        if p == q {
            return Err(CryptoError::InvalidParameter(
                "p and q must be distinct".to_string(),
            ));
        }

        Self::derive(p, q, e)
    }

    fn derive(p: BigUint, q: BigUint, e: &BigUint) -> Result<Self> {
        // p = 2 gives d mod (p - 1) = 0, which CRT decryption cannot use
        if p == two() || q == two() {
            return Err(CryptoError::InvalidParameter(
                "RSA primes must be odd".to_string(),
            ));
        }

        let n = &p * &q;
        let phi = (&p - 1u32) * (&q - 1u32);

        if e <= &BigUint::one() || e >= &phi {
            return Err(CryptoError::InvalidParameter(format!(
                "Public exponent must satisfy 1 < e < phi(n) = {}",
                phi
            )));
        }
        if !gcd(e, &phi).is_one() {
            return Err(CryptoError::InvalidExponent);
        }

        let d = mod_inverse(e, &phi)?;

        Ok(RsaKeyPair {
            p,
            q,
            n,
            phi,
            e: e.clone(),
            d,
        })
    }

    /// Get the public half of the key pair
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey::new(self.n.clone(), self.e.clone())
    }

    /// Get the first prime factor
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Get the second prime factor
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Get the modulus n = p * q
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// Get phi(n) = (p - 1)(q - 1)
    pub fn totient(&self) -> &BigUint {
        &self.phi
    }

    /// Get the public exponent e
    pub fn public_exponent(&self) -> &BigUint {
        &self.e
    }

    /// Get the private exponent d
    pub fn private_exponent(&self) -> &BigUint {
        &self.d
    }

    /// Get the bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt `m` with the public exponent
    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint> {
        encrypt(m, &self.n, &self.e)
    }

    /// Decrypt `c` with the private exponent
    pub fn decrypt(&self, c: &BigUint) -> Result<BigUint> {
        decrypt(c, &self.n, &self.d)
    }

    /// Decrypt using the CRT split over p and q
    pub fn decrypt_crt(&self, c: &BigUint) -> Result<BigUint> {
        decrypt_crt(c, &self.d, &self.p, &self.q)
    }
}

impl fmt::Display for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaKeyPair({} bits)", self.bit_size())
    }
}

/// c = m^e mod n, for `m` in `[0, n)`
pub fn encrypt(m: &BigUint, n: &BigUint, e: &BigUint) -> Result<BigUint> {
    if m >= n {
        return Err(CryptoError::MessageOutOfRange);
    }

    Ok(mod_exp(m, e, n))
}

/// m = c^d mod n, for `c` in `[0, n)`
pub fn decrypt(c: &BigUint, n: &BigUint, d: &BigUint) -> Result<BigUint> {
    if c >= n {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    Ok(mod_exp(c, d, n))
}

fn two() -> BigUint {
    BigUint::from(2u32)
}

fn is_supplied_prime(n: &BigUint) -> bool {
    if n.bits() <= TRIAL_DIVISION_BITS {
        is_prime_trial(n)
    } else {
        is_probable_prime(n, DEFAULT_PRIMALITY_ROUNDS)
    }
}

/// CRT decryption; agrees with [`decrypt`] for every `c` in `[0, p*q)`
pub fn decrypt_crt(c: &BigUint, d: &BigUint, p: &BigUint, q: &BigUint) -> Result<BigUint> {
    if p <= &two() || q <= &two() {
        return Err(CryptoError::InvalidParameter(
            "CRT factors must be odd primes".to_string(),
        ));
    }

    let n = p * q;
    if c >= &n {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    let dp = d % (p - 1u32);
    let dq = d % (q - 1u32);

    let mp = mod_exp(c, &dp, p);
    let mq = mod_exp(c, &dq, q);

    let q_inv = mod_inverse(q, p)?;
    // (mp - mq) mod p without leaving the unsigned domain
    let diff = (&mp + p - (&mq % p)) % p;
    let h = (q_inv * diff) % p;

    Ok((mq + h * q) % n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::{RandBigInt, ToBigUint};
    use rand::thread_rng;

    fn big(n: u64) -> BigUint {
        n.to_biguint().unwrap()
    }

    fn textbook() -> RsaKeyPair {
        RsaKeyPair::from_primes(big(61), big(53), &big(17)).unwrap()
    }

    #[test]
    fn test_textbook_parameters() {
        let keys = textbook();
        assert_eq!(keys.modulus(), &big(3233));
        assert_eq!(keys.totient(), &big(3120));
        assert_eq!(keys.private_exponent(), &big(2753));
        assert_eq!((keys.public_exponent() * keys.private_exponent()) % keys.totient(), big(1));
    }

    #[test]
    fn test_textbook_round_trip() {
        let c = encrypt(&big(65), &big(3233), &big(17)).unwrap();
        assert_eq!(c, big(2790));
        assert_eq!(decrypt(&big(2790), &big(3233), &big(2753)).unwrap(), big(65));
        assert_eq!(decrypt_crt(&big(2790), &big(2753), &big(61), &big(53)).unwrap(), big(65));
    }

    #[test]
    fn test_crt_matches_plain_decryption_for_every_ciphertext() {
        let keys = textbook();
        for c in 0u64..3233 {
            let c = big(c);
            assert_eq!(keys.decrypt(&c).unwrap(), keys.decrypt_crt(&c).unwrap());
        }
    }

    #[test]
    fn test_range_errors() {
        let keys = textbook();
        assert_eq!(keys.encrypt(&big(3233)), Err(CryptoError::MessageOutOfRange));
        assert_eq!(keys.decrypt(&big(5000)), Err(CryptoError::CiphertextOutOfRange));
        assert_eq!(keys.decrypt_crt(&big(3233)), Err(CryptoError::CiphertextOutOfRange));
        assert_eq!(keys.encrypt(&big(0)).unwrap(), big(0));
    }

    #[test]
    fn test_from_primes_validation() {
        // gcd(3, 3120) = 3
        assert_eq!(
            RsaKeyPair::from_primes(big(61), big(53), &big(3)),
            Err(CryptoError::InvalidExponent)
        );
        assert!(matches!(
            RsaKeyPair::from_primes(big(61), big(53), &big(1)),
            Err(CryptoError::InvalidParameter(_))
        ));
        assert!(matches!(
            RsaKeyPair::from_primes(big(61), big(53), &big(65537)),
            Err(CryptoError::InvalidParameter(_))
        ));
        assert!(matches!(
            RsaKeyPair::from_primes(big(61), big(61), &big(17)),
            Err(CryptoError::InvalidParameter(_))
        ));
        assert!(matches!(
            RsaKeyPair::from_primes(big(60), big(53), &big(17)),
            Err(CryptoError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_generated_keys() {
        let mut bbs = BbsGenerator::new(64).unwrap();
        let keys = RsaKeyPair::generate(&mut bbs, 32).unwrap();

        assert_ne!(keys.p(), keys.q());
        assert_eq!(keys.p().bits(), 32);
        assert_eq!(keys.q().bits(), 32);
        assert_eq!(keys.public_exponent(), &big(65537));
        assert_eq!((keys.public_exponent() * keys.private_exponent()) % keys.totient(), big(1));

        let mut rng = thread_rng();
        for _ in 0..20 {
            let m = rng.gen_biguint_below(keys.modulus());
            let c = keys.public_key().encrypt(&m).unwrap();
            assert_eq!(keys.decrypt(&c).unwrap(), m);
            assert_eq!(keys.decrypt_crt(&c).unwrap(), m);
        }
    }

    fn fixed_generator() -> BbsGenerator {
        BbsGenerator::from_parts(
            big(4_294_967_291),
            big(4_294_967_279),
            &big(987_654_323),
            crate::types::PrimeSearchConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_generated_keys_with_exponent() {
        let mut bbs = fixed_generator();
        let keys = RsaKeyPair::generate_with_exponent(&mut bbs, 24, &big(17)).unwrap();

        assert_eq!(keys.p(), &big(10_482_107));
        assert_eq!(keys.q(), &big(13_060_549));
        assert_eq!(keys.public_exponent(), &big(17));
        assert_eq!(keys.private_exponent(), &big(32_212_246_718_609));
    }

    #[test]
    fn test_generated_keys_reject_non_coprime_exponent() {
        // 13_060_549 - 1 is divisible by 3
        assert_eq!(
            RsaKeyPair::generate_with_exponent(&mut fixed_generator(), 24, &big(3)),
            Err(CryptoError::InvalidExponent)
        );
        // phi(n) is always even
        assert_eq!(
            RsaKeyPair::generate_with_exponent(&mut fixed_generator(), 24, &big(2)),
            Err(CryptoError::InvalidExponent)
        );
    }

    #[test]
    fn test_even_prime_rejected() {
        assert!(matches!(
            RsaKeyPair::from_primes(big(2), big(11), &big(3)),
            Err(CryptoError::InvalidParameter(_))
        ));
        assert!(matches!(
            decrypt_crt(&big(4), &big(7), &big(2), &big(11)),
            Err(CryptoError::InvalidParameter(_))
        ));
        assert!(matches!(
            decrypt_crt(&big(4), &big(7), &big(11), &big(2)),
            Err(CryptoError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_crt_matches_plain_decryption_for_small_odd_primes() {
        // 3 * 11: p - 1 = 2 is the smallest usable CRT exponent modulus
        let keys = RsaKeyPair::from_primes(big(3), big(11), &big(3)).unwrap();
        for c in 0u64..33 {
            let c = big(c);
            assert_eq!(keys.decrypt(&c).unwrap(), keys.decrypt_crt(&c).unwrap());
        }
    }

    #[test]
    fn test_large_primes_use_miller_rabin() {
        // 2^61 - 1 and 2^31 - 1
        let m61 = (BigUint::one() << 61u32) - 1u32;
        let keys = RsaKeyPair::from_primes(m61, big(2_147_483_647), &big(65537)).unwrap();
        assert_eq!(keys.bit_size(), 92);
    }
}
