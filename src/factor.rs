//! Pollard's p-1 factorization and the RSA key recovery built on it

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive};

use crate::error::Result;
use crate::modular::{gcd, mod_exp};
use crate::rsa::RsaKeyPair;

/// Pollard's p-1 with smoothness bound `bound`
///
/// Returns a nontrivial factor of `n`, or `None` when no factor of `n` has a
/// `bound`-smooth `p - 1`. Failure is an expected outcome, not an error.
pub fn factor_pollard_p1(n: &BigUint, bound: u64) -> Option<BigUint> {
    if n < &BigUint::from(4u32) {
        return None;
    }
    if n.is_even() {
        return Some(BigUint::from(2u32));
    }

    let mut a = BigUint::from(2u32);

    for j in 2..=bound {
        a = mod_exp(&a, &BigUint::from(j), n);

        // a stays 1 from here on
        if a.is_one() {
            return None;
        }

        let d = gcd(&(&a - 1u32), n);
        if d > BigUint::one() && &d < n {
            return Some(d);
        }
    }

    None
}

/// Search bound used against intercepted moduli: floor(sqrt(n) / 2)
pub fn default_smoothness_bound(n: &BigUint) -> u64 {
    (n.sqrt() / 2u32).to_u64().unwrap_or(u64::MAX)
}

/// Factor a public modulus and rebuild the full key pair from `(n, e)`
///
/// `Ok(None)` means the factorization failed within `bound`. An even modulus
/// factors as `2 * q` and is refused with `InvalidParameter`.
pub fn recover_rsa_key(n: &BigUint, e: &BigUint, bound: u64) -> Result<Option<RsaKeyPair>> {
    let p = match factor_pollard_p1(n, bound) {
        Some(p) => p,
        None => return Ok(None),
    };
    let q = n / &p;

    RsaKeyPair::from_primes(p, q, e).map(Some)
}
