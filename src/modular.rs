//! Modular arithmetic: gcd, Bezout coefficients, inverses, exponentiation and CRT

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{CryptoError, Result};

/// Greatest common divisor by iterative Euclid; `gcd(a, 0) = a`
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }

    a
}

/// Extended Euclidean algorithm: returns `(g, x, y)` with `a*x + b*y = g` and `g >= 0`
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    if old_r < BigInt::zero() {
        (-old_r, -old_x, -old_y)
    } else {
        (old_r, old_x, old_y)
    }
}

/// Modular inverse of `a` modulo `m`, as the unique value in `[0, m)`
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(CryptoError::InvalidParameter(
            "Modulus must be non-zero".to_string(),
        ));
    }

    let m_int = BigInt::from(m.clone());
    let (g, x, _) = extended_gcd(&BigInt::from(a % m), &m_int);

    if !g.is_one() {
        return Err(CryptoError::NoInverse {
            value: a.clone(),
            modulus: m.clone(),
        });
    }

    // mod_floor with a positive modulus is never negative
    Ok(x.mod_floor(&m_int).magnitude().clone())
}

/// Modular exponentiation: base^exp mod modulus (modulus must be non-zero)
pub fn mod_exp(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }
    if exp.is_zero() {
        return BigUint::one();
    }
    base.modpow(exp, modulus)
}

/// Euler's totient by trial division
pub fn euler_totient(n: &BigUint) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }

    let mut n = n.clone();
    let mut result = n.clone();
    let mut p = BigUint::from(2u32);

    while &p * &p <= n {
        if (&n % &p).is_zero() {
            while (&n % &p).is_zero() {
                n /= &p;
            }
            let share = &result / &p;
            result -= share;
        }
        p += 1u32;
    }

    if n > BigUint::one() {
        let share = &result / &n;
        result -= share;
    }

    result
}

/// Solve `x = a1 (mod m1)`, `x = a2 (mod m2)` for coprime moduli; result in `[0, m1*m2)`
pub fn crt_pair(a1: &BigUint, m1: &BigUint, a2: &BigUint, m2: &BigUint) -> Result<BigUint> {
    if m1.is_zero() || m2.is_zero() {
        return Err(CryptoError::InvalidParameter(
            "CRT moduli must be non-zero".to_string(),
        ));
    }

    let m1_inv = mod_inverse(m1, m2).map_err(|_| {
        CryptoError::InvalidParameter(format!("CRT moduli {} and {} are not coprime", m1, m2))
    })?;

    let a1 = a1 % m1;
    let diff = ((a2 % m2) + m2 - (&a1 % m2)) % m2;
    let t = (diff * m1_inv) % m2;

    Ok(a1 + m1 * t)
}

/// Fold [`crt_pair`] over a system of congruences, returning `(x, M)` with `M` the product of moduli
pub fn crt_solve(residues: &[BigUint], moduli: &[BigUint]) -> Result<(BigUint, BigUint)> {
    if residues.is_empty() || residues.len() != moduli.len() {
        return Err(CryptoError::InvalidParameter(format!(
            "CRT needs matching non-empty inputs, got {} residues and {} moduli",
            residues.len(),
            moduli.len()
        )));
    }

    if moduli[0].is_zero() {
        return Err(CryptoError::InvalidParameter(
            "CRT moduli must be non-zero".to_string(),
        ));
    }

    let mut x = &residues[0] % &moduli[0];
    let mut m = moduli[0].clone();

    for (a, mi) in residues.iter().zip(moduli.iter()).skip(1) {
        x = crt_pair(&x, &m, a, mi)?;
        m *= mi;
    }

    Ok((x, m))
}
