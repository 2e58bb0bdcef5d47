//! Primality testing: Miller-Rabin, trial division and a small-prime sieve

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::thread_rng;

use crate::modular::mod_exp;

/// Odd primes used to discard candidates before running Miller-Rabin
pub const SMALL_PRIMES: [u32; 17] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61,
];

/// Miller-Rabin primality test with `rounds` random witnesses
///
/// A `false` result is definitive. A `true` result means "probably prime" with a
/// false-positive probability of at most 4^-rounds.
pub fn is_probable_prime(n: &BigUint, rounds: usize) -> bool {
    if n <= &BigUint::one() {
        return false;
    }

    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);

    if n == &two || n == &three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    let mut rng = thread_rng();
    let n_minus_1 = n - BigUint::one();
    let (r, d) = factor_powers_of_two(&n_minus_1);

    'witness: for _ in 0..rounds {
        // a in [2, n - 2]
        let a = rng.gen_biguint_range(&two, &n_minus_1);

        let mut x = mod_exp(&a, &d, n);

        if x.is_one() || x == n_minus_1 {
            continue;
        }

        for _ in 1..r {
            x = mod_exp(&x, &two, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Factor out powers of 2 from n, returning `(r, d)` with `n = 2^r * d` and `d` odd
pub fn factor_powers_of_two(n: &BigUint) -> (u64, BigUint) {
    if n.is_zero() {
        return (0, BigUint::zero());
    }

    let r = n.trailing_zeros().unwrap_or(0);
    (r, n >> r)
}

/// Deterministic trial division, suitable for the small moduli of the demonstrations
pub fn is_prime_trial(n: &BigUint) -> bool {
    if n < &BigUint::from(2u32) {
        return false;
    }
    if n.is_even() {
        return n == &BigUint::from(2u32);
    }

    let mut i = BigUint::from(3u32);
    while &i * &i <= *n {
        if (n % &i).is_zero() {
            return false;
        }
        i += 2u32;
    }

    true
}

/// Returns false if `n` has a factor in [`SMALL_PRIMES`] other than itself
pub fn passes_small_prime_filter(n: &BigUint) -> bool {
    SMALL_PRIMES.iter().all(|&sp| {
        let divisible = (n % sp).is_zero();
        !divisible || n.to_u32() == Some(sp)
    })
}
