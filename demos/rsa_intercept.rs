//! RSA sender / receiver / interceptor walkthrough

use num_bigint::ToBigUint;
use toycrypt::{default_smoothness_bound, recover_rsa_key, BbsGenerator, RsaKeyPair};

fn main() {
    println!("=== RSA Interception Demo ===\n");

    // Receiver: keys from a BBS prime source
    println!("B: generating 32-bit primes from a 64-bit BBS generator...");
    let mut bbs = BbsGenerator::new(64).expect("Failed to build generator");
    let keys = RsaKeyPair::generate(&mut bbs, 32).expect("Failed to generate keys");
    println!("✓ Public key (n, e): {}", keys.public_key());

    // Sender
    let m = 424_242u32.to_biguint().unwrap();
    let c = keys.public_key().encrypt(&m).expect("Encryption failed");
    println!("A: encrypting m = {} -> c = {}", m, c);

    let plain = keys.decrypt(&c).expect("Decryption failed");
    let fast = keys.decrypt_crt(&c).expect("Decryption failed");
    println!("B: decrypted {} (CRT path: {})", plain, fast);

    // Interceptor against the generated key
    let n = keys.modulus();
    let bound = default_smoothness_bound(n).min(100_000);
    println!("\nC: trying Pollard p-1 on n = {} with B = {}", n, bound);
    match recover_rsa_key(n, keys.public_exponent(), bound) {
        Ok(Some(recovered)) => println!(
            "C: factored n, d = {}, m = {}",
            recovered.private_exponent(),
            recovered.decrypt(&c).expect("Decryption failed")
        ),
        Ok(None) => println!("C: no factor found within the bound"),
        Err(e) => println!("C: {}", e),
    }

    // Interceptor against the textbook key
    println!("\n--- Textbook modulus ---");
    let small = RsaKeyPair::from_primes(
        61u32.to_biguint().unwrap(),
        53u32.to_biguint().unwrap(),
        &17u32.to_biguint().unwrap(),
    )
    .expect("Failed to build keys");
    let c = small
        .encrypt(&65u32.to_biguint().unwrap())
        .expect("Encryption failed");
    println!("Public key {}, ciphertext {}", small.public_key(), c);

    let n = small.modulus();
    match recover_rsa_key(n, small.public_exponent(), default_smoothness_bound(n)) {
        Ok(Some(recovered)) => println!(
            "C: p = {}, q = {}, d = {}, m = {}",
            recovered.p(),
            recovered.q(),
            recovered.private_exponent(),
            recovered.decrypt(&c).expect("Decryption failed")
        ),
        Ok(None) => println!("C: no factor found"),
        Err(e) => println!("C: {}", e),
    }
}
