//! ElGamal integer and string messages over small textbook parameters

use num_bigint::ToBigUint;
use toycrypt::{encode_string_to_integer, ElGamal, KeyPair};

fn main() {
    println!("=== ElGamal Message Demo ===\n");

    // p = 467 is small enough for an eavesdropper to brute-force x
    let p = 467u32.to_biguint().unwrap();
    let g = 2u32.to_biguint().unwrap();
    let keypair = KeyPair::generate(&p, &g).expect("Failed to generate keys");
    println!("Public key:  {}", keypair.public_key);
    println!("Private key: {}", keypair.private_key);

    let elgamal = ElGamal::new(keypair.public_key.clone());

    let m = elgamal.random_message();
    let ct = elgamal.encrypt(&m).expect("Encryption failed");
    println!("\nmessage = {}, ciphertext = {}", m, ct);
    let decrypted = elgamal
        .decrypt(&ct, &keypair.private_key)
        .expect("Decryption failed");
    println!("decrypted = {}", decrypted);

    if let Some(x) = elgamal.find_private_key(1_000_000) {
        println!("eavesdropper recovered x = {}", x);
    }

    // Strings need a modulus larger than their encoding
    println!("\n--- String message ---");
    let p = 2_305_843_009_213_693_951u64.to_biguint().unwrap(); // 2^61 - 1
    let g = 37u32.to_biguint().unwrap();
    let keypair = KeyPair::generate(&p, &g).expect("Failed to generate keys");
    let elgamal = ElGamal::new(keypair.public_key.clone());

    let message = "hello";
    println!("Encoded as int: {}", encode_string_to_integer(message));
    let ct = elgamal.encrypt_str(message).expect("Encryption failed");
    println!("Ciphertext: {}", ct);
    let text = elgamal
        .decrypt_str(&ct, &keypair.private_key)
        .expect("Decryption failed");
    println!("Decrypted string: {}", text);
}
