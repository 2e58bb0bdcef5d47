//! Reversible string <-> integer encoding (big-endian UTF-8 bytes, no length prefix)
//!
//! The byte count is recovered from the integer's bit length, so leading `0x00` bytes
//! do not survive a round trip. Callers that need them must add their own prefix.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{CryptoError, Result};

/// Pack the UTF-8 bytes of `s` into an integer, most significant byte first
pub fn encode_string_to_integer(s: &str) -> BigUint {
    BigUint::from_bytes_be(s.as_bytes())
}

/// Unpack an integer produced by [`encode_string_to_integer`]
pub fn decode_integer_to_string(n: &BigUint) -> Result<String> {
    if n.is_zero() {
        return Ok(String::new());
    }

    String::from_utf8(n.to_bytes_be()).map_err(|e| CryptoError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_encoding() {
        assert_eq!(encode_string_to_integer("A"), BigUint::from(65u32));
        assert_eq!(encode_string_to_integer("Hi"), BigUint::from(0x4869u32));
        assert_eq!(decode_integer_to_string(&BigUint::from(0x4869u32)).unwrap(), "Hi");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode_string_to_integer(""), BigUint::zero());
        assert_eq!(decode_integer_to_string(&BigUint::zero()).unwrap(), "");
    }

    #[test]
    fn test_multibyte_utf8() {
        let s = "héllo, wörld ✓";
        let n = encode_string_to_integer(s);
        assert_eq!(decode_integer_to_string(&n).unwrap(), s);
    }

    #[test]
    fn test_invalid_utf8() {
        // 0xFF never appears in UTF-8
        let result = decode_integer_to_string(&BigUint::from(0xFFu32));
        assert!(matches!(result, Err(CryptoError::Encoding(_))));

        // truncated two-byte sequence
        let result = decode_integer_to_string(&BigUint::from(0xC3u32));
        assert!(matches!(result, Err(CryptoError::Encoding(_))));
    }

    #[test]
    fn test_leading_zero_byte_is_dropped() {
        let n = encode_string_to_integer("\0A");
        assert_eq!(decode_integer_to_string(&n).unwrap(), "A");
    }

    proptest! {
        #[test]
        fn round_trip(s in "[^\\x00]\\PC*") {
            let n = encode_string_to_integer(&s);
            prop_assert_eq!(decode_integer_to_string(&n).unwrap(), s);
        }
    }
}
