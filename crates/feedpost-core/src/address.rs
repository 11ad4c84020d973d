//! Content addressing: Blake3 ids for byte buffers and canonical values.
//!
//! Ids are URL-safe, unpadded base64 strings over a 32-byte Blake3 digest.
//! Identical bytes always yield the identical id.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;

use crate::canonical;
use crate::error::PostError;

/// Content-address raw bytes: base64url(blake3(bytes)).
pub fn address_bytes(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(blake3::hash(bytes).as_bytes())
}

/// Content-address a value via its canonical encoding.
///
/// Equivalent to `address_bytes(canonical_bytes(value))`, so two values
/// equal under deep structural equality share an address.
pub fn address_value<T: Serialize>(value: &T) -> Result<String, PostError> {
    Ok(address_bytes(&canonical::canonical_bytes(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_bytes_stable() {
        let data = b"the same bytes";
        assert_eq!(address_bytes(data), address_bytes(data));

        assert_ne!(address_bytes(b"a"), address_bytes(b"b"));
    }

    #[test]
    fn test_address_is_base64url_of_blake3() {
        let data = b"hello world";
        let id = address_bytes(data);

        let digest = URL_SAFE_NO_PAD.decode(&id).unwrap();
        assert_eq!(digest, blake3::hash(data).as_bytes());
        // 32 bytes of digest, unpadded
        assert_eq!(id.len(), 43);
        assert!(!id.contains('='));
        assert!(!id.contains('+'));
        assert!(!id.contains('/'));
    }

    #[test]
    fn test_address_value_independent_of_key_order() {
        let a = json!({ "text": "hi", "alt": "x" });
        let b = json!({ "alt": "x", "text": "hi" });
        assert_eq!(address_value(&a).unwrap(), address_value(&b).unwrap());
    }

    #[test]
    fn test_address_value_matches_manual_pipeline() {
        let value = json!({ "mentions": ["m"], "text": "t" });
        let manual = address_bytes(&canonical::value_bytes(&value));
        assert_eq!(address_value(&value).unwrap(), manual);
    }
}
