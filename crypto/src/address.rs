//! Address derivation and decoding.
//!
//! A TIDAL address is `tdl_` followed by the hex encoding of the account's
//! Ed25519 public key. Embedding the key keeps signature checks free of any
//! account-registry lookup: whoever holds the deposit's owning address can be
//! verified directly against it.

use tidal_types::{Address, PublicKey};

/// Derive the address for a public key.
pub fn derive_address(public_key: &PublicKey) -> Address {
    Address::new(format!("{}{}", Address::PREFIX, hex::encode(public_key.0)))
}

/// Recover the public key embedded in an address.
///
/// Returns `None` if the address body is not 32 hex-encoded bytes.
pub fn decode_address(address: &Address) -> Option<PublicKey> {
    let bytes = hex::decode(address.body()).ok()?;
    let key: [u8; 32] = bytes.try_into().ok()?;
    Some(PublicKey(key))
}

/// Whether an address is structurally valid (prefix + decodable key).
pub fn validate_address(address: &Address) -> bool {
    decode_address(address).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn derive_then_decode() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let addr = derive_address(&kp.public);
        assert!(addr.as_str().starts_with("tdl_"));
        assert_eq!(decode_address(&addr), Some(kp.public));
        assert!(validate_address(&addr));
    }

    #[test]
    fn decode_rejects_short_body() {
        let addr = Address::new("tdl_abcdef");
        assert_eq!(decode_address(&addr), None);
        assert!(!validate_address(&addr));
    }

    #[test]
    fn decode_rejects_non_hex_body() {
        let addr = Address::new(format!("tdl_{}", "zz".repeat(32)));
        assert_eq!(decode_address(&addr), None);
    }
}
