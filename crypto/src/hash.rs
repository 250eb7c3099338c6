//! Blake2b-256 hashing.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use tidal_types::TxHash;

type Blake2b256 = Blake2b<U32>;

/// Blake2b-256 of a byte slice.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash a transaction payload (kind tag + wire bytes) into its identity.
pub fn hash_tx_payload(kind_tag: u8, payload: &[u8]) -> TxHash {
    let mut hasher = Blake2b256::new();
    hasher.update([kind_tag]);
    hasher.update(payload);
    TxHash::new(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(blake2b_256(b"tidal"), blake2b_256(b"tidal"));
        assert_ne!(blake2b_256(b"tidal"), blake2b_256(b"tidal2"));
    }

    #[test]
    fn kind_tag_separates_domains() {
        assert_ne!(
            hash_tx_payload(0, b"payload"),
            hash_tx_payload(1, b"payload")
        );
    }
}
