//! Cryptographic primitives for the TIDAL protocol.
//!
//! - **Ed25519** for signing and signature verification
//! - **Blake2b-256** for transaction and block hashing
//! - Address derivation with the `tdl_` prefix; the address body is the hex
//!   encoding of the public key, so the verifying key is recoverable from an
//!   address without a lookup.

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{decode_address, derive_address, validate_address};
pub use hash::{blake2b_256, hash_tx_payload};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
