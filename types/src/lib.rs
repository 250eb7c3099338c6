//! Fundamental types for the TIDAL protocol.
//!
//! This crate defines the core value types shared across every other crate in
//! the workspace: chain ids, hashes, addresses, keys, timestamps, and block
//! headers. It carries no business logic.

pub mod address;
pub mod chain_id;
pub mod hash;
pub mod header;
pub mod keys;
pub mod time;

pub use address::Address;
pub use chain_id::ChainId;
pub use hash::{BlockHash, TxHash};
pub use header::BlockHeader;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use time::Timestamp;
