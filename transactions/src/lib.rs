//! Transaction envelope and staking payload types.
//!
//! A [`Transaction`] is the envelope consensus code handles: an identity
//! hash, a kind tag, the kind-specific wire payload, and the signer's
//! signature over the hash. Payload modules own their wire codecs:
//! - **JoinDeposit** — stake funds, creating a deposit record
//! - **CancelDeposit** — withdraw a previously created deposit

pub mod cancel_deposit;
pub mod error;
pub mod join_deposit;

pub use cancel_deposit::CancelDeposit;
pub use error::TransactionError;
pub use join_deposit::JoinDeposit;

use serde::{Deserialize, Serialize};
use tidal_types::{Signature, Timestamp, TxHash};

/// The closed set of transaction kinds this component recognises.
///
/// Dispatch is a table over this enum (kind → processor); kinds without a
/// locally registered processor are simply not handled here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    JoinDeposit,
    CancelDeposit,
}

impl TxKind {
    /// Stable single-byte tag, also the hash-domain separator.
    pub fn tag(&self) -> u8 {
        match self {
            TxKind::JoinDeposit => 4,
            TxKind::CancelDeposit => 5,
        }
    }
}

/// A transaction as it arrives in a block: envelope fields plus the opaque
/// kind-specific payload. Immutable once parsed from the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: TxHash,
    pub kind: TxKind,
    /// Kind-specific wire bytes; decoded on demand by the processor that
    /// owns the kind.
    pub payload: Vec<u8>,
    pub timestamp: Timestamp,
    /// Signature over `hash` by the account authorizing the operation.
    pub signature: Signature,
}
