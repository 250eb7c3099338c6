//! Stable consensus error codes.
//!
//! Rejections surface a symbolic code, never free text, so every node
//! classifies the same fault identically. Two nodes must agree a transaction
//! is invalid *for the same reason class*, not merely that some error
//! occurred — verdict aggregation carries these codes across the network.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason class for a consensus rejection or processing failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The referenced chain id has no locally registered context.
    ChainNotExist,
    /// Tx-data did not decode as the expected payload type.
    SerializeError,
    /// Duplicate join hash within the same batch.
    ConflictError,
    /// The referenced deposit does not exist.
    DepositNotFound,
    /// The referenced deposit is already withdrawn.
    DepositAlreadyWithdrawn,
    /// The payload's claimed owner does not match the deposit record.
    WithdrawAccountMismatch,
    /// The envelope signature does not verify against the deposit owner.
    InvalidSignature,
    /// The transaction kind is not the one this processor handles.
    TxTypeMismatch,
    /// A storage read failed while validating. Not a consensus verdict about
    /// the transaction itself; the host decides whether to retry the block.
    StorageFailure,
}

impl ErrorCode {
    /// The stable wire/log representation. Never renumber or rename these.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ChainNotExist => "chain_not_exist",
            ErrorCode::SerializeError => "serialize_error",
            ErrorCode::ConflictError => "conflict_error",
            ErrorCode::DepositNotFound => "deposit_not_found",
            ErrorCode::DepositAlreadyWithdrawn => "deposit_withdrawn",
            ErrorCode::WithdrawAccountMismatch => "withdraw_account_mismatch",
            ErrorCode::InvalidSignature => "invalid_signature",
            ErrorCode::TxTypeMismatch => "tx_type_mismatch",
            ErrorCode::StorageFailure => "storage_failure",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
