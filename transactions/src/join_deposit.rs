//! Join-deposit (stake) payload.
//!
//! Join processing itself lives outside this component; the payload type
//! exists so the kind set is closed and join transactions are recognisable
//! when they appear in a block.

use crate::TransactionError;
use serde::{Deserialize, Serialize};
use tidal_types::Address;

/// Payload of a stake-join transaction: creates a deposit record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinDeposit {
    /// The staking account; becomes the deposit's owner.
    pub address: Address,
    /// Staked amount in raw units.
    pub amount: u128,
}

impl JoinDeposit {
    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        bincode::deserialize(bytes).map_err(|e| TransactionError::Malformed {
            reason: e.to_string(),
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::serialize(self).map_err(|e| TransactionError::Encode {
            reason: e.to_string(),
        })
    }
}
