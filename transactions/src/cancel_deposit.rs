//! Cancel-deposit (withdraw) payload.

use crate::TransactionError;
use serde::{Deserialize, Serialize};
use tidal_types::{Address, TxHash};

/// Payload of a withdraw transaction: deactivates an existing deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelDeposit {
    /// The deposit being withdrawn, by the identity of the transaction that
    /// created it.
    pub join_tx_hash: TxHash,
    /// The account claiming ownership of the deposit. Must match the stored
    /// record's owner; the envelope signature is checked against it.
    pub address: Address,
}

impl CancelDeposit {
    /// Decode from tx-data wire bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        bincode::deserialize(bytes).map_err(|e| TransactionError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Encode to tx-data wire bytes.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::serialize(self).map_err(|e| TransactionError::Encode {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_truncated_bytes() {
        let payload = CancelDeposit {
            join_tx_hash: TxHash::new([1; 32]),
            address: Address::new("tdl_owner"),
        };
        let bytes = payload.encode().unwrap();
        assert!(CancelDeposit::decode(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn decode_recovers_fields() {
        let payload = CancelDeposit {
            join_tx_hash: TxHash::new([7; 32]),
            address: Address::new("tdl_abc123"),
        };
        let decoded = CancelDeposit::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded, payload);
    }
}
