//! Block header — the slice of block metadata this component consumes.

use crate::{BlockHash, Timestamp};
use serde::{Deserialize, Serialize};

/// Header of the block whose transactions are being validated, committed, or
/// rolled back. Commit stamps `height` onto withdrawn deposits; rollback
/// requires the recorded height to match it exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub hash: BlockHash,
    pub height: u64,
    pub timestamp: Timestamp,
}

impl BlockHeader {
    pub fn new(hash: BlockHash, height: u64, timestamp: Timestamp) -> Self {
        Self {
            hash,
            height,
            timestamp,
        }
    }
}
