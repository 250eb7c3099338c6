//! Chain identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one chain in a multi-chain deployment.
///
/// Every per-chain context (config, stores, logger fields) is keyed by this
/// id. An id with no locally registered context is a normal condition, not an
/// error — chains are configured independently per node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u16);

impl ChainId {
    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for ChainId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}
