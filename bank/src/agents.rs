//! Ranked consensus agents — the input to membership derivation.

use crate::BankError;
use tidal_consensus::Chain;
use tidal_types::Address;

/// One consensus agent as ranked by the staking module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedAgent {
    /// The agent's identity address.
    pub agent_address: Address,
    /// The agent's block-producing/signing address.
    pub signing_address: Address,
    /// Total stake backing the agent, for diagnostics; the *order* of the
    /// supplied list is what membership derivation consumes.
    pub stake_weight: u128,
}

/// Supplies the agent list ordered by consensus weight and eligibility.
///
/// Implementations must be a deterministic function of committed chain state:
/// same state, same list, on every node. No clocks, no randomness, no
/// node-local caches.
pub trait AgentRanking: Send + Sync {
    fn ranked_agents(&self, chain: &Chain) -> Result<Vec<RankedAgent>, BankError>;
}
