//! Virtual-bank director records.
//!
//! The director list is replaced wholesale on every membership recompute and
//! read-shared (never mutated) by heterogeneous-chain client components, so
//! the records here are plain serializable values.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use tidal_types::Address;

/// A signing address registered on one heterogeneous (external) chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeterogeneousAddress {
    /// Identifier of the external chain the key is registered on.
    pub hetero_chain_id: u16,
    /// Public key registered with that chain's custody contract.
    pub pub_key: Vec<u8>,
    /// Address form on the external chain.
    pub address: String,
}

/// One member of the virtual bank: a node currently authorized to custody and
/// sign cross-chain asset movements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualBankDirector {
    /// The consensus agent's identity address.
    pub agent_address: Address,
    /// The block-producing/signing address; membership queries key on this.
    pub signing_address: Address,
    /// 1-based seat number used by deterministic threshold-signing schemes.
    pub seat_index: u16,
    /// Heterogeneous-chain keys registered so far for this member.
    pub hetero_addresses: Vec<HeterogeneousAddress>,
}

/// Additions and removals produced by one membership recompute, persisted for
/// downstream consumers (e.g. the heterogeneous-chain plumbing).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankChange {
    /// Height of the state the new membership was derived from.
    pub height: u64,
    pub added: Vec<VirtualBankDirector>,
    pub removed: Vec<VirtualBankDirector>,
}

/// Persistence contract for the director list and its change records.
pub trait VirtualBankStore: Send + Sync {
    /// The most recently recorded director list, in seat order. Empty when no
    /// membership has been recorded yet.
    fn directors(&self) -> Result<Vec<VirtualBankDirector>, StoreError>;

    /// Replace the director list wholesale.
    fn put_directors(&self, directors: &[VirtualBankDirector]) -> Result<(), StoreError>;

    /// Record the membership delta for a height.
    fn put_change(&self, change: &BankChange) -> Result<(), StoreError>;

    /// The change record for a height, if one was persisted.
    fn change_at(&self, height: u64) -> Result<Option<BankChange>, StoreError>;
}
