//! Staking deposit records.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use tidal_types::{Address, TxHash};

/// Record of one staking deposit, keyed by the join transaction that created
/// it.
///
/// `del_height` is `None` while the deposit is active and `Some(h)` once a
/// withdraw transaction committed at height `h` deactivated it. Rollback of
/// that block restores `None`. Records are never physically deleted by the
/// withdrawal pipeline; the height marker is the soft-delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    /// Identity of the join transaction; immutable unique key.
    pub join_tx_hash: TxHash,
    /// The account that owns the deposit and may withdraw it.
    pub owner: Address,
    /// Staked amount in raw units.
    pub amount: u128,
    /// Height of the committed withdrawal, if any.
    pub del_height: Option<u64>,
}

impl Deposit {
    /// A fresh, active deposit.
    pub fn new(join_tx_hash: TxHash, owner: Address, amount: u128) -> Self {
        Self {
            join_tx_hash,
            owner,
            amount,
            del_height: None,
        }
    }

    pub fn is_withdrawn(&self) -> bool {
        self.del_height.is_some()
    }
}

/// Authoritative mapping from join-transaction identity to deposit record.
///
/// Mutation is copy-on-write: `update_deposit` replaces the stored record
/// wholesale. During a single validate/commit/rollback call the caller's
/// block-processing lock guarantees exclusive access for the chain; the
/// store itself does not lock across calls.
pub trait DepositStore: Send + Sync {
    /// Look up a deposit. `Ok(None)` means "no such deposit" — a normal
    /// condition, distinct from a backend failure.
    fn deposit(&self, join_tx_hash: &TxHash) -> Result<Option<Deposit>, StoreError>;

    /// Insert a new deposit record. Used by join-transaction processing
    /// (outside this component) and by test fixtures.
    fn put_deposit(&self, deposit: &Deposit) -> Result<(), StoreError>;

    /// Replace an existing deposit record wholesale.
    fn update_deposit(&self, deposit: &Deposit) -> Result<(), StoreError>;
}
