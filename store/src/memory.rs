//! In-memory storage backend.
//!
//! Backs single-process deployments and every test in the workspace. A
//! poisoned lock is reported as `StoreError::Backend` rather than panicking,
//! since consensus code must turn storage faults into verdicts, not crashes.

use crate::deposit::{Deposit, DepositStore};
use crate::virtual_bank::{BankChange, VirtualBankDirector, VirtualBankStore};
use crate::StoreError;
use std::collections::HashMap;
use std::sync::RwLock;
use tidal_types::TxHash;

fn poisoned(which: &str) -> StoreError {
    StoreError::Backend(format!("{which} lock poisoned"))
}

/// Deposit store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryDepositStore {
    deposits: RwLock<HashMap<TxHash, Deposit>>,
}

impl MemoryDepositStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All deposits, ordered by join hash. Test helper for whole-store
    /// comparisons (the round-trip law).
    pub fn snapshot(&self) -> Vec<Deposit> {
        let mut all: Vec<Deposit> = match self.deposits.read() {
            Ok(guard) => guard.values().cloned().collect(),
            Err(_) => Vec::new(),
        };
        all.sort_by_key(|d| *d.join_tx_hash.as_bytes());
        all
    }
}

impl DepositStore for MemoryDepositStore {
    fn deposit(&self, join_tx_hash: &TxHash) -> Result<Option<Deposit>, StoreError> {
        let guard = self.deposits.read().map_err(|_| poisoned("deposit"))?;
        Ok(guard.get(join_tx_hash).cloned())
    }

    fn put_deposit(&self, deposit: &Deposit) -> Result<(), StoreError> {
        let mut guard = self.deposits.write().map_err(|_| poisoned("deposit"))?;
        guard.insert(deposit.join_tx_hash, deposit.clone());
        Ok(())
    }

    fn update_deposit(&self, deposit: &Deposit) -> Result<(), StoreError> {
        let mut guard = self.deposits.write().map_err(|_| poisoned("deposit"))?;
        match guard.get_mut(&deposit.join_tx_hash) {
            Some(slot) => {
                *slot = deposit.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(deposit.join_tx_hash.to_hex())),
        }
    }
}

/// Virtual-bank store backed by in-memory collections.
#[derive(Default)]
pub struct MemoryVirtualBankStore {
    directors: RwLock<Vec<VirtualBankDirector>>,
    changes: RwLock<HashMap<u64, BankChange>>,
}

impl MemoryVirtualBankStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VirtualBankStore for MemoryVirtualBankStore {
    fn directors(&self) -> Result<Vec<VirtualBankDirector>, StoreError> {
        let guard = self.directors.read().map_err(|_| poisoned("directors"))?;
        Ok(guard.clone())
    }

    fn put_directors(&self, directors: &[VirtualBankDirector]) -> Result<(), StoreError> {
        let mut guard = self.directors.write().map_err(|_| poisoned("directors"))?;
        *guard = directors.to_vec();
        Ok(())
    }

    fn put_change(&self, change: &BankChange) -> Result<(), StoreError> {
        let mut guard = self.changes.write().map_err(|_| poisoned("changes"))?;
        guard.insert(change.height, change.clone());
        Ok(())
    }

    fn change_at(&self, height: u64) -> Result<Option<BankChange>, StoreError> {
        let guard = self.changes.read().map_err(|_| poisoned("changes"))?;
        Ok(guard.get(&height).cloned())
    }
}
