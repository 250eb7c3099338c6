//! Dispatch of block batches to per-kind transaction processors.
//!
//! The kind set is closed and small, so dispatch is a table over
//! [`TxKind`] rather than an open class hierarchy. Kinds without a locally
//! registered processor are not handled by this component.

use crate::withdraw::BatchVerdict;
use std::collections::HashMap;
use std::sync::Arc;
use tidal_transactions::{Transaction, TxKind};
use tidal_types::{BlockHeader, ChainId};
use tracing::warn;

/// The lifecycle operations one transaction kind supports.
///
/// Implementations must be deterministic given identical chain state; the
/// same batch must produce the same verdict on every node.
pub trait TxProcessor: Send + Sync {
    fn kind(&self) -> TxKind;

    /// Batch validation. Returns the rejected transactions and the last
    /// error code observed.
    fn validate(&self, chain_id: ChainId, txs: &[Transaction]) -> BatchVerdict;

    /// All-or-nothing batch commit. `false` means no net effect.
    fn commit(&self, chain_id: ChainId, txs: &[Transaction], header: &BlockHeader) -> bool;

    /// All-or-nothing batch rollback. `false` means no net effect.
    fn rollback(&self, chain_id: ChainId, txs: &[Transaction], header: &BlockHeader) -> bool;
}

/// Table mapping transaction kind to its processor.
#[derive(Default)]
pub struct ProcessorRegistry {
    table: HashMap<TxKind, Arc<dyn TxProcessor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor under its kind. A later registration for the
    /// same kind replaces the earlier one.
    pub fn register(&mut self, processor: Arc<dyn TxProcessor>) {
        let kind = processor.kind();
        if self.table.insert(kind, processor).is_some() {
            warn!(?kind, "replaced existing transaction processor");
        }
    }

    pub fn get(&self, kind: TxKind) -> Option<Arc<dyn TxProcessor>> {
        self.table.get(&kind).cloned()
    }

    /// Split a block's transactions by kind, preserving input order within
    /// each group — order decides intra-batch conflicts.
    pub fn group_by_kind(txs: &[Transaction]) -> HashMap<TxKind, Vec<Transaction>> {
        let mut groups: HashMap<TxKind, Vec<Transaction>> = HashMap::new();
        for tx in txs {
            groups.entry(tx.kind).or_default().push(tx.clone());
        }
        groups
    }
}
