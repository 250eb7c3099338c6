//! The block-processing facade.
//!
//! The host pipeline hands each ordered block to [`Node::process_block`] and
//! undoes one with [`Node::rollback_block`]. Per-kind batches go through the
//! processor table; after a block applies, virtual-bank membership is
//! recomputed from the now-updated state and the local signer is
//! (re-)registered with the heterogeneous chains.

use crate::{NodeConfig, NodeError};
use std::collections::HashMap;
use std::sync::Arc;
use tidal_bank::{AgentRanking, HeterogeneousClient, SignAccountProvider, VirtualBankService};
use tidal_consensus::{
    Chain, ChainRegistry, ErrorCode, ProcessorRegistry, WithdrawProcessor, WithdrawValidator,
};
use tidal_store::{MemoryDepositStore, VirtualBankStore};
use tidal_transactions::{Transaction, TxKind};
use tidal_types::{BlockHeader, ChainId, TxHash};
use tracing::{debug, error};

/// Fixed processing order over the closed kind set. Joins settle before
/// withdrawals within a block.
const KIND_ORDER: [TxKind; 2] = [TxKind::JoinDeposit, TxKind::CancelDeposit];

/// What happened to one block.
#[derive(Clone, Debug)]
pub struct BlockOutcome {
    /// Whether the block's surviving transactions were committed. `false`
    /// means no net state effect.
    pub applied: bool,
    /// Transactions rejected by validation and dropped from the block.
    pub dropped: Vec<Transaction>,
    /// Last validation error code observed, if any transaction was dropped.
    pub last_error: Option<ErrorCode>,
}

/// Wires the chain registry, processor table, and virtual-bank service
/// together. All collaborators are injected; the node owns no globals.
pub struct Node {
    registry: Arc<ChainRegistry>,
    processors: ProcessorRegistry,
    bank: VirtualBankService,
}

impl Node {
    pub fn new(
        config: &NodeConfig,
        validator: WithdrawValidator,
        agents: Arc<dyn AgentRanking>,
        accounts: Arc<dyn SignAccountProvider>,
        bank_store: Arc<dyn VirtualBankStore>,
        hetero_clients: Vec<Arc<dyn HeterogeneousClient>>,
    ) -> Self {
        let registry = Arc::new(ChainRegistry::new());
        for settings in &config.chains {
            registry.register(Chain::new(
                settings.clone(),
                Arc::new(MemoryDepositStore::new()),
            ));
        }

        let mut processors = ProcessorRegistry::new();
        processors.register(Arc::new(WithdrawProcessor::new(
            registry.clone(),
            validator,
        )));

        let bank = VirtualBankService::new(
            registry.clone(),
            agents,
            accounts,
            bank_store,
            hetero_clients,
        );

        Self {
            registry,
            processors,
            bank,
        }
    }

    pub fn registry(&self) -> &Arc<ChainRegistry> {
        &self.registry
    }

    pub fn bank(&self) -> &VirtualBankService {
        &self.bank
    }

    /// Validate and commit one block's transactions, then bring virtual-bank
    /// membership and signer registration up to date.
    ///
    /// Validation rejections are recovered locally: the offending
    /// transactions are dropped and the remainder commits. A commit failure
    /// is not recoverable here — the batch has already compensated itself
    /// back to "nothing applied" and the whole block is reported
    /// unapplied for the host to reject.
    pub fn process_block(
        &self,
        chain_id: ChainId,
        txs: &[Transaction],
        header: &BlockHeader,
    ) -> Result<BlockOutcome, NodeError> {
        let chain = self
            .registry
            .get(chain_id)
            .ok_or(NodeError::ChainNotExist(chain_id))?;

        let groups = ProcessorRegistry::group_by_kind(txs);
        let mut dropped = Vec::new();
        let mut last_error = None;

        for kind in KIND_ORDER {
            let Some(batch) = groups.get(&kind) else {
                continue;
            };
            let Some(processor) = self.processors.get(kind) else {
                debug!(?kind, "no local processor for kind; batch passed over");
                continue;
            };

            let verdict = processor.validate(chain_id, batch);
            if let Some(code) = verdict.error {
                last_error = Some(code);
            }
            let accepted = subtract(batch, &verdict.invalid);
            dropped.extend(verdict.invalid);

            if !processor.commit(chain_id, &accepted, header) {
                error!(%chain_id, height = header.height, ?kind, "batch commit failed; block not applied");
                return Ok(BlockOutcome {
                    applied: false,
                    dropped,
                    last_error,
                });
            }
        }

        self.bank.record_virtual_bank_changes(&chain, header.height)?;
        self.bank.register_local_signer(&chain)?;

        Ok(BlockOutcome {
            applied: true,
            dropped,
            last_error,
        })
    }

    /// Undo one previously committed block. Returns `false` (with no net
    /// state effect) if any batch failed to roll back.
    pub fn rollback_block(
        &self,
        chain_id: ChainId,
        txs: &[Transaction],
        header: &BlockHeader,
    ) -> Result<bool, NodeError> {
        let chain = self
            .registry
            .get(chain_id)
            .ok_or(NodeError::ChainNotExist(chain_id))?;

        let groups = ProcessorRegistry::group_by_kind(txs);
        for kind in KIND_ORDER {
            let Some(batch) = groups.get(&kind) else {
                continue;
            };
            let Some(processor) = self.processors.get(kind) else {
                continue;
            };
            if !processor.rollback(chain_id, batch, header) {
                error!(%chain_id, height = header.height, ?kind, "batch rollback failed");
                return Ok(false);
            }
        }

        // State now reflects the parent block; re-derive membership from it.
        self.bank
            .record_virtual_bank_changes(&chain, header.height.saturating_sub(1))?;
        self.bank.register_local_signer(&chain)?;

        Ok(true)
    }
}

/// Remove `rejected` from `batch`, preserving order and multiplicity.
fn subtract(batch: &[Transaction], rejected: &[Transaction]) -> Vec<Transaction> {
    let mut reject_counts: HashMap<TxHash, usize> = HashMap::new();
    for tx in rejected {
        *reject_counts.entry(tx.hash).or_insert(0) += 1;
    }
    batch
        .iter()
        .filter(|tx| match reject_counts.get_mut(&tx.hash) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidal_types::{Signature, Timestamp};

    fn tx(byte: u8) -> Transaction {
        Transaction {
            hash: TxHash::new([byte; 32]),
            kind: TxKind::CancelDeposit,
            payload: Vec::new(),
            timestamp: Timestamp::new(0),
            signature: Signature::ZERO,
        }
    }

    #[test]
    fn subtract_preserves_order() {
        let batch = vec![tx(1), tx(2), tx(3)];
        let kept = subtract(&batch, &[tx(2)]);
        assert_eq!(kept, vec![tx(1), tx(3)]);
    }

    #[test]
    fn subtract_respects_multiplicity() {
        // The same hash twice with one rejection keeps one copy.
        let batch = vec![tx(1), tx(1)];
        let kept = subtract(&batch, &[tx(1)]);
        assert_eq!(kept, vec![tx(1)]);
    }

    #[test]
    fn subtract_of_nothing_is_identity() {
        let batch = vec![tx(1), tx(2)];
        assert_eq!(subtract(&batch, &[]), batch);
    }
}
