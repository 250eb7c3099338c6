//! Batch lifecycle processing for cancel-deposit transactions.
//!
//! The batch operations look transactional to the caller but are implemented
//! as a forward pass plus a compensating pass: commit rolls back what it
//! already applied when a later transaction fails, rollback re-commits. A
//! `false` return therefore always means "no net effect".

use crate::chain::{Chain, ChainRegistry};
use crate::dispatch::TxProcessor;
use crate::error::ErrorCode;
use crate::validator::WithdrawValidator;
use std::collections::HashSet;
use std::sync::Arc;
use tidal_transactions::{CancelDeposit, Transaction, TxKind};
use tidal_types::{BlockHeader, ChainId, TxHash};
use tracing::{debug, error};

/// Result of validating one block's batch of withdraw transactions.
///
/// `error` is the code of the *last* rejection observed while walking the
/// batch in input order. Callers drop `invalid` from the block and keep the
/// remainder.
#[derive(Clone, Debug, Default)]
pub struct BatchVerdict {
    pub invalid: Vec<Transaction>,
    pub error: Option<ErrorCode>,
}

impl BatchVerdict {
    pub fn all_valid(&self) -> bool {
        self.invalid.is_empty() && self.error.is_none()
    }
}

/// The consensus state machine for the cancel-deposit transaction class.
pub struct WithdrawProcessor {
    registry: Arc<ChainRegistry>,
    validator: WithdrawValidator,
}

impl WithdrawProcessor {
    pub fn new(registry: Arc<ChainRegistry>, validator: WithdrawValidator) -> Self {
        Self {
            registry,
            validator,
        }
    }

    /// Validate a batch of withdraw transactions.
    ///
    /// An unknown chain rejects the entire input with
    /// [`ErrorCode::ChainNotExist`]. Otherwise every transaction is checked
    /// individually (no short-circuit), followed by the intra-batch conflict
    /// rule: the *second* transaction targeting an already-seen join hash is
    /// invalid with [`ErrorCode::ConflictError`].
    pub fn validate(&self, chain_id: ChainId, txs: &[Transaction]) -> BatchVerdict {
        let Some(chain) = self.registry.get(chain_id) else {
            error!(%chain_id, "chain does not exist");
            return BatchVerdict {
                invalid: txs.to_vec(),
                error: Some(ErrorCode::ChainNotExist),
            };
        };

        let mut invalid = Vec::new();
        let mut last_error = None;
        let mut seen: HashSet<TxHash> = HashSet::new();

        for tx in txs {
            if let Err(code) = self.validator.validate(&chain, tx) {
                debug!(%chain_id, tx_hash = %tx.hash, code = %code, "withdraw rejected");
                invalid.push(tx.clone());
                last_error = Some(code);
                continue;
            }
            // The validator already proved the payload decodes, but the
            // conflict rule needs the join hash, so decode again here and
            // treat a failure as its own invalidity.
            let cancel = match CancelDeposit::decode(&tx.payload) {
                Ok(cancel) => cancel,
                Err(_) => {
                    invalid.push(tx.clone());
                    last_error = Some(ErrorCode::SerializeError);
                    continue;
                }
            };
            if !seen.insert(cancel.join_tx_hash) {
                debug!(
                    %chain_id,
                    tx_hash = %tx.hash,
                    join_tx_hash = %cancel.join_tx_hash,
                    "duplicate withdrawal of the same deposit in batch"
                );
                invalid.push(tx.clone());
                last_error = Some(ErrorCode::ConflictError);
            }
        }

        BatchVerdict {
            invalid,
            error: last_error,
        }
    }

    /// Commit a batch. All-or-nothing: on the first single-commit failure the
    /// already-committed prefix is rolled back (in commit order, same header)
    /// and the call returns `false`.
    pub fn commit(&self, chain_id: ChainId, txs: &[Transaction], header: &BlockHeader) -> bool {
        let Some(chain) = self.registry.get(chain_id) else {
            error!(%chain_id, "chain does not exist");
            return false;
        };

        let mut committed: Vec<&Transaction> = Vec::new();
        let mut all_ok = true;
        for tx in txs {
            if self.commit_one(&chain, tx, header) {
                committed.push(tx);
            } else {
                all_ok = false;
                break;
            }
        }

        if !all_ok {
            for tx in committed {
                if !self.rollback_one(&chain, tx, header) {
                    error!(
                        %chain_id,
                        tx_hash = %tx.hash,
                        height = header.height,
                        "compensating rollback failed; deposit state needs operator attention"
                    );
                }
            }
        }
        all_ok
    }

    /// Roll back a batch. Mirror of [`commit`](Self::commit): on the first
    /// single-rollback failure the already-rolled-back prefix is re-committed
    /// with the same header and the call returns `false`.
    pub fn rollback(&self, chain_id: ChainId, txs: &[Transaction], header: &BlockHeader) -> bool {
        let Some(chain) = self.registry.get(chain_id) else {
            error!(%chain_id, "chain does not exist");
            return false;
        };

        let mut rolled_back: Vec<&Transaction> = Vec::new();
        let mut all_ok = true;
        for tx in txs {
            if self.rollback_one(&chain, tx, header) {
                rolled_back.push(tx);
            } else {
                all_ok = false;
                break;
            }
        }

        if !all_ok {
            for tx in rolled_back {
                if !self.commit_one(&chain, tx, header) {
                    error!(
                        %chain_id,
                        tx_hash = %tx.hash,
                        height = header.height,
                        "compensating re-commit failed; deposit state needs operator attention"
                    );
                }
            }
        }
        all_ok
    }

    /// Apply one withdraw: stamp the deposit with the committing height.
    ///
    /// Guards against replay independently of validation — a deposit that is
    /// already withdrawn fails here even if the batch bypassed `validate`.
    fn commit_one(&self, chain: &Chain, tx: &Transaction, header: &BlockHeader) -> bool {
        let cancel = match CancelDeposit::decode(&tx.payload) {
            Ok(cancel) => cancel,
            Err(e) => {
                error!(chain_id = %chain.id(), tx_hash = %tx.hash, error = %e, "bad withdraw payload");
                return false;
            }
        };

        let mut deposit = match chain.deposits().deposit(&cancel.join_tx_hash) {
            Ok(Some(deposit)) => deposit,
            Ok(None) => {
                error!(
                    chain_id = %chain.id(),
                    join_tx_hash = %cancel.join_tx_hash,
                    "withdrawn deposit does not exist"
                );
                return false;
            }
            Err(e) => {
                error!(chain_id = %chain.id(), error = %e, "deposit lookup failed");
                return false;
            }
        };

        if deposit.is_withdrawn() {
            error!(
                chain_id = %chain.id(),
                join_tx_hash = %cancel.join_tx_hash,
                "deposit is already withdrawn"
            );
            return false;
        }

        deposit.del_height = Some(header.height);
        match chain.deposits().update_deposit(&deposit) {
            Ok(()) => true,
            Err(e) => {
                error!(chain_id = %chain.id(), error = %e, "deposit update failed");
                false
            }
        }
    }

    /// Undo one withdraw: clear the height marker.
    ///
    /// Only applies when the recorded withdrawal height equals the block
    /// being rolled back — a mismatch means a different block withdrew the
    /// deposit and this rollback must not touch it.
    fn rollback_one(&self, chain: &Chain, tx: &Transaction, header: &BlockHeader) -> bool {
        let cancel = match CancelDeposit::decode(&tx.payload) {
            Ok(cancel) => cancel,
            Err(e) => {
                error!(chain_id = %chain.id(), tx_hash = %tx.hash, error = %e, "bad withdraw payload");
                return false;
            }
        };

        let mut deposit = match chain.deposits().deposit(&cancel.join_tx_hash) {
            Ok(Some(deposit)) => deposit,
            Ok(None) => {
                error!(
                    chain_id = %chain.id(),
                    join_tx_hash = %cancel.join_tx_hash,
                    "deposit to restore does not exist"
                );
                return false;
            }
            Err(e) => {
                error!(chain_id = %chain.id(), error = %e, "deposit lookup failed");
                return false;
            }
        };

        if deposit.del_height != Some(header.height) {
            error!(
                chain_id = %chain.id(),
                join_tx_hash = %cancel.join_tx_hash,
                recorded = ?deposit.del_height,
                rollback_height = header.height,
                "withdrawal height does not match rollback height"
            );
            return false;
        }

        deposit.del_height = None;
        match chain.deposits().update_deposit(&deposit) {
            Ok(()) => true,
            Err(e) => {
                error!(chain_id = %chain.id(), error = %e, "deposit update failed");
                false
            }
        }
    }
}

impl TxProcessor for WithdrawProcessor {
    fn kind(&self) -> TxKind {
        TxKind::CancelDeposit
    }

    fn validate(&self, chain_id: ChainId, txs: &[Transaction]) -> BatchVerdict {
        WithdrawProcessor::validate(self, chain_id, txs)
    }

    fn commit(&self, chain_id: ChainId, txs: &[Transaction], header: &BlockHeader) -> bool {
        WithdrawProcessor::commit(self, chain_id, txs, header)
    }

    fn rollback(&self, chain_id: ChainId, txs: &[Transaction], header: &BlockHeader) -> bool {
        WithdrawProcessor::rollback(self, chain_id, txs, header)
    }
}
