//! Single-transaction withdraw validation.

use crate::chain::Chain;
use crate::error::ErrorCode;
use tidal_crypto::{decode_address, verify_signature};
use tidal_store::Deposit;
use tidal_transactions::{CancelDeposit, Transaction, TxKind};
use tracing::error;

/// Checks that one withdraw transaction is individually well-formed and
/// references an eligible deposit.
///
/// Pure with respect to committed chain state: reads the deposit store,
/// never writes it. Batch-level concerns (intra-batch conflicts) belong to
/// the processor.
pub struct WithdrawValidator {
    /// Whether to verify the Ed25519 envelope signature. Disabled in tests
    /// that use synthetic addresses with no embedded key.
    verify_signatures: bool,
}

impl WithdrawValidator {
    pub fn new() -> Self {
        Self {
            verify_signatures: true,
        }
    }

    pub fn set_verify_signatures(&mut self, verify: bool) {
        self.verify_signatures = verify;
    }

    /// Validate a single withdraw transaction against committed state.
    pub fn validate(&self, chain: &Chain, tx: &Transaction) -> Result<(), ErrorCode> {
        if tx.kind != TxKind::CancelDeposit {
            return Err(ErrorCode::TxTypeMismatch);
        }

        let cancel = CancelDeposit::decode(&tx.payload).map_err(|_| ErrorCode::SerializeError)?;

        let deposit = self.fetch_deposit(chain, &cancel)?;

        if deposit.is_withdrawn() {
            return Err(ErrorCode::DepositAlreadyWithdrawn);
        }
        if cancel.address != deposit.owner {
            return Err(ErrorCode::WithdrawAccountMismatch);
        }

        if self.verify_signatures {
            let Some(owner_key) = decode_address(&deposit.owner) else {
                return Err(ErrorCode::InvalidSignature);
            };
            if !verify_signature(tx.hash.as_bytes(), &tx.signature, &owner_key) {
                return Err(ErrorCode::InvalidSignature);
            }
        }

        Ok(())
    }

    fn fetch_deposit(&self, chain: &Chain, cancel: &CancelDeposit) -> Result<Deposit, ErrorCode> {
        match chain.deposits().deposit(&cancel.join_tx_hash) {
            Ok(Some(deposit)) => Ok(deposit),
            Ok(None) => Err(ErrorCode::DepositNotFound),
            Err(e) => {
                error!(
                    chain_id = %chain.id(),
                    join_tx_hash = %cancel.join_tx_hash,
                    error = %e,
                    "deposit lookup failed during validation"
                );
                Err(ErrorCode::StorageFailure)
            }
        }
    }
}

impl Default for WithdrawValidator {
    fn default() -> Self {
        Self::new()
    }
}
