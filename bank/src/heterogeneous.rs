//! Heterogeneous-chain client seam.
//!
//! A heterogeneous chain is an external blockchain whose assets the virtual
//! bank custodies via threshold signing. This component only provisions
//! signers; transaction building and broadcast live in the client crates.

use crate::service::SignAccount;
use crate::BankError;
use tidal_types::Address;

/// Registration surface of one configured heterogeneous-chain client.
///
/// Registration is treated as idempotent by the bank service: it probes
/// [`is_signer_registered`](Self::is_signer_registered) first and skips
/// clients that already hold the key, so retries after a crash-restart never
/// double-enrol a key on an external chain.
pub trait HeterogeneousClient: Send + Sync {
    /// Numeric id of the external chain.
    fn hetero_chain_id(&self) -> u16;

    /// Human-readable chain name for logs.
    fn chain_name(&self) -> &str;

    /// Whether the signing address is already enrolled with this chain.
    fn is_signer_registered(&self, signing_address: &Address) -> Result<bool, BankError>;

    /// Enrol the signing credential with this chain's custody scheme.
    fn register_signer(&self, account: &SignAccount) -> Result<(), BankError>;
}
