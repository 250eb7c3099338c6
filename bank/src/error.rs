use thiserror::Error;
use tidal_store::StoreError;
use tidal_types::ChainId;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("chain {0} has no local context")]
    ChainNotExist(ChainId),

    #[error("local signing account could not be resolved")]
    LocalAccountUnavailable,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("agent ranking unavailable: {0}")]
    AgentLookup(String),

    #[error("heterogeneous chain {chain}: {reason}")]
    Heterogeneous { chain: String, reason: String },
}
