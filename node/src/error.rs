use thiserror::Error;
use tidal_bank::BankError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("chain {0} has no local context")]
    ChainNotExist(tidal_types::ChainId),

    #[error(transparent)]
    Bank(#[from] BankError),
}
