use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("transaction payload failed to decode: {reason}")]
    Malformed { reason: String },

    #[error("transaction payload failed to encode: {reason}")]
    Encode { reason: String },
}
