//! The TIDAL staking-withdrawal consensus core.
//!
//! Validates, commits, and rolls back the cancel-deposit transaction class
//! for a block, with batch semantics every node must reproduce identically:
//! intra-batch conflict detection in input order, last-error-wins verdict
//! aggregation, and all-or-nothing commit/rollback via compensating passes.

pub mod chain;
pub mod dispatch;
pub mod error;
pub mod validator;
pub mod withdraw;

pub use chain::{Chain, ChainRegistry, ChainSettings};
pub use dispatch::{ProcessorRegistry, TxProcessor};
pub use error::ErrorCode;
pub use validator::WithdrawValidator;
pub use withdraw::{BatchVerdict, WithdrawProcessor};
