//! Virtual-bank membership and heterogeneous-chain signer provisioning.
//!
//! The virtual bank is the set of nodes authorized to custody and sign
//! cross-chain asset movements. Membership is recomputed wholesale from
//! consensus state after every height change — never patched incrementally —
//! so that all nodes derive the identical custodian set. When the local node
//! joins the bank, its signing credential is registered with every configured
//! heterogeneous-chain client, idempotently.

pub mod agents;
pub mod error;
pub mod heterogeneous;
pub mod service;

pub use agents::{AgentRanking, RankedAgent};
pub use error::BankError;
pub use heterogeneous::HeterogeneousClient;
pub use service::{SignAccount, SignAccountProvider, VirtualBankService};
