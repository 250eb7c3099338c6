//! Node-level wiring for the TIDAL withdrawal and virtual-bank component.
//!
//! Assembles the chain registry, the transaction-processor table, and the
//! virtual-bank service from configuration, and exposes the block-processing
//! facade the host pipeline drives. BFT ordering, peer networking, and
//! persistent storage engines are the host's business, not ours.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::{BlockOutcome, Node};
