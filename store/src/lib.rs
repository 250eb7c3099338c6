//! Storage contracts for the TIDAL staking and virtual-bank state.
//!
//! Every storage backend implements these traits; the rest of the workspace
//! depends only on the traits. The in-memory backend in [`memory`] is the
//! backend this component owns — persistent engines live behind the same
//! traits in their own crates.

pub mod deposit;
pub mod error;
pub mod memory;
pub mod virtual_bank;

pub use deposit::{Deposit, DepositStore};
pub use error::StoreError;
pub use memory::{MemoryDepositStore, MemoryVirtualBankStore};
pub use virtual_bank::{
    BankChange, HeterogeneousAddress, VirtualBankDirector, VirtualBankStore,
};
