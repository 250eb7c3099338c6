//! Per-chain runtime context and the registry that owns it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tidal_store::DepositStore;
use tidal_types::ChainId;

/// Static per-chain settings, loaded from node configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSettings {
    pub chain_id: ChainId,
    /// Number of virtual-bank seats; the top-ranked agents fill them.
    #[serde(default = "default_virtual_bank_seats")]
    pub virtual_bank_seats: usize,
}

fn default_virtual_bank_seats() -> usize {
    15
}

/// Runtime context for one chain: settings plus handles to its stores.
///
/// Contexts are looked up through the [`ChainRegistry`] and never mutated;
/// anything height-dependent is passed alongside, not stored here.
pub struct Chain {
    settings: ChainSettings,
    deposits: Arc<dyn DepositStore>,
}

impl Chain {
    pub fn new(settings: ChainSettings, deposits: Arc<dyn DepositStore>) -> Self {
        Self { settings, deposits }
    }

    pub fn id(&self) -> ChainId {
        self.settings.chain_id
    }

    pub fn settings(&self) -> &ChainSettings {
        &self.settings
    }

    pub fn deposits(&self) -> &dyn DepositStore {
        self.deposits.as_ref()
    }
}

/// Registry of locally configured chains.
///
/// Absence of a chain id is a normal condition (the chain is not configured
/// on this node), reported as `None` rather than an error.
#[derive(Default)]
pub struct ChainRegistry {
    chains: RwLock<HashMap<ChainId, Arc<Chain>>>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chain context. Replaces any previous context for the id.
    pub fn register(&self, chain: Chain) {
        if let Ok(mut guard) = self.chains.write() {
            guard.insert(chain.id(), Arc::new(chain));
        }
    }

    /// Look up the context for a chain id.
    pub fn get(&self, chain_id: ChainId) -> Option<Arc<Chain>> {
        self.chains.read().ok()?.get(&chain_id).cloned()
    }

    pub fn chain_ids(&self) -> Vec<ChainId> {
        match self.chains.read() {
            Ok(guard) => guard.keys().copied().collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidal_store::MemoryDepositStore;

    fn chain(id: u16) -> Chain {
        Chain::new(
            ChainSettings {
                chain_id: ChainId(id),
                virtual_bank_seats: 5,
            },
            Arc::new(MemoryDepositStore::new()),
        )
    }

    #[test]
    fn lookup_registered_chain() {
        let registry = ChainRegistry::new();
        registry.register(chain(2));
        assert!(registry.get(ChainId(2)).is_some());
    }

    #[test]
    fn unknown_chain_is_none() {
        let registry = ChainRegistry::new();
        registry.register(chain(2));
        assert!(registry.get(ChainId(99)).is_none());
    }

    #[test]
    fn reregistering_replaces_context() {
        let registry = ChainRegistry::new();
        registry.register(chain(2));
        let mut replacement = chain(2);
        replacement.settings.virtual_bank_seats = 9;
        registry.register(replacement);
        assert_eq!(
            registry.get(ChainId(2)).unwrap().settings().virtual_bank_seats,
            9
        );
    }
}
