//! The virtual-bank service.

use crate::agents::AgentRanking;
use crate::heterogeneous::HeterogeneousClient;
use crate::BankError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tidal_consensus::{Chain, ChainRegistry};
use tidal_store::{BankChange, HeterogeneousAddress, VirtualBankDirector, VirtualBankStore};
use tidal_types::{Address, ChainId, PublicKey};
use tracing::{debug, error, info};

/// Local signing credential: the address/key pair that proves the node's
/// director role. Produced by the account-management collaborator, consumed
/// read-only here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignAccount {
    pub address: Address,
    pub public_key: PublicKey,
}

/// Resolves the node's default signing account for a chain.
pub trait SignAccountProvider: Send + Sync {
    /// `Ok(None)` when the node holds no signing account for the chain —
    /// a normal condition for non-validator nodes.
    fn local_account(&self, chain: &Chain) -> Result<Option<SignAccount>, BankError>;
}

/// Keeps the virtual-bank director set consistent with consensus state and
/// keeps each heterogeneous-chain client's signer set consistent with local
/// membership.
///
/// All collaborators are injected at construction; the service holds no
/// process-wide mutable state of its own.
pub struct VirtualBankService {
    registry: Arc<ChainRegistry>,
    agents: Arc<dyn AgentRanking>,
    accounts: Arc<dyn SignAccountProvider>,
    store: Arc<dyn VirtualBankStore>,
    hetero_clients: Vec<Arc<dyn HeterogeneousClient>>,
}

impl VirtualBankService {
    pub fn new(
        registry: Arc<ChainRegistry>,
        agents: Arc<dyn AgentRanking>,
        accounts: Arc<dyn SignAccountProvider>,
        store: Arc<dyn VirtualBankStore>,
        hetero_clients: Vec<Arc<dyn HeterogeneousClient>>,
    ) -> Self {
        Self {
            registry,
            agents,
            accounts,
            store,
            hetero_clients,
        }
    }

    /// Recompute the director set from the current agent ranking and persist
    /// it if it changed.
    ///
    /// `height` is the chain height the ranking was derived at; it keys the
    /// persisted change record. The computation is a pure function of the
    /// supplied ranking and the previously stored list: the top
    /// `virtual_bank_seats` agents become directors with 1-based seat
    /// indexes in rank order, and members retained across the recompute keep
    /// their already-registered heterogeneous addresses.
    ///
    /// Returns the membership delta, or `None` when membership is unchanged.
    pub fn record_virtual_bank_changes(
        &self,
        chain: &Chain,
        height: u64,
    ) -> Result<Option<BankChange>, BankError> {
        let ranked = self.agents.ranked_agents(chain)?;
        let previous = self.store.directors()?;

        let kept_hetero: HashMap<&Address, &Vec<HeterogeneousAddress>> = previous
            .iter()
            .map(|d| (&d.signing_address, &d.hetero_addresses))
            .collect();

        let seats = chain.settings().virtual_bank_seats;
        let next: Vec<VirtualBankDirector> = ranked
            .iter()
            .take(seats)
            .enumerate()
            .map(|(i, agent)| VirtualBankDirector {
                agent_address: agent.agent_address.clone(),
                signing_address: agent.signing_address.clone(),
                seat_index: (i + 1) as u16,
                hetero_addresses: kept_hetero
                    .get(&agent.signing_address)
                    .map(|addrs| (*addrs).clone())
                    .unwrap_or_default(),
            })
            .collect();

        let prev_members: HashSet<&Address> =
            previous.iter().map(|d| &d.signing_address).collect();
        let next_members: HashSet<&Address> = next.iter().map(|d| &d.signing_address).collect();

        let added: Vec<VirtualBankDirector> = next
            .iter()
            .filter(|d| !prev_members.contains(&d.signing_address))
            .cloned()
            .collect();
        let removed: Vec<VirtualBankDirector> = previous
            .iter()
            .filter(|d| !next_members.contains(&d.signing_address))
            .cloned()
            .collect();

        if next != previous {
            self.store.put_directors(&next)?;
        }
        if added.is_empty() && removed.is_empty() {
            return Ok(None);
        }

        let change = BankChange {
            height,
            added,
            removed,
        };
        self.store.put_change(&change)?;
        info!(
            chain_id = %chain.id(),
            height,
            added = change.added.len(),
            removed = change.removed.len(),
            members = next.len(),
            "virtual bank membership changed"
        );
        Ok(Some(change))
    }

    /// The local node's own director record, if it is currently a member.
    ///
    /// A missing chain context or an unresolvable local identity is a
    /// signaled error; not being a member is `Ok(None)`.
    pub fn current_director(
        &self,
        chain_id: ChainId,
    ) -> Result<Option<VirtualBankDirector>, BankError> {
        let chain = self
            .registry
            .get(chain_id)
            .ok_or(BankError::ChainNotExist(chain_id))?;
        let account = self
            .accounts
            .local_account(&chain)?
            .ok_or(BankError::LocalAccountUnavailable)?;
        let directors = self.store.directors()?;
        Ok(directors
            .into_iter()
            .find(|d| d.signing_address == account.address))
    }

    /// Whether the node's default signing account is currently a director.
    /// Returns the credential when it is, `None` otherwise (including when
    /// the node holds no signing account at all).
    pub fn is_current_director(&self, chain: &Chain) -> Result<Option<SignAccount>, BankError> {
        match self.accounts.local_account(chain)? {
            Some(account) => self.is_director(chain, &account),
            None => Ok(None),
        }
    }

    /// Whether the *supplied* signing account is currently a director,
    /// letting callers probe the status of any locally held key.
    pub fn is_director(
        &self,
        _chain: &Chain,
        account: &SignAccount,
    ) -> Result<Option<SignAccount>, BankError> {
        let directors = self.store.directors()?;
        let is_member = directors
            .iter()
            .any(|d| d.signing_address == account.address);
        Ok(is_member.then(|| account.clone()))
    }

    /// Register the node's default signing credential with every configured
    /// heterogeneous-chain client, if the node is currently a director.
    ///
    /// Safe to call repeatedly; see [`register_signer`](Self::register_signer).
    pub fn register_local_signer(&self, chain: &Chain) -> Result<(), BankError> {
        match self.accounts.local_account(chain)? {
            Some(account) => self.register_signer(chain, &account),
            None => Ok(()),
        }
    }

    /// Register the supplied signing credential with every configured
    /// heterogeneous-chain client, if the account is currently a director.
    ///
    /// Idempotent: clients that already hold the key are skipped, so
    /// crash-restart retries never double-enrol a key on an external chain.
    /// Not being a director is a no-op, not an error. All clients are
    /// attempted even when one fails; the first failure is reported after
    /// the pass completes.
    pub fn register_signer(&self, chain: &Chain, account: &SignAccount) -> Result<(), BankError> {
        if self.is_director(chain, account)?.is_none() {
            debug!(
                chain_id = %chain.id(),
                address = %account.address,
                "not a virtual bank director; skipping signer registration"
            );
            return Ok(());
        }

        let mut first_failure = None;
        for client in &self.hetero_clients {
            match client.is_signer_registered(&account.address) {
                Ok(true) => {
                    debug!(
                        hetero_chain = client.chain_name(),
                        address = %account.address,
                        "signer already registered"
                    );
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    error!(hetero_chain = client.chain_name(), error = %e, "signer probe failed");
                    first_failure.get_or_insert(e);
                    continue;
                }
            }
            match client.register_signer(account) {
                Ok(()) => {
                    info!(
                        hetero_chain = client.chain_name(),
                        address = %account.address,
                        "registered local signer"
                    );
                }
                Err(e) => {
                    error!(
                        hetero_chain = client.chain_name(),
                        error = %e,
                        "signer registration failed"
                    );
                    first_failure.get_or_insert(e);
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
