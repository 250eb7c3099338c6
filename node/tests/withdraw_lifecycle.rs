//! End-to-end exercises of the block-processing facade: withdraw lifecycle,
//! virtual-bank upkeep, and signer provisioning.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tidal_bank::{
    AgentRanking, BankError, HeterogeneousClient, RankedAgent, SignAccount, SignAccountProvider,
};
use tidal_consensus::{Chain, ErrorCode, WithdrawValidator};
use tidal_crypto::{derive_address, hash_tx_payload, keypair_from_seed, sign_message};
use tidal_node::{Node, NodeConfig};
use tidal_store::{Deposit, DepositStore, MemoryVirtualBankStore, VirtualBankStore};
use tidal_transactions::{CancelDeposit, Transaction, TxKind};
use tidal_types::{Address, BlockHash, BlockHeader, ChainId, Signature, Timestamp, TxHash};

const CHAIN: ChainId = ChainId(1);

struct FixedRanking(RwLock<Vec<RankedAgent>>);

impl AgentRanking for FixedRanking {
    fn ranked_agents(&self, _chain: &Chain) -> Result<Vec<RankedAgent>, BankError> {
        Ok(self.0.read().unwrap().clone())
    }
}

struct FixedAccount(Option<SignAccount>);

impl SignAccountProvider for FixedAccount {
    fn local_account(&self, _chain: &Chain) -> Result<Option<SignAccount>, BankError> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct RecordingClient {
    registered: RwLock<HashSet<Address>>,
    register_calls: AtomicUsize,
}

impl HeterogeneousClient for RecordingClient {
    fn hetero_chain_id(&self) -> u16 {
        101
    }
    fn chain_name(&self) -> &str {
        "ethereum"
    }
    fn is_signer_registered(&self, signing_address: &Address) -> Result<bool, BankError> {
        Ok(self.registered.read().unwrap().contains(signing_address))
    }
    fn register_signer(&self, account: &SignAccount) -> Result<(), BankError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.registered
            .write()
            .unwrap()
            .insert(account.address.clone());
        Ok(())
    }
}

struct Harness {
    node: Node,
    ranking: Arc<FixedRanking>,
    bank_store: Arc<MemoryVirtualBankStore>,
    client: Arc<RecordingClient>,
}

fn harness(local_account: Option<SignAccount>) -> Harness {
    let config = NodeConfig {
        chains: vec![tidal_consensus::ChainSettings {
            chain_id: CHAIN,
            virtual_bank_seats: 2,
        }],
        ..NodeConfig::default()
    };

    let mut validator = WithdrawValidator::new();
    validator.set_verify_signatures(false);

    let ranking = Arc::new(FixedRanking(RwLock::new(Vec::new())));
    let bank_store = Arc::new(MemoryVirtualBankStore::new());
    let client = Arc::new(RecordingClient::default());

    let node = Node::new(
        &config,
        validator,
        ranking.clone(),
        Arc::new(FixedAccount(local_account)),
        bank_store.clone(),
        vec![client.clone()],
    );
    Harness {
        node,
        ranking,
        bank_store,
        client,
    }
}

fn sign_addr(n: u8) -> Address {
    Address::new(format!("tdl_sign{n:02}"))
}

fn agent(n: u8, weight: u128) -> RankedAgent {
    RankedAgent {
        agent_address: Address::new(format!("tdl_agent{n:02}")),
        signing_address: sign_addr(n),
        stake_weight: weight,
    }
}

fn seed_deposit(h: &Harness, byte: u8, owner: Address, amount: u128) -> TxHash {
    let join = TxHash::new([byte; 32]);
    let chain = h.node.registry().get(CHAIN).unwrap();
    chain
        .deposits()
        .put_deposit(&Deposit::new(join, owner, amount))
        .unwrap();
    join
}

fn withdraw_tx(tx_byte: u8, join: TxHash, claimant: Address) -> Transaction {
    let payload = CancelDeposit {
        join_tx_hash: join,
        address: claimant,
    }
    .encode()
    .unwrap();
    Transaction {
        hash: TxHash::new([tx_byte; 32]),
        kind: TxKind::CancelDeposit,
        payload,
        timestamp: Timestamp::new(1_000),
        signature: Signature::ZERO,
    }
}

fn header(height: u64) -> BlockHeader {
    BlockHeader::new(
        BlockHash::new([height as u8; 32]),
        height,
        Timestamp::new(height),
    )
}

fn del_height(h: &Harness, join: &TxHash) -> Option<u64> {
    let chain = h.node.registry().get(CHAIN).unwrap();
    chain.deposits().deposit(join).unwrap().unwrap().del_height
}

#[test]
fn withdraw_commit_and_rollback_round_trip() {
    let h = harness(None);
    let owner = Address::new("tdl_owner01");
    let join = seed_deposit(&h, 1, owner.clone(), 2_000);
    let tx = withdraw_tx(0xA1, join, owner);

    let outcome = h
        .node
        .process_block(CHAIN, std::slice::from_ref(&tx), &header(100))
        .unwrap();
    assert!(outcome.applied);
    assert!(outcome.dropped.is_empty());
    assert_eq!(del_height(&h, &join), Some(100));

    assert!(h.node.rollback_block(CHAIN, &[tx], &header(100)).unwrap());
    assert_eq!(del_height(&h, &join), None);
}

#[test]
fn replayed_withdrawal_is_dropped_not_fatal() {
    let h = harness(None);
    let owner = Address::new("tdl_owner01");
    let join = seed_deposit(&h, 1, owner.clone(), 2_000);

    let first = withdraw_tx(0xA1, join, owner.clone());
    assert!(h
        .node
        .process_block(CHAIN, &[first], &header(100))
        .unwrap()
        .applied);

    // A later block replaying the withdrawal: validation drops it and the
    // rest of the block still applies; the original marker is untouched.
    let replay = withdraw_tx(0xA2, join, owner);
    let outcome = h.node.process_block(CHAIN, &[replay], &header(110)).unwrap();
    assert!(outcome.applied);
    assert_eq!(outcome.dropped.len(), 1);
    assert_eq!(outcome.last_error, Some(ErrorCode::DepositAlreadyWithdrawn));
    assert_eq!(del_height(&h, &join), Some(100));
}

#[test]
fn conflicting_withdrawals_keep_only_the_first() {
    let h = harness(None);
    let owner = Address::new("tdl_owner01");
    let join = seed_deposit(&h, 1, owner.clone(), 2_000);

    let winner = withdraw_tx(0xA1, join, owner.clone());
    let loser = withdraw_tx(0xA2, join, owner);
    let outcome = h
        .node
        .process_block(CHAIN, &[winner.clone(), loser.clone()], &header(100))
        .unwrap();

    assert!(outcome.applied);
    assert_eq!(outcome.dropped, vec![loser]);
    assert_eq!(outcome.last_error, Some(ErrorCode::ConflictError));
    assert_eq!(del_height(&h, &join), Some(100));
}

#[test]
fn unknown_chain_is_a_signaled_error() {
    let h = harness(None);
    let err = h
        .node
        .process_block(ChainId(99), &[], &header(100))
        .unwrap_err();
    assert!(matches!(err, tidal_node::NodeError::ChainNotExist(ChainId(99))));
}

#[test]
fn join_transactions_pass_through_unprocessed() {
    // No join processor is registered in this component; a block of join
    // transactions applies without touching deposit state.
    let h = harness(None);
    let join_tx = Transaction {
        hash: TxHash::new([0xB1; 32]),
        kind: TxKind::JoinDeposit,
        payload: Vec::new(),
        timestamp: Timestamp::new(1_000),
        signature: Signature::ZERO,
    };
    let outcome = h.node.process_block(CHAIN, &[join_tx], &header(100)).unwrap();
    assert!(outcome.applied);
    assert!(outcome.dropped.is_empty());
}

#[test]
fn membership_updates_and_signer_registration_follow_blocks() {
    let local = SignAccount {
        address: sign_addr(1),
        public_key: tidal_types::PublicKey([1; 32]),
    };
    let h = harness(Some(local));
    *h.ranking.0.write().unwrap() = vec![agent(1, 300), agent(2, 200)];

    let outcome = h.node.process_block(CHAIN, &[], &header(10)).unwrap();
    assert!(outcome.applied);

    // Membership was recorded at the block height and the local signer was
    // registered exactly once.
    let directors = h.bank_store.directors().unwrap();
    assert_eq!(directors.len(), 2);
    assert!(h.bank_store.change_at(10).unwrap().is_some());
    assert_eq!(h.client.register_calls.load(Ordering::SeqCst), 1);

    // Subsequent blocks with unchanged ranking neither re-record nor
    // re-register.
    let outcome = h.node.process_block(CHAIN, &[], &header(11)).unwrap();
    assert!(outcome.applied);
    assert!(h.bank_store.change_at(11).unwrap().is_none());
    assert_eq!(h.client.register_calls.load(Ordering::SeqCst), 1);

    let chain = h.node.registry().get(CHAIN).unwrap();
    assert!(h.node.bank().is_current_director(&chain).unwrap().is_some());
}

#[test]
fn unseated_node_registers_nothing() {
    let local = SignAccount {
        address: sign_addr(9),
        public_key: tidal_types::PublicKey([9; 32]),
    };
    let h = harness(Some(local));
    *h.ranking.0.write().unwrap() = vec![agent(1, 300), agent(2, 200)];

    h.node.process_block(CHAIN, &[], &header(10)).unwrap();
    assert_eq!(h.client.register_calls.load(Ordering::SeqCst), 0);

    let chain = h.node.registry().get(CHAIN).unwrap();
    assert!(h.node.bank().is_current_director(&chain).unwrap().is_none());
}

#[test]
fn real_signature_flow_end_to_end() {
    // Full-fidelity path: owner address derived from a real keypair, tx hash
    // derived from the payload, envelope signed by the owner.
    let config = NodeConfig {
        chains: vec![tidal_consensus::ChainSettings {
            chain_id: CHAIN,
            virtual_bank_seats: 2,
        }],
        ..NodeConfig::default()
    };
    let node = Node::new(
        &config,
        WithdrawValidator::new(),
        Arc::new(FixedRanking(RwLock::new(Vec::new()))),
        Arc::new(FixedAccount(None)),
        Arc::new(MemoryVirtualBankStore::new()),
        Vec::new(),
    );

    let kp = keypair_from_seed(&[77u8; 32]);
    let owner = derive_address(&kp.public);
    let join = TxHash::new([1; 32]);
    let chain = node.registry().get(CHAIN).unwrap();
    chain
        .deposits()
        .put_deposit(&Deposit::new(join, owner.clone(), 5_000))
        .unwrap();

    let payload = CancelDeposit {
        join_tx_hash: join,
        address: owner,
    }
    .encode()
    .unwrap();
    let hash = hash_tx_payload(TxKind::CancelDeposit.tag(), &payload);
    let mut tx = Transaction {
        hash,
        kind: TxKind::CancelDeposit,
        payload,
        timestamp: Timestamp::new(1_000),
        signature: Signature::ZERO,
    };
    tx.signature = sign_message(tx.hash.as_bytes(), &kp.private);

    let outcome = node.process_block(CHAIN, &[tx], &header(100)).unwrap();
    assert!(outcome.applied);
    assert!(outcome.dropped.is_empty());
    assert_eq!(
        chain.deposits().deposit(&join).unwrap().unwrap().del_height,
        Some(100)
    );
}
