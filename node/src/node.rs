//! A single AirMile node: identity, storage and the services flows use.

use std::sync::{Arc, Weak};

use airmile_flows::{
    respond, Flow, FlowError, FlowSession, NotaryService, ServiceHub, SigningPolicy,
};
use airmile_store::{LedgerStore, MemoryStore, StoreError, VaultStore};
use airmile_transactions::TransactionSignature;
use airmile_types::{AssetIdentity, KeyPair, Party, StateAndRef, TxHash};
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn, Instrument};

use crate::network::NetworkInner;
use crate::tracing_spans::{flow_span, responder_span};

/// A node on a [`MockNetwork`](crate::MockNetwork).
///
/// Each node owns its key pair and its store; it shares the network's
/// notary and reaches its peers through the network.
pub struct Node {
    party: Party,
    keys: KeyPair,
    store: MemoryStore,
    notary: Arc<dyn NotaryService>,
    policy: Arc<dyn SigningPolicy>,
    network: Weak<NetworkInner>,
}

impl Node {
    pub(crate) fn new(
        name: &str,
        notary: Arc<dyn NotaryService>,
        policy: Arc<dyn SigningPolicy>,
        network: Weak<NetworkInner>,
    ) -> Self {
        let keys = airmile_crypto::keypair_from_name(name);
        Self {
            party: Party::new(name, keys.public),
            keys,
            store: MemoryStore::new(),
            notary,
            policy,
            network,
        }
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn name(&self) -> &str {
        &self.party.name
    }

    pub fn memory_store(&self) -> &MemoryStore {
        &self.store
    }

    /// Run `flow` on this node and wait for its result.
    pub async fn start_flow<F: Flow>(&self, flow: F) -> Result<F::Output, FlowError> {
        let span = flow_span(flow.name(), &self.party.name);
        flow.call(self).instrument(span).await
    }

    /// Run `flow` on this node as its own task.
    pub fn spawn_flow<F>(self: &Arc<Self>, flow: F) -> JoinHandle<Result<F::Output, FlowError>>
    where
        F: Flow + 'static,
        F::Output: 'static,
    {
        let node = Arc::clone(self);
        tokio::spawn(async move { node.start_flow(flow).await })
    }

    pub fn unconsumed_states(&self) -> Result<Vec<StateAndRef>, StoreError> {
        self.store.unconsumed_states()
    }

    pub fn unconsumed_of(&self, asset: &AssetIdentity) -> Result<Vec<StateAndRef>, StoreError> {
        self.store.unconsumed_of(asset)
    }

    pub fn balance(&self, asset: &AssetIdentity) -> Result<u64, StoreError> {
        self.store.balance(asset)
    }

    /// Serve a session another node opened with us.
    pub(crate) fn spawn_responder(self: Arc<Self>, session: FlowSession) -> JoinHandle<()> {
        let span = responder_span(&self.party.name, &session.counterparty().name);
        tokio::spawn(
            async move {
                match respond(self.as_ref(), session).await {
                    Ok(Some(tx)) => debug!(tx_id = %tx.id(), "responder recorded transaction"),
                    Ok(None) => debug!("responder aborted by initiator"),
                    Err(e) => warn!(error = %e, "responder failed"),
                }
            }
            .instrument(span),
        )
    }
}

#[async_trait]
impl ServiceHub for Node {
    fn our_identity(&self) -> &Party {
        &self.party
    }

    fn sign(&self, tx_id: &TxHash) -> TransactionSignature {
        TransactionSignature::create(tx_id, &self.keys)
    }

    fn store(&self) -> &dyn LedgerStore {
        &self.store
    }

    fn notary(&self) -> &dyn NotaryService {
        self.notary.as_ref()
    }

    fn signing_policy(&self) -> &dyn SigningPolicy {
        self.policy.as_ref()
    }

    async fn open_session(&self, counterparty: &Party) -> Result<FlowSession, FlowError> {
        let unknown = || FlowError::UnknownParty(counterparty.name.clone());
        let network = self.network.upgrade().ok_or_else(unknown)?;
        let peer = network.node_for(counterparty).ok_or_else(unknown)?;
        let (ours, theirs) = FlowSession::pair(
            self.party.clone(),
            counterparty.clone(),
            network.session_buffer,
            network.session_timeout,
        );
        peer.spawn_responder(theirs);
        Ok(ours)
    }
}
