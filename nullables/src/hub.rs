//! A service hub with no peers.

use airmile_flows::{AcceptAll, FlowError, FlowSession, NotaryService, ServiceHub, SigningPolicy};
use airmile_store::{LedgerStore, MemoryStore};
use airmile_transactions::TransactionSignature;
use airmile_types::{Party, TxHash};
use async_trait::async_trait;

use crate::identity::TestIdentity;
use crate::notary::NullNotary;

/// Runs flows that never need a counterparty: issuing or moving to
/// ourselves, argument checks, local backchain failures.
///
/// Opening a session always fails with [`FlowError::UnknownParty`].
pub struct NullHub {
    identity: TestIdentity,
    store: MemoryStore,
    notary: NullNotary,
    policy: Box<dyn SigningPolicy>,
}

impl NullHub {
    pub fn new(name: &str) -> Self {
        Self {
            identity: TestIdentity::new(name),
            store: MemoryStore::new(),
            notary: NullNotary::default(),
            policy: Box::new(AcceptAll),
        }
    }

    pub fn with_policy(mut self, policy: impl SigningPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn memory_store(&self) -> &MemoryStore {
        &self.store
    }
}

#[async_trait]
impl ServiceHub for NullHub {
    fn our_identity(&self) -> &Party {
        self.identity.party()
    }

    fn sign(&self, tx_id: &TxHash) -> TransactionSignature {
        self.identity.sign(tx_id)
    }

    fn store(&self) -> &dyn LedgerStore {
        &self.store
    }

    fn notary(&self) -> &dyn NotaryService {
        &self.notary
    }

    fn signing_policy(&self) -> &dyn SigningPolicy {
        self.policy.as_ref()
    }

    async fn open_session(&self, counterparty: &Party) -> Result<FlowSession, FlowError> {
        Err(FlowError::UnknownParty(counterparty.name.clone()))
    }
}
