//! The seams between protocol logic and the node running it.

use airmile_store::LedgerStore;
use airmile_transactions::{LedgerTransaction, SignedTransaction, TransactionSignature};
use airmile_types::{Party, PublicKey, TxHash};
use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::error::{FlowError, NotaryError};
use crate::session::FlowSession;

/// Orders transactions that consume inputs and signs them.
#[async_trait]
pub trait NotaryService: Send + Sync {
    fn identity(&self) -> &Party;

    /// Sign `tx` unless it names another notary, lacks a required
    /// signature, or consumes a state another transaction already consumed.
    /// Notarising the same transaction twice succeeds both times.
    async fn notarise(&self, tx: &SignedTransaction) -> Result<TransactionSignature, NotaryError>;
}

/// Extra checks a signer runs after the token rules pass.
pub trait SigningPolicy: Send + Sync {
    /// Return the reason for refusing to sign, if any.
    fn check(&self, tx: &LedgerTransaction, us: &Party) -> Result<(), String>;
}

/// Signs anything that satisfies the token rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl SigningPolicy for AcceptAll {
    fn check(&self, _tx: &LedgerTransaction, _us: &Party) -> Result<(), String> {
        Ok(())
    }
}

/// Everything a flow may use on the node running it.
#[async_trait]
pub trait ServiceHub: Send + Sync {
    fn our_identity(&self) -> &Party;

    fn our_keys(&self) -> BTreeSet<PublicKey> {
        BTreeSet::from([self.our_identity().owning_key])
    }

    /// Sign a transaction id with our identity key.
    fn sign(&self, tx_id: &TxHash) -> TransactionSignature;

    fn store(&self) -> &dyn LedgerStore;

    fn notary(&self) -> &dyn NotaryService;

    fn signing_policy(&self) -> &dyn SigningPolicy;

    /// Open a session with `counterparty`, which starts responding to it.
    async fn open_session(&self, counterparty: &Party) -> Result<FlowSession, FlowError>;
}

/// A protocol run started by one node.
#[async_trait]
pub trait Flow: Send {
    type Output: Send;

    fn name(&self) -> &'static str;

    async fn call(self, hub: &dyn ServiceHub) -> Result<Self::Output, FlowError>;
}
