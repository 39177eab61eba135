//! Issuance: the issuer mints holdings for a list of holders.

use airmile_store::{record_transaction, StatesToRecord};
use airmile_transactions::{SignedTransaction, TransactionBuilder};
use airmile_types::{Holding, Party, TokenType};
use async_trait::async_trait;

use crate::error::FlowError;
use crate::finality::finalise;
use crate::progress::ProgressTracker;
use crate::services::{Flow, ServiceHub};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueState {
    Building,
    Finalising,
    Done,
    Failed(String),
}

/// Issue `quantity` of a token to each listed holder, with the running node
/// as issuer.
#[derive(Debug)]
pub struct IssueFlow {
    held_quantities: Vec<(Party, u64)>,
    token_type: TokenType,
    progress: ProgressTracker<IssueState>,
}

impl IssueFlow {
    /// Fails when the list is empty or any quantity is zero.
    pub fn new(held_quantities: Vec<(Party, u64)>) -> Result<Self, FlowError> {
        if held_quantities.is_empty() {
            return Err(FlowError::InvalidArgument(
                "held quantities cannot be empty".to_string(),
            ));
        }
        if let Some((holder, _)) = held_quantities.iter().find(|(_, q)| *q == 0) {
            return Err(FlowError::InvalidArgument(format!(
                "quantity issued to {holder} must be positive"
            )));
        }
        Ok(Self {
            held_quantities,
            token_type: TokenType::air_mile(),
            progress: ProgressTracker::new("issue", IssueState::Building),
        })
    }

    pub fn single(holder: Party, quantity: u64) -> Result<Self, FlowError> {
        Self::new(vec![(holder, quantity)])
    }

    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    pub fn progress(&self) -> ProgressTracker<IssueState> {
        self.progress.clone()
    }

    async fn run(&self, hub: &dyn ServiceHub) -> Result<SignedTransaction, FlowError> {
        let issuer = hub.our_identity();
        let outputs: Vec<Holding> = self
            .held_quantities
            .iter()
            .map(|(holder, quantity)| Holding::issued(issuer, self.token_type.clone(), *quantity, holder))
            .collect();
        let mut builder = TransactionBuilder::new(Some(hub.notary().identity().clone()));
        builder.add_issue_tokens(outputs);
        let wire = builder.to_wire_transaction()?;
        let signature = hub.sign(&wire.id);
        let tx = SignedTransaction::new(wire, vec![signature]);

        self.progress.set(IssueState::Finalising);
        let mut sessions = Vec::new();
        for holder in tx.tx.output_holders() {
            if holder != *issuer {
                sessions.push(hub.open_session(&holder).await?);
            }
        }
        let tx = finalise(hub, tx, &[], &mut sessions).await?;

        // The issuer keeps every output so it can account for total supply.
        record_transaction(hub.store(), &tx, StatesToRecord::AllVisible, &hub.our_keys())?;
        self.progress.set(IssueState::Done);
        tracing::info!(tx_id = %tx.id(), holders = self.held_quantities.len(), "issued tokens");
        Ok(tx)
    }
}

#[async_trait]
impl Flow for IssueFlow {
    type Output = SignedTransaction;

    fn name(&self) -> &'static str {
        "issue"
    }

    async fn call(self, hub: &dyn ServiceHub) -> Result<SignedTransaction, FlowError> {
        let result = self.run(hub).await;
        if let Err(e) = &result {
            self.progress.set(IssueState::Failed(e.to_string()));
        }
        result
    }
}
