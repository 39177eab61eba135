//! Moving holdings from their current holders to new ones.

use airmile_transactions::{SignedTransaction, TransactionBuilder};
use airmile_types::{Holding, Party, StateAndRef};
use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::error::FlowError;
use crate::finality::finalise;
use crate::progress::ProgressTracker;
use crate::resolve::{check_inputs, collect_backchain};
use crate::services::{Flow, ServiceHub};
use crate::session::{FlowSession, SessionMessage, TransactionRole};
use crate::signatures::collect_signatures;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveState {
    Building,
    CollectingSessions,
    GatheringSignatures,
    Finalising,
    Done,
    Failed(String),
}

/// Consume `inputs` and create `outputs`. Input holders sign; output holders
/// who held none of the inputs only receive the result.
#[derive(Debug)]
pub struct MoveFlow {
    inputs: Vec<StateAndRef>,
    outputs: Vec<Holding>,
    progress: ProgressTracker<MoveState>,
}

impl MoveFlow {
    pub fn new(inputs: Vec<StateAndRef>, outputs: Vec<Holding>) -> Result<Self, FlowError> {
        if inputs.is_empty() {
            return Err(FlowError::InvalidArgument("inputs cannot be empty".to_string()));
        }
        check_distinct_inputs(&inputs)?;
        if outputs.is_empty() {
            return Err(FlowError::InvalidArgument("outputs cannot be empty".to_string()));
        }
        if outputs.iter().any(|o| o.quantity() == 0) {
            return Err(FlowError::InvalidArgument(
                "output quantities must be positive".to_string(),
            ));
        }
        Ok(Self {
            inputs,
            outputs,
            progress: ProgressTracker::new("move", MoveState::Building),
        })
    }

    pub fn progress(&self) -> ProgressTracker<MoveState> {
        self.progress.clone()
    }

    async fn run(&self, hub: &dyn ServiceHub) -> Result<SignedTransaction, FlowError> {
        let us = hub.our_identity();
        let store = hub.store();
        check_inputs(store, &self.inputs, us)?;

        let mut builder = TransactionBuilder::new(Some(hub.notary().identity().clone()));
        builder.add_move_tokens(self.inputs.clone(), self.outputs.clone());
        let wire = builder.to_wire_transaction()?;
        let dependencies = collect_backchain(store, &wire, us)?;
        let ltx = wire.to_ledger_transaction(|r| {
            self.inputs
                .iter()
                .find(|i| i.reference == *r)
                .map(|i| i.state.clone())
        })?;
        airmile_contracts::verify(&ltx)?;

        self.progress.set(MoveState::CollectingSessions);
        let old_holders = distinct(self.inputs.iter().map(|i| &i.state.holder));
        let new_holders: Vec<Party> = distinct(self.outputs.iter().map(|o| &o.holder))
            .into_iter()
            .filter(|h| !old_holders.contains(h))
            .collect();
        let mut sessions = open_with_roles(hub, &old_holders, TransactionRole::Signer).await?;
        sessions.extend(open_with_roles(hub, &new_holders, TransactionRole::Participant).await?);

        self.progress.set(MoveState::GatheringSignatures);
        let mut sigs = Vec::new();
        if wire.required_signing_keys().contains(&us.owning_key) {
            sigs.push(hub.sign(&wire.id));
        }
        let tx = SignedTransaction::new(wire, sigs);
        let mut signers: Vec<&mut FlowSession> = sessions
            .iter_mut()
            .filter(|(_, role)| *role == TransactionRole::Signer)
            .map(|(s, _)| s)
            .collect();
        let tx = collect_signatures(tx, &dependencies, &mut signers).await?;

        self.progress.set(MoveState::Finalising);
        let mut sessions: Vec<FlowSession> = sessions.into_iter().map(|(s, _)| s).collect();
        let tx = finalise(hub, tx, &dependencies, &mut sessions).await?;

        self.progress.set(MoveState::Done);
        tracing::info!(tx_id = %tx.id(), inputs = self.inputs.len(), outputs = self.outputs.len(), "moved tokens");
        Ok(tx)
    }
}

#[async_trait]
impl Flow for MoveFlow {
    type Output = SignedTransaction;

    fn name(&self) -> &'static str {
        "move"
    }

    async fn call(self, hub: &dyn ServiceHub) -> Result<SignedTransaction, FlowError> {
        let result = self.run(hub).await;
        if let Err(e) = &result {
            self.progress.set(MoveState::Failed(e.to_string()));
        }
        result
    }
}

/// Each input may be consumed only once per transaction.
pub(crate) fn check_distinct_inputs(inputs: &[StateAndRef]) -> Result<(), FlowError> {
    let mut seen = BTreeSet::new();
    for input in inputs {
        if !seen.insert(input.reference) {
            return Err(FlowError::InvalidArgument(format!(
                "input {} is listed more than once",
                input.reference
            )));
        }
    }
    Ok(())
}

/// Parties in order of first appearance, without repeats.
pub(crate) fn distinct<'a>(parties: impl Iterator<Item = &'a Party>) -> Vec<Party> {
    let mut out: Vec<Party> = Vec::new();
    for party in parties {
        if !out.contains(party) {
            out.push(party.clone());
        }
    }
    out
}

/// Open a session to each party other than ourselves and tell it its role.
pub(crate) async fn open_with_roles(
    hub: &dyn ServiceHub,
    parties: &[Party],
    role: TransactionRole,
) -> Result<Vec<(FlowSession, TransactionRole)>, FlowError> {
    let mut sessions = Vec::new();
    for party in parties {
        if party == hub.our_identity() {
            continue;
        }
        let session = hub.open_session(party).await?;
        session.send(SessionMessage::Role(role)).await?;
        sessions.push((session, role));
    }
    Ok(sessions)
}
