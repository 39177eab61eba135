//! Redemption: holdings are destroyed with the consent of issuer and holders.

use airmile_transactions::{SignedTransaction, TransactionBuilder};
use airmile_types::StateAndRef;
use async_trait::async_trait;

use crate::error::FlowError;
use crate::finality::finalise;
use crate::move_tokens::{check_distinct_inputs, distinct, open_with_roles};
use crate::progress::ProgressTracker;
use crate::resolve::{check_inputs, collect_backchain};
use crate::services::{Flow, ServiceHub};
use crate::session::{FlowSession, TransactionRole};
use crate::signatures::collect_signatures;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedeemState {
    Building,
    CollectingSessions,
    GatheringSignatures,
    Finalising,
    Done,
    Failed(String),
}

/// Redeem `inputs`. Every issuer and every holder of an input signs.
#[derive(Debug)]
pub struct RedeemFlow {
    inputs: Vec<StateAndRef>,
    progress: ProgressTracker<RedeemState>,
}

impl RedeemFlow {
    pub fn new(inputs: Vec<StateAndRef>) -> Result<Self, FlowError> {
        if inputs.is_empty() {
            return Err(FlowError::InvalidArgument("inputs cannot be empty".to_string()));
        }
        check_distinct_inputs(&inputs)?;
        Ok(Self {
            inputs,
            progress: ProgressTracker::new("redeem", RedeemState::Building),
        })
    }

    pub fn progress(&self) -> ProgressTracker<RedeemState> {
        self.progress.clone()
    }

    async fn run(&self, hub: &dyn ServiceHub) -> Result<SignedTransaction, FlowError> {
        let us = hub.our_identity();
        let store = hub.store();
        check_inputs(store, &self.inputs, us)?;

        let mut builder = TransactionBuilder::new(Some(hub.notary().identity().clone()));
        builder.add_redeem_tokens(self.inputs.clone());
        let wire = builder.to_wire_transaction()?;
        let dependencies = collect_backchain(store, &wire, us)?;
        let ltx = wire.to_ledger_transaction(|r| {
            self.inputs
                .iter()
                .find(|i| i.reference == *r)
                .map(|i| i.state.clone())
        })?;
        airmile_contracts::verify(&ltx)?;

        self.progress.set(RedeemState::CollectingSessions);
        let signers = distinct(
            self.inputs
                .iter()
                .map(|i| i.state.issuer())
                .chain(self.inputs.iter().map(|i| &i.state.holder)),
        );
        let mut sessions = open_with_roles(hub, &signers, TransactionRole::Signer).await?;

        self.progress.set(RedeemState::GatheringSignatures);
        let mut sigs = Vec::new();
        if wire.required_signing_keys().contains(&us.owning_key) {
            sigs.push(hub.sign(&wire.id));
        }
        let tx = SignedTransaction::new(wire, sigs);
        let mut to_sign: Vec<&mut FlowSession> = sessions.iter_mut().map(|(s, _)| s).collect();
        let tx = collect_signatures(tx, &dependencies, &mut to_sign).await?;

        self.progress.set(RedeemState::Finalising);
        let mut sessions: Vec<FlowSession> = sessions.into_iter().map(|(s, _)| s).collect();
        let tx = finalise(hub, tx, &dependencies, &mut sessions).await?;

        self.progress.set(RedeemState::Done);
        tracing::info!(tx_id = %tx.id(), inputs = self.inputs.len(), "redeemed tokens");
        Ok(tx)
    }
}

#[async_trait]
impl Flow for RedeemFlow {
    type Output = SignedTransaction;

    fn name(&self) -> &'static str {
        "redeem"
    }

    async fn call(self, hub: &dyn ServiceHub) -> Result<SignedTransaction, FlowError> {
        let result = self.run(hub).await;
        if let Err(e) = &result {
            self.progress.set(RedeemState::Failed(e.to_string()));
        }
        result
    }
}
