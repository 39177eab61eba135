//! Backchain collection, delivery checks and input resolution.

use airmile_store::LedgerStore;
use airmile_transactions::{LedgerTransaction, SignedTransaction, TransactionError, WireTransaction};
use airmile_types::{Party, StateAndRef, TxHash};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::FlowError;

/// Every transaction `tx` transitively depends on, taken from our store.
///
/// Fails with [`FlowError::MissingBackchain`] naming `us` if any of them is
/// not stored locally.
pub fn collect_backchain(
    store: &dyn LedgerStore,
    tx: &WireTransaction,
    us: &Party,
) -> Result<Vec<SignedTransaction>, FlowError> {
    let mut queue: VecDeque<TxHash> = tx.dependencies().into_iter().collect();
    let mut seen: BTreeSet<TxHash> = queue.iter().copied().collect();
    let mut chain = Vec::new();
    while let Some(id) = queue.pop_front() {
        let dep = store.get_transaction(&id)?.ok_or_else(|| FlowError::MissingBackchain {
            party: us.name.clone(),
            tx_id: id,
        })?;
        for next in dep.tx.dependencies() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
        chain.push(dep);
    }
    Ok(chain)
}

/// Check that each supplied input is exactly what was recorded at its
/// reference.
pub fn check_inputs(store: &dyn LedgerStore, inputs: &[StateAndRef], us: &Party) -> Result<(), FlowError> {
    for input in inputs {
        let recorded = store
            .get_transaction(&input.reference.tx_id)?
            .ok_or_else(|| FlowError::MissingBackchain {
                party: us.name.clone(),
                tx_id: input.reference.tx_id,
            })?;
        match recorded.tx.outputs.get(input.reference.index as usize) {
            Some(state) if *state == input.state => {}
            Some(_) => {
                return Err(TransactionError::InputMismatch {
                    state_ref: input.reference.to_string(),
                }
                .into())
            }
            None => {
                return Err(TransactionError::UnresolvedInput {
                    state_ref: input.reference.to_string(),
                }
                .into())
            }
        }
    }
    Ok(())
}

/// A view over our store plus transactions delivered by a counterparty.
pub struct Backchain<'a> {
    store: &'a dyn LedgerStore,
    delivered: BTreeMap<TxHash, &'a SignedTransaction>,
    us: &'a Party,
}

impl<'a> Backchain<'a> {
    pub fn new(store: &'a dyn LedgerStore, delivered: &'a [SignedTransaction], us: &'a Party) -> Self {
        Self {
            store,
            delivered: delivered.iter().map(|t| (t.id(), t)).collect(),
            us,
        }
    }

    fn lookup(&self, id: &TxHash) -> Result<Option<SignedTransaction>, FlowError> {
        if let Some(tx) = self.delivered.get(id) {
            return Ok(Some((*tx).clone()));
        }
        Ok(self.store.get_transaction(id)?)
    }

    /// Resolve the inputs of `tx` against stored and delivered transactions.
    pub fn resolve(&self, tx: &WireTransaction) -> Result<LedgerTransaction, FlowError> {
        for id in tx.dependencies() {
            if self.lookup(&id)?.is_none() {
                return Err(FlowError::MissingBackchain {
                    party: self.us.name.clone(),
                    tx_id: id,
                });
            }
        }
        let mut failure = None;
        let ltx = tx.to_ledger_transaction(|r| match self.lookup(&r.tx_id) {
            Ok(found) => found.and_then(|stx| stx.tx.outputs.get(r.index as usize).cloned()),
            Err(e) => {
                failure.get_or_insert(e);
                None
            }
        });
        if let Some(e) = failure {
            return Err(e);
        }
        Ok(ltx?)
    }

    /// Check every delivered transaction we do not already store: its id,
    /// its full signature set, and its token rules.
    pub fn verify_delivered(&self) -> Result<(), FlowError> {
        for (id, stx) in &self.delivered {
            if self.store.has_transaction(id)? {
                continue;
            }
            stx.verify_required_signatures()?;
            let ltx = self.resolve(&stx.tx)?;
            airmile_contracts::verify(&ltx)?;
        }
        Ok(())
    }
}
