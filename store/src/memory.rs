//! In-memory store, thread-safe for tokio's multi-threaded runtime.

use airmile_transactions::SignedTransaction;
use airmile_types::{StateAndRef, StateRef, TxHash};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::{StoreError, TransactionStore, VaultStore};

#[derive(Clone, Debug)]
struct VaultEntry {
    state: StateAndRef,
    consumed: bool,
}

/// Transactions and vault held in memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    transactions: Mutex<BTreeMap<TxHash, SignedTransaction>>,
    vault: Mutex<BTreeMap<StateRef, VaultEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Poisoned(what.to_string()))
}

impl TransactionStore for MemoryStore {
    fn put_transaction(&self, tx: &SignedTransaction) -> Result<bool, StoreError> {
        let mut txs = lock(&self.transactions, "transactions")?;
        if txs.contains_key(&tx.id()) {
            return Ok(false);
        }
        txs.insert(tx.id(), tx.clone());
        Ok(true)
    }

    fn get_transaction(&self, id: &TxHash) -> Result<Option<SignedTransaction>, StoreError> {
        Ok(lock(&self.transactions, "transactions")?.get(id).cloned())
    }

    fn has_transaction(&self, id: &TxHash) -> Result<bool, StoreError> {
        Ok(lock(&self.transactions, "transactions")?.contains_key(id))
    }

    fn transaction_ids(&self) -> Result<Vec<TxHash>, StoreError> {
        Ok(lock(&self.transactions, "transactions")?.keys().copied().collect())
    }
}

impl VaultStore for MemoryStore {
    fn add_states(&self, states: &[StateAndRef]) -> Result<(), StoreError> {
        let mut vault = lock(&self.vault, "vault")?;
        for state in states {
            vault.entry(state.reference).or_insert_with(|| VaultEntry {
                state: state.clone(),
                consumed: false,
            });
        }
        Ok(())
    }

    fn consume_states(&self, refs: &[StateRef]) -> Result<(), StoreError> {
        let mut vault = lock(&self.vault, "vault")?;
        for r in refs {
            if let Some(entry) = vault.get_mut(r) {
                entry.consumed = true;
            }
        }
        Ok(())
    }

    fn is_consumed(&self, state_ref: &StateRef) -> Result<bool, StoreError> {
        Ok(lock(&self.vault, "vault")?
            .get(state_ref)
            .is_some_and(|e| e.consumed))
    }

    fn unconsumed_states(&self) -> Result<Vec<StateAndRef>, StoreError> {
        Ok(lock(&self.vault, "vault")?
            .values()
            .filter(|e| !e.consumed)
            .map(|e| e.state.clone())
            .collect())
    }
}
