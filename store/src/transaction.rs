//! Transaction storage trait.

use crate::StoreError;
use airmile_transactions::SignedTransaction;
use airmile_types::{Holding, StateRef, TxHash};

/// Trait for storing committed transactions, including received backchain.
pub trait TransactionStore {
    /// Store a transaction. Returns `false` if it was already present.
    fn put_transaction(&self, tx: &SignedTransaction) -> Result<bool, StoreError>;

    fn get_transaction(&self, id: &TxHash) -> Result<Option<SignedTransaction>, StoreError>;

    fn has_transaction(&self, id: &TxHash) -> Result<bool, StoreError> {
        self.get_transaction(id).map(|tx| tx.is_some())
    }

    /// Ids of every stored transaction.
    fn transaction_ids(&self) -> Result<Vec<TxHash>, StoreError>;

    fn transaction_count(&self) -> Result<u64, StoreError> {
        self.transaction_ids().map(|ids| ids.len() as u64)
    }

    /// The output a reference points at, if its transaction is stored.
    fn resolve_state(&self, state_ref: &StateRef) -> Result<Option<Holding>, StoreError> {
        Ok(self
            .get_transaction(&state_ref.tx_id)?
            .and_then(|stx| stx.tx.outputs.get(state_ref.index as usize).cloned()))
    }
}
