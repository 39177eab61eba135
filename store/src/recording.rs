//! Recording committed transactions.

use airmile_transactions::SignedTransaction;
use airmile_types::{PublicKey, StateAndRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{LedgerStore, StoreError};

/// Which outputs of a recorded transaction enter the vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatesToRecord {
    /// Store the transaction only. Used for backchain.
    None,
    /// Outputs held by one of our keys.
    OnlyRelevant,
    /// Every output, e.g. for an issuer tracking total supply.
    AllVisible,
}

/// Store `tx` and update the vault according to `mode`.
///
/// Idempotent: recording the same transaction again changes nothing, except
/// that a wider mode can add outputs an earlier narrower one skipped.
pub fn record_transaction<S: LedgerStore + ?Sized>(
    store: &S,
    tx: &SignedTransaction,
    mode: StatesToRecord,
    our_keys: &BTreeSet<PublicKey>,
) -> Result<(), StoreError> {
    let fresh = store.put_transaction(tx)?;
    if mode == StatesToRecord::None {
        tracing::trace!(tx_id = %tx.id(), fresh, "stored backchain transaction");
        return Ok(());
    }

    let states: Vec<StateAndRef> = tx
        .tx
        .output_refs()
        .filter(|(_, h)| mode == StatesToRecord::AllVisible || our_keys.contains(&h.holder.owning_key))
        .map(|(r, h)| StateAndRef::new(h.clone(), r))
        .collect();
    store.add_states(&states)?;
    store.consume_states(&tx.tx.inputs)?;

    tracing::debug!(
        tx_id = %tx.id(),
        fresh,
        ?mode,
        vault_states = states.len(),
        "recorded transaction"
    );
    Ok(())
}
