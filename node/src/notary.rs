//! A notary that orders input consumption for a whole in-process network.

use std::collections::BTreeMap;
use std::sync::Mutex;

use airmile_flows::{NotaryError, NotaryService};
use airmile_transactions::{SignedTransaction, TransactionSignature};
use airmile_types::{KeyPair, Party, StateRef, TxHash};
use async_trait::async_trait;
use tracing::{debug, warn, Instrument};

use crate::tracing_spans::notarise_span;

/// Signs transactions and remembers which transaction consumed each state.
///
/// A state consumed by one transaction can never be consumed by another.
/// Re-notarising the same transaction is accepted.
pub struct InMemoryNotary {
    party: Party,
    keys: KeyPair,
    consumed: Mutex<BTreeMap<StateRef, TxHash>>,
}

impl InMemoryNotary {
    pub fn new(name: &str) -> Self {
        let keys = airmile_crypto::keypair_from_name(name);
        Self {
            party: Party::new(name, keys.public),
            keys,
            consumed: Mutex::new(BTreeMap::new()),
        }
    }

    /// The transaction that consumed `state_ref`, if any.
    pub fn consumed_by(&self, state_ref: &StateRef) -> Result<Option<TxHash>, NotaryError> {
        Ok(self.lock()?.get(state_ref).copied())
    }

    pub fn consumed_count(&self) -> Result<usize, NotaryError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<StateRef, TxHash>>, NotaryError> {
        self.consumed
            .lock()
            .map_err(|_| NotaryError::Unavailable("consumed-state index poisoned".to_string()))
    }

    fn commit_inputs(&self, tx: &SignedTransaction) -> Result<(), NotaryError> {
        let id = tx.id();
        let mut consumed = self.lock()?;
        for input in &tx.tx.inputs {
            if let Some(previous) = consumed.get(input) {
                if *previous != id {
                    warn!(state = %input, consumed_by = %previous, "double spend refused");
                    return Err(NotaryError::Conflict {
                        state: input.to_string(),
                        consumed_by: *previous,
                    });
                }
            }
        }
        for input in &tx.tx.inputs {
            consumed.insert(*input, id);
        }
        Ok(())
    }
}

#[async_trait]
impl NotaryService for InMemoryNotary {
    fn identity(&self) -> &Party {
        &self.party
    }

    async fn notarise(&self, tx: &SignedTransaction) -> Result<TransactionSignature, NotaryError> {
        let span = notarise_span(&self.party.name, &tx.id().to_string());
        async {
            if tx.tx.notary.as_ref() != Some(&self.party) {
                return Err(NotaryError::WrongNotary {
                    named: tx.tx.notary.as_ref().map(|n| n.name.clone()).unwrap_or_default(),
                    ours: self.party.name.clone(),
                });
            }
            tx.verify_signatures_except(&[self.party.owning_key])?;
            self.commit_inputs(tx)?;
            debug!(inputs = tx.tx.inputs.len(), "notarised");
            Ok(TransactionSignature::create(&tx.id(), &self.keys))
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airmile_transactions::{TransactionBuilder, TransactionError};
    use airmile_types::{Holding, StateAndRef, TokenType};

    fn party_keys(name: &str) -> (Party, KeyPair) {
        let keys = airmile_crypto::keypair_from_name(name);
        (Party::new(name, keys.public), keys)
    }

    fn spend(notary: &InMemoryNotary, input: &StateAndRef, to: &str) -> SignedTransaction {
        let (_, alice_keys) = party_keys("Alice");
        let (to, _) = party_keys(to);
        let mut builder = TransactionBuilder::new(Some(notary.identity().clone()));
        builder.add_move_tokens(vec![input.clone()], vec![input.state.with_new_holder(to)]);
        builder.sign_initial(&alice_keys).unwrap()
    }

    fn alice_input() -> StateAndRef {
        let (alice, _) = party_keys("Alice");
        let held = Holding::issued(&alice, TokenType::air_mile(), 10, &alice);
        StateAndRef::new(held, StateRef::new(TxHash::new([7; 32]), 0))
    }

    #[tokio::test]
    async fn signs_and_records_consumption() {
        let notary = InMemoryNotary::new("Notary");
        let input = alice_input();
        let tx = spend(&notary, &input, "Bob");
        let sig = notary.notarise(&tx).await.unwrap();
        assert!(sig.is_valid_for(&tx.id()));
        assert_eq!(notary.consumed_by(&input.reference).unwrap(), Some(tx.id()));
    }

    #[tokio::test]
    async fn same_transaction_twice_is_accepted() {
        let notary = InMemoryNotary::new("Notary");
        let tx = spend(&notary, &alice_input(), "Bob");
        notary.notarise(&tx).await.unwrap();
        notary.notarise(&tx).await.unwrap();
        assert_eq!(notary.consumed_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn double_spend_is_a_conflict() {
        let notary = InMemoryNotary::new("Notary");
        let input = alice_input();
        let first = spend(&notary, &input, "Bob");
        let second = spend(&notary, &input, "Carly");
        notary.notarise(&first).await.unwrap();
        match notary.notarise(&second).await {
            Err(NotaryError::Conflict { consumed_by, .. }) => assert_eq!(consumed_by, first.id()),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_signature_is_refused_without_consuming() {
        let notary = InMemoryNotary::new("Notary");
        let input = alice_input();
        let tx = spend(&notary, &input, "Bob");
        let unsigned = SignedTransaction::new(tx.tx.clone(), vec![]);
        assert!(matches!(
            notary.notarise(&unsigned).await,
            Err(NotaryError::Signatures(_))
        ));
        assert_eq!(notary.consumed_by(&input.reference).unwrap(), None);
    }

    #[tokio::test]
    async fn repeated_input_is_refused_without_consuming() {
        let notary = InMemoryNotary::new("Notary");
        let input = alice_input();
        let mut wire = spend(&notary, &input, "Bob").tx;
        wire.inputs.push(input.reference);
        wire.outputs[0].amount.quantity = 20;
        let (_, alice_keys) = party_keys("Alice");
        let tx = SignedTransaction::sign_initial(wire, &alice_keys);
        assert!(matches!(
            notary.notarise(&tx).await,
            Err(NotaryError::Signatures(TransactionError::DuplicateInput { .. }))
        ));
        assert_eq!(notary.consumed_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn refuses_transactions_naming_another_notary() {
        let notary = InMemoryNotary::new("Notary");
        let elsewhere = InMemoryNotary::new("Elsewhere");
        let tx = spend(&elsewhere, &alice_input(), "Bob");
        assert!(matches!(
            notary.notarise(&tx).await,
            Err(NotaryError::WrongNotary { .. })
        ));
    }
}
