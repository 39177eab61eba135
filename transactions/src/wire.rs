//! The unresolved, hashable transaction.

use airmile_types::{Holding, Party, PublicKey, StateRef, TxHash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::command::Command;
use crate::error::TransactionError;
use crate::ledger::LedgerTransaction;

/// A transaction as it travels between parties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTransaction {
    pub id: TxHash,
    pub inputs: Vec<StateRef>,
    pub outputs: Vec<Holding>,
    pub commands: Vec<Command>,
    /// Required when the transaction consumes inputs.
    pub notary: Option<Party>,
}

impl WireTransaction {
    pub fn new(
        inputs: Vec<StateRef>,
        outputs: Vec<Holding>,
        commands: Vec<Command>,
        notary: Option<Party>,
    ) -> Result<Self, TransactionError> {
        check_structure(&inputs, &outputs)?;
        let id = compute_id(&inputs, &outputs, &commands, &notary)?;
        Ok(Self {
            id,
            inputs,
            outputs,
            commands,
            notary,
        })
    }

    /// Recompute the id from the body and compare it to the claimed one.
    pub fn check_id(&self) -> Result<(), TransactionError> {
        check_structure(&self.inputs, &self.outputs)?;
        let computed = compute_id(&self.inputs, &self.outputs, &self.commands, &self.notary)?;
        if computed != self.id {
            return Err(TransactionError::IdMismatch {
                claimed: self.id.to_string(),
                computed: computed.to_string(),
            });
        }
        Ok(())
    }

    /// Reference to output `index` of this transaction, if there is one.
    pub fn out_ref(&self, index: usize) -> Option<StateRef> {
        if index >= self.outputs.len() {
            return None;
        }
        u32::try_from(index).ok().map(|i| StateRef::new(self.id, i))
    }

    /// Every output paired with its reference.
    pub fn output_refs(&self) -> impl Iterator<Item = (StateRef, &Holding)> + '_ {
        (0..=u32::MAX)
            .zip(&self.outputs)
            .map(move |(i, h)| (StateRef::new(self.id, i), h))
    }

    /// Every command signer, plus the notary when inputs are consumed.
    pub fn required_signing_keys(&self) -> BTreeSet<PublicKey> {
        let mut keys: BTreeSet<PublicKey> = self
            .commands
            .iter()
            .flat_map(|c| c.signers.iter().copied())
            .collect();
        if !self.inputs.is_empty() {
            if let Some(notary) = &self.notary {
                keys.insert(notary.owning_key);
            }
        }
        keys
    }

    /// Holders of the outputs, deduplicated, in order of first appearance.
    pub fn output_holders(&self) -> Vec<Party> {
        let mut holders: Vec<Party> = Vec::new();
        for output in &self.outputs {
            if !holders.contains(&output.holder) {
                holders.push(output.holder.clone());
            }
        }
        holders
    }

    /// Ids of the transactions whose outputs this one consumes.
    pub fn dependencies(&self) -> BTreeSet<TxHash> {
        self.inputs.iter().map(|r| r.tx_id).collect()
    }

    /// Resolve input references with `resolve`, producing the form the
    /// verifier checks.
    pub fn to_ledger_transaction<F>(&self, mut resolve: F) -> Result<LedgerTransaction, TransactionError>
    where
        F: FnMut(&StateRef) -> Option<Holding>,
    {
        let inputs = self
            .inputs
            .iter()
            .map(|r| {
                resolve(r)
                    .map(|state| airmile_types::StateAndRef::new(state, *r))
                    .ok_or_else(|| TransactionError::UnresolvedInput {
                        state_ref: r.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LedgerTransaction {
            id: self.id,
            inputs,
            outputs: self.outputs.clone(),
            commands: self.commands.clone(),
            notary: self.notary.clone(),
        })
    }
}

/// Inputs must be distinct and both lists must be addressable by a `u32`
/// index.
fn check_structure(inputs: &[StateRef], outputs: &[Holding]) -> Result<(), TransactionError> {
    for (kind, count) in [("inputs", inputs.len()), ("outputs", outputs.len())] {
        if u32::try_from(count).is_err() {
            return Err(TransactionError::TooManyStates { kind, count });
        }
    }
    let mut seen = BTreeSet::new();
    for r in inputs {
        if !seen.insert(r) {
            return Err(TransactionError::DuplicateInput {
                state_ref: r.to_string(),
            });
        }
    }
    Ok(())
}

fn compute_id(
    inputs: &[StateRef],
    outputs: &[Holding],
    commands: &[Command],
    notary: &Option<Party>,
) -> Result<TxHash, TransactionError> {
    let body = bincode::serialize(&(inputs, outputs, commands, notary))?;
    Ok(airmile_crypto::hash_transaction(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::TokenCommand;
    use airmile_types::{AssetIdentity, TokenType};

    fn party(name: &str) -> Party {
        Party::new(name, airmile_crypto::keypair_from_name(name).public)
    }

    fn issue_tx(quantity: u64) -> WireTransaction {
        let alice = party("Alice");
        let output = Holding::issued(&alice, TokenType::air_mile(), quantity, &party("Bob"));
        let cmd = Command::new(
            TokenCommand::Issue {
                asset: AssetIdentity::new(alice.clone(), TokenType::air_mile()),
                outputs: vec![0],
            },
            [alice.owning_key],
        );
        WireTransaction::new(vec![], vec![output], vec![cmd], None).unwrap()
    }

    #[test]
    fn id_depends_on_contents() {
        assert_eq!(issue_tx(10).id, issue_tx(10).id);
        assert_ne!(issue_tx(10).id, issue_tx(11).id);
    }

    #[test]
    fn tampered_body_fails_id_check() {
        let mut tx = issue_tx(10);
        assert!(tx.check_id().is_ok());
        tx.outputs[0].amount.quantity = 1_000;
        assert!(matches!(tx.check_id(), Err(TransactionError::IdMismatch { .. })));
    }

    #[test]
    fn notary_key_required_only_with_inputs() {
        let notary = party("Notary");
        let tx = issue_tx(10);
        assert!(!tx.required_signing_keys().contains(&notary.owning_key));

        let moving = WireTransaction::new(
            vec![tx.out_ref(0).unwrap()],
            tx.outputs.clone(),
            vec![],
            Some(notary.clone()),
        )
        .unwrap();
        assert!(moving.required_signing_keys().contains(&notary.owning_key));
    }

    #[test]
    fn unresolved_input_is_reported() {
        let tx = issue_tx(10);
        let spending = WireTransaction::new(vec![tx.out_ref(0).unwrap()], vec![], vec![], None).unwrap();
        let err = spending.to_ledger_transaction(|_| None).unwrap_err();
        assert!(matches!(err, TransactionError::UnresolvedInput { .. }));

        let ltx = spending
            .to_ledger_transaction(|_| Some(tx.outputs[0].clone()))
            .unwrap();
        assert_eq!(ltx.inputs[0].state, tx.outputs[0]);
    }

    #[test]
    fn repeated_input_is_rejected() {
        let tx = issue_tx(10);
        let input = tx.out_ref(0).unwrap();
        let doubled = Holding::issued(&party("Alice"), TokenType::air_mile(), 20, &party("Carly"));
        let err = WireTransaction::new(vec![input, input], vec![doubled], vec![], Some(party("Notary")))
            .unwrap_err();
        assert!(matches!(err, TransactionError::DuplicateInput { .. }));
    }

    #[test]
    fn hand_built_repeated_input_fails_id_check() {
        let tx = issue_tx(10);
        let input = tx.out_ref(0).unwrap();
        let inputs = vec![input, input];
        let notary = Some(party("Notary"));
        let id = compute_id(&inputs, &tx.outputs, &[], &notary).unwrap();
        let forged = WireTransaction {
            id,
            inputs,
            outputs: tx.outputs.clone(),
            commands: vec![],
            notary,
        };
        assert!(matches!(forged.check_id(), Err(TransactionError::DuplicateInput { .. })));
    }

    #[test]
    fn out_ref_stays_within_outputs() {
        let tx = issue_tx(10);
        assert_eq!(tx.out_ref(0), Some(StateRef::new(tx.id, 0)));
        assert_eq!(tx.out_ref(1), None);
        assert_eq!(tx.out_ref(usize::MAX), None);
        let refs: Vec<StateRef> = tx.output_refs().map(|(r, _)| r).collect();
        assert_eq!(refs, vec![StateRef::new(tx.id, 0)]);
    }
}
