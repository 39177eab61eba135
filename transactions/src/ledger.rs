//! Resolved transactions, the input to rule verification.

use airmile_types::{Holding, Party, StateAndRef, TxHash};

use crate::command::Command;

/// A transaction whose inputs have been resolved to the holdings they
/// reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerTransaction {
    pub id: TxHash,
    pub inputs: Vec<StateAndRef>,
    pub outputs: Vec<Holding>,
    pub commands: Vec<Command>,
    pub notary: Option<Party>,
}

impl LedgerTransaction {
    /// Build directly from resolved parts, with a zero id.
    pub fn from_parts(inputs: Vec<StateAndRef>, outputs: Vec<Holding>, commands: Vec<Command>) -> Self {
        Self {
            id: TxHash::ZERO,
            inputs,
            outputs,
            commands,
            notary: None,
        }
    }

    pub fn input_state(&self, index: usize) -> Option<&Holding> {
        self.inputs.get(index).map(|s| &s.state)
    }
}
