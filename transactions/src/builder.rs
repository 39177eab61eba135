//! Transaction assembly.

use airmile_types::{AssetIdentity, Holding, KeyPair, Party, PublicKey, StateAndRef};
use std::collections::BTreeSet;

use crate::command::{Command, TokenCommand};
use crate::error::TransactionError;
use crate::signed::SignedTransaction;
use crate::wire::WireTransaction;

/// Mutable scratch space for a transaction under construction.
///
/// The token helpers append states and emit exactly one command per asset,
/// so the result always satisfies the one-command-per-group rule.
#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    notary: Option<Party>,
    inputs: Vec<StateAndRef>,
    outputs: Vec<Holding>,
    commands: Vec<Command>,
}

impl TransactionBuilder {
    pub fn new(notary: Option<Party>) -> Self {
        Self {
            notary,
            ..Self::default()
        }
    }

    pub fn add_input_state(&mut self, input: StateAndRef) -> usize {
        self.inputs.push(input);
        self.inputs.len() - 1
    }

    pub fn add_output_state(&mut self, output: Holding) -> usize {
        self.outputs.push(output);
        self.outputs.len() - 1
    }

    pub fn add_command(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn inputs(&self) -> &[StateAndRef] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Holding] {
        &self.outputs
    }

    /// Add `outputs` as freshly issued holdings, one Issue command per asset
    /// signed by that asset's issuer.
    pub fn add_issue_tokens(&mut self, outputs: Vec<Holding>) -> &mut Self {
        let mut groups: Vec<(AssetIdentity, Vec<usize>)> = Vec::new();
        for output in outputs {
            let asset = output.asset().clone();
            let index = self.add_output_state(output);
            group_entry(&mut groups, asset).push(index);
        }
        for (asset, outputs) in groups {
            let issuer = asset.issuer.owning_key;
            self.add_command(Command::new(TokenCommand::Issue { asset, outputs }, [issuer]));
        }
        self
    }

    /// Consume `inputs` and create `outputs`, one Move command per asset
    /// signed by the holders of that asset's inputs.
    pub fn add_move_tokens(&mut self, inputs: Vec<StateAndRef>, outputs: Vec<Holding>) -> &mut Self {
        let mut groups: Vec<MoveGroup> = Vec::new();
        for input in inputs {
            let asset = input.state.asset().clone();
            let holder = input.state.holder.owning_key;
            let index = self.add_input_state(input);
            let group = move_entry(&mut groups, asset);
            group.1.push(index);
            group.3.insert(holder);
        }
        for output in outputs {
            let asset = output.asset().clone();
            let index = self.add_output_state(output);
            move_entry(&mut groups, asset).2.push(index);
        }
        for (asset, inputs, outputs, signers) in groups {
            self.add_command(Command::new(
                TokenCommand::Move {
                    asset,
                    inputs,
                    outputs,
                },
                signers,
            ));
        }
        self
    }

    /// Consume `inputs` without outputs, one Redeem command per asset signed
    /// by the issuer and every holder.
    pub fn add_redeem_tokens(&mut self, inputs: Vec<StateAndRef>) -> &mut Self {
        let mut groups: Vec<MoveGroup> = Vec::new();
        for input in inputs {
            let asset = input.state.asset().clone();
            let issuer = asset.issuer.owning_key;
            let holder = input.state.holder.owning_key;
            let index = self.add_input_state(input);
            let group = move_entry(&mut groups, asset);
            group.1.push(index);
            group.3.insert(issuer);
            group.3.insert(holder);
        }
        for (asset, inputs, _, signers) in groups {
            self.add_command(Command::new(TokenCommand::Redeem { asset, inputs }, signers));
        }
        self
    }

    pub fn to_wire_transaction(&self) -> Result<WireTransaction, TransactionError> {
        WireTransaction::new(
            self.inputs.iter().map(|s| s.reference).collect(),
            self.outputs.clone(),
            self.commands.clone(),
            self.notary.clone(),
        )
    }

    /// Build the wire transaction and sign it with `keys`.
    pub fn sign_initial(&self, keys: &KeyPair) -> Result<SignedTransaction, TransactionError> {
        Ok(SignedTransaction::sign_initial(self.to_wire_transaction()?, keys))
    }
}

fn group_entry(groups: &mut Vec<(AssetIdentity, Vec<usize>)>, asset: AssetIdentity) -> &mut Vec<usize> {
    let position = match groups.iter().position(|(a, _)| *a == asset) {
        Some(p) => p,
        None => {
            groups.push((asset, Vec::new()));
            groups.len() - 1
        }
    };
    &mut groups[position].1
}

type MoveGroup = (AssetIdentity, Vec<usize>, Vec<usize>, BTreeSet<PublicKey>);

fn move_entry(groups: &mut Vec<MoveGroup>, asset: AssetIdentity) -> &mut MoveGroup {
    let position = match groups.iter().position(|g| g.0 == asset) {
        Some(p) => p,
        None => {
            groups.push((asset, Vec::new(), Vec::new(), BTreeSet::new()));
            groups.len() - 1
        }
    };
    &mut groups[position]
}
