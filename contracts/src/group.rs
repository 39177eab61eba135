//! Partitioning of transaction states by asset.

use airmile_transactions::LedgerTransaction;
use airmile_types::{AssetIdentity, Holding};

/// The inputs and outputs of one asset within a transaction, tagged with
/// their flat indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGroup<'a> {
    pub asset: &'a AssetIdentity,
    pub inputs: Vec<(usize, &'a Holding)>,
    pub outputs: Vec<(usize, &'a Holding)>,
}

impl<'a> TokenGroup<'a> {
    fn new(asset: &'a AssetIdentity) -> Self {
        Self {
            asset,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn input_indices(&self) -> Vec<usize> {
        self.inputs.iter().map(|(i, _)| *i).collect()
    }

    pub fn output_indices(&self) -> Vec<usize> {
        self.outputs.iter().map(|(i, _)| *i).collect()
    }
}

/// Group inputs then outputs by asset, in order of first appearance.
pub fn group_states(tx: &LedgerTransaction) -> Vec<TokenGroup<'_>> {
    let mut groups: Vec<TokenGroup<'_>> = Vec::new();
    for (index, input) in tx.inputs.iter().enumerate() {
        entry(&mut groups, input.state.asset()).inputs.push((index, &input.state));
    }
    for (index, output) in tx.outputs.iter().enumerate() {
        entry(&mut groups, output.asset()).outputs.push((index, output));
    }
    groups
}

fn entry<'a, 'g>(groups: &'g mut Vec<TokenGroup<'a>>, asset: &'a AssetIdentity) -> &'g mut TokenGroup<'a> {
    let position = match groups.iter().position(|g| g.asset == asset) {
        Some(p) => p,
        None => {
            groups.push(TokenGroup::new(asset));
            groups.len() - 1
        }
    };
    &mut groups[position]
}
