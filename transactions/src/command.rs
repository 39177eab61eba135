//! Token commands: the instruction attached to each asset group.

use airmile_types::{AssetIdentity, PublicKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// What a transaction does to one asset.
///
/// Indices point into the transaction's flat input and output lists. The set
/// of variants is closed; the verifier matches on it exhaustively.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenCommand {
    /// Create new holdings out of nothing. Only the issuer may do this.
    Issue {
        asset: AssetIdentity,
        outputs: Vec<usize>,
    },
    /// Re-assign existing holdings. Quantity is conserved.
    Move {
        asset: AssetIdentity,
        inputs: Vec<usize>,
        outputs: Vec<usize>,
    },
    /// Destroy holdings, returning them to the issuer.
    Redeem {
        asset: AssetIdentity,
        inputs: Vec<usize>,
    },
}

impl TokenCommand {
    pub fn asset(&self) -> &AssetIdentity {
        match self {
            Self::Issue { asset, .. } | Self::Move { asset, .. } | Self::Redeem { asset, .. } => {
                asset
            }
        }
    }

    pub fn input_indices(&self) -> &[usize] {
        match self {
            Self::Issue { .. } => &[],
            Self::Move { inputs, .. } | Self::Redeem { inputs, .. } => inputs,
        }
    }

    pub fn output_indices(&self) -> &[usize] {
        match self {
            Self::Issue { outputs, .. } | Self::Move { outputs, .. } => outputs,
            Self::Redeem { .. } => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Issue { .. } => "issue",
            Self::Move { .. } => "move",
            Self::Redeem { .. } => "redeem",
        }
    }
}

/// A token command together with the keys that must sign for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    pub value: TokenCommand,
    pub signers: BTreeSet<PublicKey>,
}

impl Command {
    pub fn new(value: TokenCommand, signers: impl IntoIterator<Item = PublicKey>) -> Self {
        Self {
            value,
            signers: signers.into_iter().collect(),
        }
    }

    pub fn is_signed_by(&self, key: &PublicKey) -> bool {
        self.signers.contains(key)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} signers)",
            self.value.name(),
            self.value.asset(),
            self.signers.len()
        )
    }
}
