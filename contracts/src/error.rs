use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The first rule a transaction broke.
///
/// `Display` is the human message; [`RuleViolation::code`] is a stable
/// machine-readable identifier. Assets and parties are carried as rendered
/// strings so a violation can be shipped to a counterparty as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RuleViolation {
    #[error("there must be at least one token command in this transaction")]
    NoCommand,

    #[error("there is a token group with no assigned command ({asset})")]
    UnassignedGroup { asset: String },

    #[error("token group {asset} is governed by {count} commands, expected exactly one")]
    MultipleCommands { asset: String, count: usize },

    #[error("amount must be > zero on issue (output {output} of {asset})")]
    ZeroIssueAmount { asset: String, output: usize },

    #[error("issuer must sign ({asset})")]
    IssuerMustSign { asset: String },

    #[error("there should be tokens to move in inputs ({asset})")]
    MoveWithoutInputs { asset: String },

    #[error("there should be moved tokens in outputs ({asset})")]
    MoveWithoutOutputs { asset: String },

    #[error("output amount must be > zero (output {output} of {asset})")]
    ZeroOutputAmount { asset: String, output: usize },

    #[error("input sum must equal output sum ({input_sum} != {output_sum} for {asset})")]
    SumMismatch {
        asset: String,
        input_sum: u64,
        output_sum: u64,
    },

    #[error("arithmetic overflow while summing {side} of {asset}")]
    ArithmeticOverflow { asset: String, side: String },

    #[error("required signers must contain all current owners ({holder} has not signed for {asset})")]
    OwnersMustSign { asset: String, holder: String },
}

impl RuleViolation {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoCommand => "no-command",
            Self::UnassignedGroup { .. } => "unassigned-group",
            Self::MultipleCommands { .. } => "multiple-commands",
            Self::ZeroIssueAmount { .. } => "zero-issue-amount",
            Self::IssuerMustSign { .. } => "issuer-must-sign",
            Self::MoveWithoutInputs { .. } => "move-without-inputs",
            Self::MoveWithoutOutputs { .. } => "move-without-outputs",
            Self::ZeroOutputAmount { .. } => "zero-output-amount",
            Self::SumMismatch { .. } => "sum-mismatch",
            Self::ArithmeticOverflow { .. } => "arithmetic-overflow",
            Self::OwnersMustSign { .. } => "owners-must-sign",
        }
    }

    pub fn human_message(&self) -> String {
        self.to_string()
    }
}
