//! Errors raised by value-level operations on ledger types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("arithmetic overflow adding token quantities")]
    Overflow,

    #[error("cannot combine amounts of different assets: {left} and {right}")]
    AssetMismatch { left: String, right: String },

    #[error("invalid token type: {0}")]
    InvalidTokenType(String),
}
