//! Asset identity: what makes two token amounts fungible with each other.

use crate::party::Party;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type descriptor of a token, independent of who issued it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenType {
    pub identifier: String,
    /// Number of decimal places a display quantity carries.
    pub fraction_digits: u32,
}

impl TokenType {
    pub fn new(identifier: impl Into<String>, fraction_digits: u32) -> Self {
        Self {
            identifier: identifier.into(),
            fraction_digits,
        }
    }

    /// The reward-point token every flow issues unless told otherwise.
    pub fn air_mile() -> Self {
        Self::new("AirMile", 0)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

/// The (issuer, type, precision) triple identifying a fungible asset class.
///
/// Holdings are grouped by this key during verification: amounts of the same
/// token type from different issuers never mix.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetIdentity {
    pub issuer: Party,
    pub token_type: TokenType,
}

impl AssetIdentity {
    pub fn new(issuer: Party, token_type: TokenType) -> Self {
        Self { issuer, token_type }
    }

    pub fn fraction_digits(&self) -> u32 {
        self.token_type.fraction_digits
    }
}

impl fmt::Display for AssetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} issued by {}", self.token_type, self.issuer)
    }
}
