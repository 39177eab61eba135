//! Party identities.

use crate::keys::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A well-known ledger participant: a human-readable name bound to the key
/// that signs on its behalf.
///
/// Equality is structural; two parties with the same name but different keys
/// are different parties.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub owning_key: PublicKey,
}

impl Party {
    pub fn new(name: impl Into<String>, owning_key: PublicKey) -> Self {
        Self {
            name: name.into(),
            owning_key,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
