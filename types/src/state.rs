//! References to holdings recorded in committed transactions.

use crate::hash::TxHash;
use crate::holding::Holding;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points at output `index` of transaction `tx_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateRef {
    pub tx_id: TxHash,
    pub index: u32,
}

impl StateRef {
    pub fn new(tx_id: TxHash, index: u32) -> Self {
        Self { tx_id, index }
    }
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.tx_id, self.index)
    }
}

/// A holding together with the reference it was recorded under.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateAndRef {
    pub state: Holding,
    pub reference: StateRef,
}

impl StateAndRef {
    pub fn new(state: Holding, reference: StateRef) -> Self {
        Self { state, reference }
    }
}
