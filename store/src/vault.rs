//! Vault trait: the holdings a node tracks.

use crate::StoreError;
use airmile_types::{checked_sum, AssetIdentity, StateAndRef, StateRef};

pub trait VaultStore {
    /// Track `states`. References already tracked, consumed or not, are left alone.
    fn add_states(&self, states: &[StateAndRef]) -> Result<(), StoreError>;

    /// Mark tracked states consumed. Untracked references are ignored.
    fn consume_states(&self, refs: &[StateRef]) -> Result<(), StoreError>;

    fn is_consumed(&self, state_ref: &StateRef) -> Result<bool, StoreError>;

    /// Tracked states not yet consumed, ordered by reference.
    fn unconsumed_states(&self) -> Result<Vec<StateAndRef>, StoreError>;

    fn unconsumed_of(&self, asset: &AssetIdentity) -> Result<Vec<StateAndRef>, StoreError> {
        Ok(self
            .unconsumed_states()?
            .into_iter()
            .filter(|s| s.state.asset() == asset)
            .collect())
    }

    /// Sum of unconsumed quantities of `asset`.
    fn balance(&self, asset: &AssetIdentity) -> Result<u64, StoreError> {
        let states = self.unconsumed_of(asset)?;
        checked_sum(states.iter().map(|s| s.state.quantity()))
            .map_err(|_| StoreError::Overflow(asset.to_string()))
    }
}
