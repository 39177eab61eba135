//! Storage traits for AirMile nodes.
//!
//! A node keeps two things: every transaction it has seen (its own ledger
//! history plus any backchain it received) and a vault of the holdings it
//! cares about. Backends implement [`TransactionStore`] and [`VaultStore`];
//! the rest of the workspace depends only on the traits and on
//! [`record_transaction`], which applies the recording rules.

pub mod error;
pub mod memory;
pub mod recording;
pub mod transaction;
pub mod vault;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use recording::{record_transaction, StatesToRecord};
pub use transaction::TransactionStore;
pub use vault::VaultStore;

/// Everything a node needs from its storage, shareable across tasks.
pub trait LedgerStore: TransactionStore + VaultStore + Send + Sync {}

impl<T: TransactionStore + VaultStore + Send + Sync> LedgerStore for T {}
