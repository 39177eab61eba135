//! Fundamental types for the AirMile token ledger.
//!
//! This crate defines the values shared by every other crate in the workspace:
//! party identities and their keys, transaction hashes, asset identities,
//! token amounts with checked arithmetic, and the holdings recorded on ledger.

pub mod amount;
pub mod asset;
pub mod error;
pub mod hash;
pub mod holding;
pub mod keys;
pub mod party;
pub mod state;

pub use amount::{checked_sum, TokenAmount};
pub use asset::{AssetIdentity, TokenType};
pub use error::TypesError;
pub use hash::TxHash;
pub use holding::Holding;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use party::Party;
pub use state::{StateAndRef, StateRef};
