//! AirMile transaction containers.
//!
//! A transaction moves through three shapes:
//! - **WireTransaction**: inputs as references, outputs, commands, notary.
//!   Its id is the Blake2b-256 hash of the canonical bincode body.
//! - **SignedTransaction**: a wire transaction plus the signatures collected
//!   so far from command signers and the notary.
//! - **LedgerTransaction**: a wire transaction whose input references have
//!   been resolved against stored backchain; this is what the rules verify.
//!
//! [`TransactionBuilder`] assembles wire transactions and emits one token
//! command per asset for issue, move and redeem.

pub mod builder;
pub mod command;
pub mod error;
pub mod ledger;
pub mod signed;
pub mod wire;

pub use builder::TransactionBuilder;
pub use command::{Command, TokenCommand};
pub use error::TransactionError;
pub use ledger::LedgerTransaction;
pub use signed::{SignedTransaction, TransactionSignature};
pub use wire::WireTransaction;
