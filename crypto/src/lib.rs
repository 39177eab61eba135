//! Cryptographic primitives for AirMile ledger transactions.
//!
//! - **Ed25519** for party keys, transaction signatures and notary signatures
//! - **Blake2b-256** for transaction ids
//!
//! Keys are derived deterministically from a seed or a party name, which
//! backs the in-process networks.

pub mod hash;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi, hash_transaction};
pub use keys::{keypair_from_name, keypair_from_seed};
pub use sign::{sign_message, verify_signature};
