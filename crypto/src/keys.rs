//! Ed25519 key derivation.

use airmile_types::{KeyPair, PrivateKey, PublicKey};
use ed25519_dalek::SigningKey;

use crate::hash::blake2b_256_multi;

/// Domain separator for name-derived seeds.
const NAME_SEED_DOMAIN: &[u8] = b"airmile/identity/v1";

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive a key pair from a legal name.
///
/// The same name always yields the same key, which lets in-process networks
/// and tests refer to parties by name alone. Never use for real identities.
pub fn keypair_from_name(name: &str) -> KeyPair {
    let seed = blake2b_256_multi(&[NAME_SEED_DOMAIN, name.as_bytes()]);
    keypair_from_seed(&seed)
}
