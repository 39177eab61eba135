//! Name-derived identities.

use airmile_transactions::TransactionSignature;
use airmile_types::{KeyPair, Party, TxHash};

/// A party whose key pair is derived from its name.
pub struct TestIdentity {
    party: Party,
    keys: KeyPair,
}

impl TestIdentity {
    pub fn new(name: &str) -> Self {
        let keys = airmile_crypto::keypair_from_name(name);
        Self {
            party: Party::new(name, keys.public),
            keys,
        }
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    pub fn sign(&self, tx_id: &TxHash) -> TransactionSignature {
        TransactionSignature::create(tx_id, &self.keys)
    }
}

/// The party `name` would have as a [`TestIdentity`].
pub fn party(name: &str) -> Party {
    TestIdentity::new(name).party
}
