//! Transactions carrying collected signatures.

use airmile_types::{KeyPair, PublicKey, Signature, TxHash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::TransactionError;
use crate::wire::WireTransaction;

/// One party's signature over a transaction id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    pub by: PublicKey,
    pub signature: Signature,
}

impl TransactionSignature {
    pub fn create(tx_id: &TxHash, keys: &KeyPair) -> Self {
        Self {
            by: keys.public,
            signature: airmile_crypto::sign_message(tx_id.as_bytes(), &keys.private),
        }
    }

    pub fn is_valid_for(&self, tx_id: &TxHash) -> bool {
        airmile_crypto::verify_signature(tx_id.as_bytes(), &self.signature, &self.by)
    }
}

/// A wire transaction plus signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub tx: WireTransaction,
    pub sigs: Vec<TransactionSignature>,
}

impl SignedTransaction {
    pub fn new(tx: WireTransaction, sigs: Vec<TransactionSignature>) -> Self {
        Self { tx, sigs }
    }

    /// Sign `tx` with `keys` as the first signature.
    pub fn sign_initial(tx: WireTransaction, keys: &KeyPair) -> Self {
        let sig = TransactionSignature::create(&tx.id, keys);
        Self::new(tx, vec![sig])
    }

    pub fn id(&self) -> TxHash {
        self.tx.id
    }

    /// Add a signature unless one from the same key is already present.
    pub fn with_signature(mut self, sig: TransactionSignature) -> Self {
        if !self.sigs.iter().any(|s| s.by == sig.by) {
            self.sigs.push(sig);
        }
        self
    }

    pub fn signed_keys(&self) -> BTreeSet<PublicKey> {
        self.sigs.iter().map(|s| s.by).collect()
    }

    pub fn required_signing_keys(&self) -> BTreeSet<PublicKey> {
        self.tx.required_signing_keys()
    }

    /// Required keys that have not signed yet.
    pub fn missing_signatures(&self) -> BTreeSet<PublicKey> {
        let signed = self.signed_keys();
        self.required_signing_keys()
            .into_iter()
            .filter(|k| !signed.contains(k))
            .collect()
    }

    /// Check the id, check every attached signature, and require a signature
    /// from every required key except those in `allowed_to_be_missing`.
    pub fn verify_signatures_except(
        &self,
        allowed_to_be_missing: &[PublicKey],
    ) -> Result<(), TransactionError> {
        self.tx.check_id()?;
        for sig in &self.sigs {
            if !sig.is_valid_for(&self.tx.id) {
                return Err(TransactionError::InvalidSignature {
                    tx_id: self.tx.id.to_string(),
                    by: sig.by.fingerprint(),
                });
            }
        }
        let missing: Vec<String> = self
            .missing_signatures()
            .iter()
            .filter(|k| !allowed_to_be_missing.contains(k))
            .map(|k| k.fingerprint())
            .collect();
        if !missing.is_empty() {
            return Err(TransactionError::SignaturesMissing {
                tx_id: self.tx.id.to_string(),
                missing,
            });
        }
        Ok(())
    }

    pub fn verify_required_signatures(&self) -> Result<(), TransactionError> {
        self.verify_signatures_except(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, TokenCommand};
    use airmile_crypto::keypair_from_name;
    use airmile_types::{AssetIdentity, Holding, Party, TokenType};

    fn party(name: &str) -> Party {
        Party::new(name, keypair_from_name(name).public)
    }

    fn move_tx() -> WireTransaction {
        let alice = party("Alice");
        let bob = party("Bob");
        let asset = AssetIdentity::new(alice.clone(), TokenType::air_mile());
        let issued = Holding::issued(&alice, TokenType::air_mile(), 10, &bob);
        let prev = WireTransaction::new(vec![], vec![issued.clone()], vec![], None).unwrap();
        WireTransaction::new(
            vec![prev.out_ref(0).unwrap()],
            vec![issued.with_new_holder(party("Carly"))],
            vec![Command::new(
                TokenCommand::Move {
                    asset,
                    inputs: vec![0],
                    outputs: vec![0],
                },
                [bob.owning_key],
            )],
            Some(party("Notary")),
        )
        .unwrap()
    }

    #[test]
    fn fully_signed_transaction_verifies() {
        let stx = SignedTransaction::sign_initial(move_tx(), &keypair_from_name("Bob"));
        assert!(stx.verify_required_signatures().is_err());
        assert!(stx
            .verify_signatures_except(&[party("Notary").owning_key])
            .is_ok());

        let notary_sig = TransactionSignature::create(&stx.id(), &keypair_from_name("Notary"));
        let stx = stx.with_signature(notary_sig);
        assert!(stx.verify_required_signatures().is_ok());
        assert!(stx.missing_signatures().is_empty());
    }

    #[test]
    fn forged_signature_is_rejected() {
        let mut stx = SignedTransaction::sign_initial(move_tx(), &keypair_from_name("Bob"));
        // claims to be Bob, signed by Carly
        stx.sigs[0].signature =
            TransactionSignature::create(&stx.id(), &keypair_from_name("Carly")).signature;
        assert!(matches!(
            stx.verify_signatures_except(&[party("Notary").owning_key]),
            Err(TransactionError::InvalidSignature { .. })
        ));
    }

    #[test]
    fn duplicate_signatures_collapse() {
        let bob = keypair_from_name("Bob");
        let stx = SignedTransaction::sign_initial(move_tx(), &bob);
        let again = TransactionSignature::create(&stx.id(), &bob);
        assert_eq!(stx.with_signature(again).sigs.len(), 1);
    }
}
