//! Nullable notary: signs without tracking consumed states.

use airmile_flows::{NotaryError, NotaryService};
use airmile_transactions::{SignedTransaction, TransactionSignature};
use airmile_types::Party;
use async_trait::async_trait;

use crate::identity::TestIdentity;

/// A notary that checks it is named and that all other signatures are
/// present, but keeps no record of spent states.
pub struct NullNotary {
    identity: TestIdentity,
}

impl NullNotary {
    pub fn new(name: &str) -> Self {
        Self {
            identity: TestIdentity::new(name),
        }
    }
}

impl Default for NullNotary {
    fn default() -> Self {
        Self::new("Notary")
    }
}

#[async_trait]
impl NotaryService for NullNotary {
    fn identity(&self) -> &Party {
        self.identity.party()
    }

    async fn notarise(&self, tx: &SignedTransaction) -> Result<TransactionSignature, NotaryError> {
        let ours = self.identity.party();
        if tx.tx.notary.as_ref() != Some(ours) {
            return Err(NotaryError::WrongNotary {
                named: tx.tx.notary.as_ref().map(|n| n.name.clone()).unwrap_or_default(),
                ours: ours.name.clone(),
            });
        }
        tx.verify_signatures_except(&[ours.owning_key])?;
        Ok(self.identity.sign(&tx.id()))
    }
}
