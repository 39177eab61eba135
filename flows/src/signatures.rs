//! Signature collection from counterparties.

use airmile_transactions::SignedTransaction;

use crate::error::FlowError;
use crate::session::{FlowSession, SessionMessage};

/// Ask each session in turn to sign `tx`, checking every returned signature
/// is valid and comes from that counterparty's key.
pub async fn collect_signatures(
    mut tx: SignedTransaction,
    dependencies: &[SignedTransaction],
    sessions: &mut [&mut FlowSession],
) -> Result<SignedTransaction, FlowError> {
    for session in sessions.iter_mut() {
        let reply = session
            .send_and_receive(SessionMessage::ProposeSignature {
                tx: tx.clone(),
                dependencies: dependencies.to_vec(),
            })
            .await?;
        let signature = match reply {
            SessionMessage::Signature(signature) => signature,
            other => return Err(session.refusal(other, "signature")),
        };
        let party = session.counterparty();
        if signature.by != party.owning_key || !signature.is_valid_for(&tx.id()) {
            return Err(FlowError::CounterpartyRejected {
                party: party.name.clone(),
                reason: "returned an invalid signature".to_string(),
            });
        }
        tracing::debug!(tx_id = %tx.id(), party = %party, "collected signature");
        tx = tx.with_signature(signature);
    }
    Ok(tx)
}
