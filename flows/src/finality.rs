//! Two-phase finality.
//!
//! Phase one sends the signed transaction and its backchain to every session
//! and waits for each to acknowledge that it checks out. Only then is the
//! transaction notarised (when it consumes inputs) and, in phase two, each
//! session told to record it. A failure before phase two leaves no ledger
//! change anywhere.

use airmile_store::{record_transaction, StatesToRecord};
use airmile_transactions::SignedTransaction;

use crate::error::FlowError;
use crate::resolve::Backchain;
use crate::services::ServiceHub;
use crate::session::{FlowSession, SessionMessage};

/// Notarise and distribute `tx`, recording it locally with
/// [`StatesToRecord::OnlyRelevant`].
pub async fn finalise(
    hub: &dyn ServiceHub,
    tx: SignedTransaction,
    dependencies: &[SignedTransaction],
    sessions: &mut [FlowSession],
) -> Result<SignedTransaction, FlowError> {
    let us = hub.our_identity();
    let notary_key = hub.notary().identity().owning_key;
    tx.verify_signatures_except(&[notary_key])?;
    let ltx = Backchain::new(hub.store(), dependencies, us).resolve(&tx.tx)?;
    airmile_contracts::verify(&ltx)?;

    if let Err(e) = prepare(&tx, dependencies, sessions).await {
        abort(sessions, &e).await;
        return Err(e);
    }

    let notary_signature = if tx.tx.inputs.is_empty() {
        None
    } else {
        match hub.notary().notarise(&tx).await {
            Ok(signature) => Some(signature),
            Err(e) => {
                let e = FlowError::from(e);
                abort(sessions, &e).await;
                return Err(e);
            }
        }
    };
    let tx = match &notary_signature {
        Some(signature) => tx.with_signature(signature.clone()),
        None => tx,
    };
    tx.verify_required_signatures()?;

    let our_keys = hub.our_keys();
    for dep in dependencies {
        record_transaction(hub.store(), dep, StatesToRecord::None, &our_keys)?;
    }
    record_transaction(hub.store(), &tx, StatesToRecord::OnlyRelevant, &our_keys)?;
    tracing::info!(tx_id = %tx.id(), sessions = sessions.len(), "transaction committed");

    for session in sessions.iter_mut() {
        let reply = session
            .send_and_receive(SessionMessage::Commit {
                notary_signature: notary_signature.clone(),
            })
            .await?;
        if !matches!(reply, SessionMessage::Recorded) {
            return Err(session.refusal(reply, "recorded"));
        }
    }
    Ok(tx)
}

async fn prepare(
    tx: &SignedTransaction,
    dependencies: &[SignedTransaction],
    sessions: &mut [FlowSession],
) -> Result<(), FlowError> {
    for session in sessions.iter_mut() {
        let reply = session
            .send_and_receive(SessionMessage::Prepare {
                tx: tx.clone(),
                dependencies: dependencies.to_vec(),
            })
            .await?;
        if !matches!(reply, SessionMessage::Prepared) {
            return Err(session.refusal(reply, "prepared"));
        }
    }
    Ok(())
}

/// Best-effort notice to every session that the instance is over.
async fn abort(sessions: &[FlowSession], cause: &FlowError) {
    tracing::warn!(error = %cause, "aborting finality");
    for session in sessions.iter() {
        let _ = session.send(SessionMessage::Abort(cause.to_string())).await;
    }
}
