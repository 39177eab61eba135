//! The counterparty side of every protocol.
//!
//! A responder serves one session: it optionally learns its role, signs a
//! proposal if it is a signer, checks the finished transaction in the
//! prepare phase, and records it on commit. Any failed check is reported
//! back over the session and ends the responder without recording.

use airmile_store::{record_transaction, StatesToRecord};
use airmile_transactions::{SignedTransaction, TransactionSignature};
use airmile_types::PublicKey;

use crate::error::FlowError;
use crate::resolve::Backchain;
use crate::services::ServiceHub;
use crate::session::{FlowSession, SessionMessage, TransactionRole};

/// Serve `session` until the transaction is recorded or the exchange ends.
///
/// Returns the recorded transaction, or `None` if the initiator aborted.
pub async fn respond(
    hub: &dyn ServiceHub,
    mut session: FlowSession,
) -> Result<Option<SignedTransaction>, FlowError> {
    let initiator = session.counterparty().name.clone();
    let mut role = None;
    let mut prepared: Option<(SignedTransaction, Vec<SignedTransaction>)> = None;

    loop {
        match session.receive().await? {
            SessionMessage::Role(r) => role = Some(r),
            SessionMessage::ProposeSignature { tx, dependencies } => {
                match check_proposal(hub, role, &tx, &dependencies) {
                    Ok(signature) => {
                        tracing::debug!(tx_id = %tx.id(), initiator = %initiator, "signing");
                        session.send(SessionMessage::Signature(signature)).await?;
                    }
                    Err(e) => return Err(refuse(&session, e).await),
                }
            }
            SessionMessage::Prepare { tx, dependencies } => {
                match check_prepared(hub, &tx, &dependencies) {
                    Ok(()) => {
                        session.send(SessionMessage::Prepared).await?;
                        prepared = Some((tx, dependencies));
                    }
                    Err(e) => return Err(refuse(&session, e).await),
                }
            }
            SessionMessage::Commit { notary_signature } => {
                let Some((tx, dependencies)) = prepared.take() else {
                    let e = FlowError::UnexpectedMessage {
                        party: initiator,
                        expected: "prepare",
                        got: "commit",
                    };
                    return Err(refuse(&session, e).await);
                };
                let tx = match notary_signature {
                    Some(signature) => tx.with_signature(signature),
                    None => tx,
                };
                if let Err(e) = tx.verify_required_signatures() {
                    return Err(refuse(&session, e.into()).await);
                }
                let our_keys = hub.our_keys();
                for dep in &dependencies {
                    record_transaction(hub.store(), dep, StatesToRecord::None, &our_keys)?;
                }
                record_transaction(hub.store(), &tx, StatesToRecord::OnlyRelevant, &our_keys)?;
                session.send(SessionMessage::Recorded).await?;
                tracing::info!(tx_id = %tx.id(), initiator = %initiator, "recorded transaction");
                return Ok(Some(tx));
            }
            SessionMessage::Abort(reason) => {
                tracing::info!(initiator = %initiator, %reason, "initiator aborted");
                return Ok(None);
            }
            other => {
                let e = FlowError::UnexpectedMessage {
                    party: initiator,
                    expected: "request",
                    got: other.kind(),
                };
                return Err(refuse(&session, e).await);
            }
        }
    }
}

fn check_proposal(
    hub: &dyn ServiceHub,
    role: Option<TransactionRole>,
    tx: &SignedTransaction,
    dependencies: &[SignedTransaction],
) -> Result<TransactionSignature, FlowError> {
    let us = hub.our_identity();
    if role != Some(TransactionRole::Signer) {
        return Err(FlowError::CounterpartyRejected {
            party: us.name.clone(),
            reason: "asked to sign without the signer role".to_string(),
        });
    }
    if !tx.required_signing_keys().contains(&us.owning_key) {
        return Err(FlowError::CounterpartyRejected {
            party: us.name.clone(),
            reason: "not a required signer".to_string(),
        });
    }
    let missing: Vec<PublicKey> = tx.missing_signatures().into_iter().collect();
    tx.verify_signatures_except(&missing)?;

    let chain = Backchain::new(hub.store(), dependencies, us);
    chain.verify_delivered()?;
    let ltx = chain.resolve(&tx.tx)?;
    airmile_contracts::verify(&ltx)?;
    hub.signing_policy()
        .check(&ltx, us)
        .map_err(|reason| FlowError::CounterpartyRejected {
            party: us.name.clone(),
            reason,
        })?;
    Ok(hub.sign(&tx.id()))
}

fn check_prepared(
    hub: &dyn ServiceHub,
    tx: &SignedTransaction,
    dependencies: &[SignedTransaction],
) -> Result<(), FlowError> {
    let us = hub.our_identity();
    let notary: Vec<PublicKey> = tx.tx.notary.iter().map(|n| n.owning_key).collect();
    tx.verify_signatures_except(&notary)?;

    let chain = Backchain::new(hub.store(), dependencies, us);
    chain.verify_delivered()?;
    let ltx = chain.resolve(&tx.tx)?;
    airmile_contracts::verify(&ltx)?;
    Ok(())
}

/// Tell the initiator why we stopped, then hand the error back.
async fn refuse(session: &FlowSession, e: FlowError) -> FlowError {
    tracing::warn!(initiator = %session.counterparty(), error = %e, "refusing transaction");
    let reply = match &e {
        FlowError::Rule(violation) => SessionMessage::Violation(violation.clone()),
        FlowError::MissingBackchain { tx_id, .. } => SessionMessage::MissingBackchain(*tx_id),
        FlowError::CounterpartyRejected { reason, .. } => SessionMessage::Rejected(reason.clone()),
        other => SessionMessage::Rejected(other.to_string()),
    };
    // the initiator may already be gone
    let _ = session.send(reply).await;
    e
}
