//! Typed point-to-point sessions between two flow participants.

use airmile_contracts::RuleViolation;
use airmile_transactions::{SignedTransaction, TransactionSignature};
use airmile_types::{Party, TxHash};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::error::FlowError;

/// What a counterparty is expected to do with a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionRole {
    /// Must sign before finality.
    Signer,
    /// Only receives the finished transaction.
    Participant,
}

/// Messages exchanged over a [`FlowSession`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SessionMessage {
    Role(TransactionRole),
    ProposeSignature {
        tx: SignedTransaction,
        dependencies: Vec<SignedTransaction>,
    },
    Signature(TransactionSignature),
    /// First finality phase: check everything, record nothing.
    Prepare {
        tx: SignedTransaction,
        dependencies: Vec<SignedTransaction>,
    },
    Prepared,
    /// Second finality phase: record with the notary signature, if any.
    Commit {
        notary_signature: Option<TransactionSignature>,
    },
    Recorded,
    Violation(RuleViolation),
    MissingBackchain(TxHash),
    Rejected(String),
    Abort(String),
}

impl SessionMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Role(_) => "role",
            Self::ProposeSignature { .. } => "propose-signature",
            Self::Signature(_) => "signature",
            Self::Prepare { .. } => "prepare",
            Self::Prepared => "prepared",
            Self::Commit { .. } => "commit",
            Self::Recorded => "recorded",
            Self::Violation(_) => "violation",
            Self::MissingBackchain(_) => "missing-backchain",
            Self::Rejected(_) => "rejected",
            Self::Abort(_) => "abort",
        }
    }
}

/// One end of a session with `counterparty`.
///
/// Dropping either end closes the session; the other end then sees
/// [`FlowError::SessionClosed`] on its next receive.
pub struct FlowSession {
    counterparty: Party,
    outbound: mpsc::Sender<SessionMessage>,
    inbound: mpsc::Receiver<SessionMessage>,
    timeout: Duration,
}

impl FlowSession {
    /// Create both ends of a session between `initiator` and `counterparty`.
    /// The first returned end belongs to the initiator.
    pub fn pair(
        initiator: Party,
        counterparty: Party,
        buffer: usize,
        timeout: Duration,
    ) -> (FlowSession, FlowSession) {
        let (to_counterparty, from_initiator) = mpsc::channel(buffer.max(1));
        let (to_initiator, from_counterparty) = mpsc::channel(buffer.max(1));
        let ours = FlowSession {
            counterparty,
            outbound: to_counterparty,
            inbound: from_counterparty,
            timeout,
        };
        let theirs = FlowSession {
            counterparty: initiator,
            outbound: to_initiator,
            inbound: from_initiator,
            timeout,
        };
        (ours, theirs)
    }

    pub fn counterparty(&self) -> &Party {
        &self.counterparty
    }

    pub async fn send(&self, message: SessionMessage) -> Result<(), FlowError> {
        tracing::trace!(party = %self.counterparty, kind = message.kind(), "send");
        self.outbound
            .send(message)
            .await
            .map_err(|_| FlowError::SessionClosed {
                party: self.counterparty.name.clone(),
            })
    }

    pub async fn receive(&mut self) -> Result<SessionMessage, FlowError> {
        match tokio::time::timeout(self.timeout, self.inbound.recv()).await {
            Ok(Some(message)) => {
                tracing::trace!(party = %self.counterparty, kind = message.kind(), "receive");
                Ok(message)
            }
            Ok(None) => Err(FlowError::SessionClosed {
                party: self.counterparty.name.clone(),
            }),
            Err(_) => Err(FlowError::Timeout {
                party: self.counterparty.name.clone(),
            }),
        }
    }

    pub async fn send_and_receive(&mut self, message: SessionMessage) -> Result<SessionMessage, FlowError> {
        self.send(message).await?;
        self.receive().await
    }

    /// Turn a counterparty's refusal into the matching error.
    pub(crate) fn refusal(&self, message: SessionMessage, expected: &'static str) -> FlowError {
        let party = self.counterparty.name.clone();
        match message {
            SessionMessage::Violation(violation) => FlowError::CounterpartyViolation { party, violation },
            SessionMessage::MissingBackchain(tx_id) => FlowError::MissingBackchain { party, tx_id },
            SessionMessage::Rejected(reason) | SessionMessage::Abort(reason) => {
                FlowError::CounterpartyRejected { party, reason }
            }
            other => FlowError::UnexpectedMessage {
                party,
                expected,
                got: other.kind(),
            },
        }
    }
}
