use airmile_contracts::RuleViolation;
use airmile_store::StoreError;
use airmile_transactions::TransactionError;
use airmile_types::TxHash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("transaction failed verification: {0}")]
    Rule(#[from] RuleViolation),

    #[error("{party} found the transaction invalid: {violation}")]
    CounterpartyViolation {
        party: String,
        violation: RuleViolation,
    },

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{party} is missing backchain transaction {tx_id}")]
    MissingBackchain { party: String, tx_id: TxHash },

    #[error("session with {party} closed")]
    SessionClosed { party: String },

    #[error("timed out waiting for {party}")]
    Timeout { party: String },

    #[error("{party} refused: {reason}")]
    CounterpartyRejected { party: String, reason: String },

    #[error("unexpected message from {party}: expected {expected}, got {got}")]
    UnexpectedMessage {
        party: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error(transparent)]
    Notary(#[from] NotaryError),

    #[error("unknown party {0}")]
    UnknownParty(String),
}

impl FlowError {
    /// True when the failure is a missing transaction in someone's backchain.
    pub fn is_missing_backchain(&self) -> bool {
        matches!(self, Self::MissingBackchain { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotaryError {
    #[error("input {state} was already consumed by {consumed_by}")]
    Conflict { state: String, consumed_by: TxHash },

    #[error("transaction names notary {named}, not {ours}")]
    WrongNotary { named: String, ours: String },

    #[error("notary rejected signatures: {0}")]
    Signatures(#[from] TransactionError),

    #[error("notary unavailable: {0}")]
    Unavailable(String),
}
