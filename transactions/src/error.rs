use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("input {state_ref} could not be resolved")]
    UnresolvedInput { state_ref: String },

    #[error("input {state_ref} is listed more than once")]
    DuplicateInput { state_ref: String },

    #[error("transaction lists {count} {kind}, more than an index can address")]
    TooManyStates { kind: &'static str, count: usize },

    #[error("input {state_ref} does not match the recorded state")]
    InputMismatch { state_ref: String },

    #[error("invalid signature by {by} on transaction {tx_id}")]
    InvalidSignature { tx_id: String, by: String },

    #[error("transaction {tx_id} is missing signatures from {}", missing.join(", "))]
    SignaturesMissing { tx_id: String, missing: Vec<String> },

    #[error("transaction id {claimed} does not match its contents ({computed})")]
    IdMismatch { claimed: String, computed: String },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for TransactionError {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
