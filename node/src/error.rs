use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("flow error: {0}")]
    Flow(#[from] airmile_flows::FlowError),

    #[error("store error: {0}")]
    Store(#[from] airmile_store::StoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("unknown node {0}")]
    UnknownNode(String),

    #[error("node {0} is declared more than once")]
    DuplicateNode(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
