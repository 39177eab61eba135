//! AirMile node: runs flows against real peers.
//!
//! A [`MockNetwork`] starts a set of [`Node`]s in one process. Each node
//! implements [`airmile_flows::ServiceHub`] with:
//! - a name-derived key pair and an in-memory ledger store
//! - the network's shared [`InMemoryNotary`], which refuses double spends
//! - a per-node signing policy
//! - sessions to its peers, whose responders the network spawns on demand
//!
//! [`NetworkConfig`] loads the network layout from TOML and
//! [`logging::init_logging`] installs the tracing subscriber.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod node;
pub mod notary;
pub mod tracing_spans;

pub use config::NetworkConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use network::{MockNetwork, MockNetworkBuilder};
pub use node::Node;
pub use notary::InMemoryNotary;
