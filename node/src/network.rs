//! An in-process network of nodes sharing one notary.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use airmile_flows::{AcceptAll, NotaryService, SigningPolicy};
use airmile_types::{Party, TokenType};
use tracing::info;

use crate::config::NetworkConfig;
use crate::node::Node;
use crate::notary::InMemoryNotary;
use crate::NodeError;

pub(crate) struct NetworkInner {
    nodes: BTreeMap<String, Arc<Node>>,
    notary: Arc<InMemoryNotary>,
    pub(crate) session_buffer: usize,
    pub(crate) session_timeout: Duration,
}

impl NetworkInner {
    /// The node acting as `party`, if its name and key both match.
    pub(crate) fn node_for(&self, party: &Party) -> Option<Arc<Node>> {
        self.nodes
            .get(&party.name)
            .filter(|node| node.party() == party)
            .cloned()
    }
}

/// Nodes that open sessions with each other over in-memory channels.
///
/// Opening a session with a node spawns its responder, so any flow started
/// on one node drives the whole exchange to completion.
#[derive(Clone)]
pub struct MockNetwork {
    inner: Arc<NetworkInner>,
    token_type: TokenType,
}

impl MockNetwork {
    /// Start every node named in `config`, all accepting any valid proposal.
    pub fn new(config: &NetworkConfig) -> Result<Self, NodeError> {
        Self::builder(config.clone()).build()
    }

    pub fn builder(config: NetworkConfig) -> MockNetworkBuilder {
        MockNetworkBuilder {
            config,
            policies: BTreeMap::new(),
        }
    }

    pub fn node(&self, name: &str) -> Result<Arc<Node>, NodeError> {
        self.inner
            .nodes
            .get(name)
            .cloned()
            .ok_or_else(|| NodeError::UnknownNode(name.to_string()))
    }

    pub fn party(&self, name: &str) -> Result<Party, NodeError> {
        Ok(self.node(name)?.party().clone())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.inner.nodes.values()
    }

    pub fn notary(&self) -> &Arc<InMemoryNotary> {
        &self.inner.notary
    }

    /// The token type issuances default to on this network.
    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }
}

/// Configures per-node signing policies before the network starts.
pub struct MockNetworkBuilder {
    config: NetworkConfig,
    policies: BTreeMap<String, Arc<dyn SigningPolicy>>,
}

impl MockNetworkBuilder {
    /// Add a node unless one with this name is already configured.
    pub fn with_node(mut self, name: &str) -> Self {
        if !self.config.nodes.iter().any(|n| n == name) {
            self.config.nodes.push(name.to_string());
        }
        self
    }

    pub fn with_policy(mut self, name: &str, policy: impl SigningPolicy + 'static) -> Self {
        self.policies.insert(name.to_string(), Arc::new(policy));
        self
    }

    pub fn build(self) -> Result<MockNetwork, NodeError> {
        let mut seen = BTreeSet::new();
        for name in &self.config.nodes {
            if name.is_empty() {
                return Err(NodeError::Config("node names cannot be empty".to_string()));
            }
            if *name == self.config.notary || !seen.insert(name.as_str()) {
                return Err(NodeError::DuplicateNode(name.clone()));
            }
        }
        if let Some(name) = self.policies.keys().find(|n| !seen.contains(n.as_str())) {
            return Err(NodeError::UnknownNode(name.clone()));
        }

        let notary = Arc::new(InMemoryNotary::new(&self.config.notary));
        let shared_notary: Arc<dyn NotaryService> = notary.clone();
        let accept_all: Arc<dyn SigningPolicy> = Arc::new(AcceptAll);
        let inner = Arc::new_cyclic(|weak| {
            let nodes = self
                .config
                .nodes
                .iter()
                .map(|name| {
                    let policy = self
                        .policies
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| accept_all.clone());
                    let node = Node::new(name, shared_notary.clone(), policy, weak.clone());
                    (name.clone(), Arc::new(node))
                })
                .collect();
            NetworkInner {
                nodes,
                notary,
                session_buffer: self.config.session_buffer,
                session_timeout: self.config.session_timeout(),
            }
        });
        info!(
            nodes = self.config.nodes.len(),
            notary = %self.config.notary,
            "network started"
        );
        Ok(MockNetwork {
            inner,
            token_type: self.config.token_type(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(nodes: &[&str]) -> NetworkConfig {
        NetworkConfig {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn starts_configured_nodes() {
        let network = MockNetwork::new(&config(&["Alice", "Bob"])).unwrap();
        let names: Vec<_> = network.nodes().map(|n| n.name().to_string()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(network.notary().identity().name, "Notary");
    }

    #[test]
    fn duplicate_names_are_refused() {
        assert!(matches!(
            MockNetwork::new(&config(&["Alice", "Alice"])),
            Err(NodeError::DuplicateNode(_))
        ));
        assert!(matches!(
            MockNetwork::new(&config(&["Alice", "Notary"])),
            Err(NodeError::DuplicateNode(_))
        ));
    }

    #[test]
    fn policy_for_unknown_node_is_refused() {
        let result = MockNetwork::builder(config(&["Alice"]))
            .with_policy("Zed", AcceptAll)
            .build();
        assert!(matches!(result, Err(NodeError::UnknownNode(_))));
    }

    #[test]
    fn with_node_adds_once() {
        let network = MockNetwork::builder(config(&["Alice"]))
            .with_node("Bob")
            .with_node("Alice")
            .build()
            .unwrap();
        assert_eq!(network.nodes().count(), 2);
    }

    #[test]
    fn node_lookup_checks_the_key() {
        let network = MockNetwork::new(&config(&["Alice"])).unwrap();
        let alice = network.party("Alice").unwrap();
        assert!(network.inner.node_for(&alice).is_some());
        let impostor = Party::new("Alice", network.notary().identity().owning_key);
        assert!(network.inner.node_for(&impostor).is_none());
        assert!(matches!(network.node("Bob"), Err(NodeError::UnknownNode(_))));
    }
}
