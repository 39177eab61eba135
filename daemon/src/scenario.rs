//! Scenario files: a network layout plus a list of steps run in order.
//!
//! ```toml
//! [network]
//! nodes = ["Alice", "Bob", "Carly"]
//!
//! [[steps]]
//! action = "issue"
//! issuer = "Alice"
//! holders = [{ holder = "Bob", quantity = 10 }]
//!
//! [[steps]]
//! action = "move-all"
//! from = "Bob"
//! to = "Carly"
//!
//! [[steps]]
//! action = "redeem-all"
//! holder = "Carly"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use airmile_flows::{IssueFlow, MoveFlow, RedeemFlow};
use airmile_node::{MockNetwork, NetworkConfig, Node};
use airmile_store::TransactionStore;
use airmile_types::{checked_sum, AssetIdentity, Holding, StateAndRef};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// `issuer` mints the network's token type for each holder.
    Issue {
        issuer: String,
        holders: Vec<HeldQuantity>,
    },
    /// `from` moves everything it holds to `to`, one output per asset.
    MoveAll { from: String, to: String },
    /// `holder` redeems everything it holds.
    RedeemAll { holder: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeldQuantity {
    pub holder: String,
    pub quantity: u64,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Issue { .. } => "issue",
            Self::MoveAll { .. } => "move-all",
            Self::RedeemAll { .. } => "redeem-all",
        }
    }
}

/// What every node holds once the scenario has run.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Node name to asset to quantity held by that node.
    pub balances: BTreeMap<String, BTreeMap<String, String>>,
    /// Node name to number of transactions it stores.
    pub transactions: BTreeMap<String, u64>,
}

impl Scenario {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("parsing scenario")
    }

    /// Start the network and run every step, stopping at the first failure.
    pub async fn run(&self) -> anyhow::Result<Report> {
        let network = MockNetwork::new(&self.network)?;
        for (i, step) in self.steps.iter().enumerate() {
            tracing::info!(step = i + 1, action = step.name(), "running step");
            run_step(&network, step)
                .await
                .with_context(|| format!("step {} ({}) failed", i + 1, step.name()))?;
        }
        Report::collect(&network)
    }
}

async fn run_step(network: &MockNetwork, step: &Step) -> anyhow::Result<()> {
    match step {
        Step::Issue { issuer, holders } => {
            let held_quantities = holders
                .iter()
                .map(|h| Ok((network.party(&h.holder)?, h.quantity)))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let flow = IssueFlow::new(held_quantities)?.with_token_type(network.token_type().clone());
            network.node(issuer)?.start_flow(flow).await?;
        }
        Step::MoveAll { from, to } => {
            let node = network.node(from)?;
            let inputs = held_by(&node)?;
            if inputs.is_empty() {
                bail!("{from} holds nothing to move");
            }
            let to = network.party(to)?;
            let outputs = totals(&inputs)?
                .into_iter()
                .map(|(asset, quantity)| Holding::issued(&asset.issuer, asset.token_type, quantity, &to))
                .collect();
            node.start_flow(MoveFlow::new(inputs, outputs)?).await?;
        }
        Step::RedeemAll { holder } => {
            let node = network.node(holder)?;
            let inputs = held_by(&node)?;
            if inputs.is_empty() {
                bail!("{holder} holds nothing to redeem");
            }
            node.start_flow(RedeemFlow::new(inputs)?).await?;
        }
    }
    Ok(())
}

/// Unconsumed states the node holds itself, leaving out states it only
/// observes.
fn held_by(node: &Node) -> anyhow::Result<Vec<StateAndRef>> {
    Ok(node
        .unconsumed_states()?
        .into_iter()
        .filter(|s| s.state.holder == *node.party())
        .collect())
}

/// Per-asset totals in order of first appearance.
fn totals(states: &[StateAndRef]) -> anyhow::Result<Vec<(AssetIdentity, u64)>> {
    let mut assets: Vec<AssetIdentity> = Vec::new();
    for s in states {
        if !assets.contains(s.state.asset()) {
            assets.push(s.state.asset().clone());
        }
    }
    assets
        .into_iter()
        .map(|asset| {
            let total = checked_sum(
                states
                    .iter()
                    .filter(|s| *s.state.asset() == asset)
                    .map(|s| s.state.quantity()),
            )?;
            Ok((asset, total))
        })
        .collect()
}

impl Report {
    fn collect(network: &MockNetwork) -> anyhow::Result<Self> {
        let mut report = Report::default();
        for node in network.nodes() {
            let held = held_by(node)?;
            let mut balances = BTreeMap::new();
            for (asset, total) in totals(&held)? {
                let amount = airmile_types::TokenAmount::new(total, asset.clone());
                balances.insert(asset.to_string(), amount.display_quantity());
            }
            report.balances.insert(node.name().to_string(), balances);
            report.transactions.insert(
                node.name().to_string(),
                node.memory_store().transaction_count()?,
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUND_TRIP: &str = r#"
        [network]
        nodes = ["Alice", "Bob", "Carly"]

        [[steps]]
        action = "issue"
        issuer = "Alice"
        holders = [{ holder = "Bob", quantity = 10 }, { holder = "Bob", quantity = 5 }]

        [[steps]]
        action = "move-all"
        from = "Bob"
        to = "Carly"
    "#;

    #[test]
    fn parses_steps() {
        let scenario = Scenario::from_toml_str(ROUND_TRIP).unwrap();
        assert_eq!(scenario.network.nodes, vec!["Alice", "Bob", "Carly"]);
        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(
            scenario.steps[1],
            Step::MoveAll {
                from: "Bob".to_string(),
                to: "Carly".to_string()
            }
        );
    }

    #[test]
    fn unknown_action_is_an_error() {
        let toml = r#"
            [[steps]]
            action = "burn"
            holder = "Bob"
        "#;
        assert!(Scenario::from_toml_str(toml).is_err());
    }

    #[tokio::test]
    async fn move_all_merges_holdings_into_one_output() {
        let report = Scenario::from_toml_str(ROUND_TRIP).unwrap().run().await.unwrap();
        let carly = &report.balances["Carly"];
        assert_eq!(carly.len(), 1);
        assert_eq!(carly.values().next().unwrap(), "15");
        assert!(report.balances["Bob"].is_empty());
        // the issuer observes its issuance but holds nothing
        assert!(report.balances["Alice"].is_empty());
        assert_eq!(report.transactions["Alice"], 1);
        assert_eq!(report.transactions["Carly"], 2);
    }

    #[tokio::test]
    async fn redeem_all_empties_the_holder() {
        let toml = format!(
            "{ROUND_TRIP}\n[[steps]]\naction = \"redeem-all\"\nholder = \"Carly\"\n"
        );
        let report = Scenario::from_toml_str(&toml).unwrap().run().await.unwrap();
        assert!(report.balances.values().all(|b| b.is_empty()));
        // the issuer also received the move as backchain
        assert_eq!(report.transactions["Alice"], 3);
    }

    #[tokio::test]
    async fn failing_step_names_itself() {
        let toml = r#"
            [[steps]]
            action = "redeem-all"
            holder = "Dan"
        "#;
        let err = Scenario::from_toml_str(toml).unwrap().run().await.unwrap_err();
        assert!(format!("{err:#}").contains("step 1 (redeem-all)"));
    }
}
