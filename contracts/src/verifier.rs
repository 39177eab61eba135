//! Rule evaluation.
//!
//! Checks run in a fixed order and the first failure wins: command presence,
//! then command coverage for every group, then the per-command rules for
//! every group in order of first appearance.
//!
//! Coverage also settles the shape of each group: an Issue command names no
//! inputs and a Redeem command names no outputs, so a group that has them is
//! unassigned before the per-command rules run.

use airmile_transactions::{LedgerTransaction, TokenCommand};
use airmile_types::{checked_sum, PublicKey};
use std::collections::BTreeSet;

use crate::error::RuleViolation;
use crate::group::{group_states, TokenGroup};

/// Verify a resolved transaction. Each command is checked against its own
/// signer set.
pub fn verify(tx: &LedgerTransaction) -> Result<(), RuleViolation> {
    let groups = group_states(tx);
    let commands: Vec<(&TokenCommand, &BTreeSet<PublicKey>)> =
        tx.commands.iter().map(|c| (&c.value, &c.signers)).collect();
    let result = verify_commands(&groups, &commands);
    if let Err(violation) = &result {
        tracing::debug!(tx_id = %tx.id, code = violation.code(), "transaction rejected");
    }
    result
}

/// Verify pre-grouped states against `commands`, treating `present_signers`
/// as the signer set of every command.
pub fn verify_groups(
    groups: &[TokenGroup<'_>],
    commands: &[TokenCommand],
    present_signers: &BTreeSet<PublicKey>,
) -> Result<(), RuleViolation> {
    let commands: Vec<(&TokenCommand, &BTreeSet<PublicKey>)> =
        commands.iter().map(|c| (c, present_signers)).collect();
    verify_commands(groups, &commands)
}

fn verify_commands(
    groups: &[TokenGroup<'_>],
    commands: &[(&TokenCommand, &BTreeSet<PublicKey>)],
) -> Result<(), RuleViolation> {
    if commands.is_empty() {
        return Err(RuleViolation::NoCommand);
    }

    let mut assigned = Vec::with_capacity(groups.len());
    for group in groups {
        assigned.push(assigned_command(group, commands)?);
    }

    for (group, (command, signers)) in groups.iter().zip(assigned) {
        match command {
            TokenCommand::Issue { .. } => verify_issue(group, signers)?,
            TokenCommand::Move { .. } => verify_move(group, signers)?,
            TokenCommand::Redeem { .. } => verify_redeem(group, signers)?,
        }
    }
    Ok(())
}

/// The single command governing `group`, provided its indices cover the
/// group exactly.
fn assigned_command<'c>(
    group: &TokenGroup<'_>,
    commands: &[(&'c TokenCommand, &'c BTreeSet<PublicKey>)],
) -> Result<(&'c TokenCommand, &'c BTreeSet<PublicKey>), RuleViolation> {
    let matching: Vec<_> = commands
        .iter()
        .filter(|(c, _)| c.asset() == group.asset)
        .collect();
    let (command, signers) = match matching.as_slice() {
        [] => return Err(unassigned(group)),
        [single] => **single,
        many => {
            return Err(RuleViolation::MultipleCommands {
                asset: group.asset.to_string(),
                count: many.len(),
            })
        }
    };
    if sorted(command.input_indices()) != group.input_indices()
        || sorted(command.output_indices()) != group.output_indices()
    {
        return Err(unassigned(group));
    }
    Ok((command, signers))
}

fn verify_issue(group: &TokenGroup<'_>, signers: &BTreeSet<PublicKey>) -> Result<(), RuleViolation> {
    let asset = group.asset.to_string();
    if let Some((output, _)) = group.outputs.iter().find(|(_, h)| h.quantity() == 0) {
        return Err(RuleViolation::ZeroIssueAmount {
            asset,
            output: *output,
        });
    }
    if !signers.contains(&group.asset.issuer.owning_key) {
        return Err(RuleViolation::IssuerMustSign { asset });
    }
    Ok(())
}

fn verify_move(group: &TokenGroup<'_>, signers: &BTreeSet<PublicKey>) -> Result<(), RuleViolation> {
    let asset = group.asset.to_string();
    if group.inputs.is_empty() {
        return Err(RuleViolation::MoveWithoutInputs { asset });
    }
    if group.outputs.is_empty() {
        return Err(RuleViolation::MoveWithoutOutputs { asset });
    }
    // Zero-quantity inputs are tolerated; zero outputs never are.
    if let Some((output, _)) = group.outputs.iter().find(|(_, h)| h.quantity() == 0) {
        return Err(RuleViolation::ZeroOutputAmount {
            asset,
            output: *output,
        });
    }
    let input_sum = sum(group.inputs.iter().map(|(_, h)| h.quantity()), &asset, "inputs")?;
    let output_sum = sum(group.outputs.iter().map(|(_, h)| h.quantity()), &asset, "outputs")?;
    if input_sum != output_sum {
        return Err(RuleViolation::SumMismatch {
            asset,
            input_sum,
            output_sum,
        });
    }
    owners_signed(group, signers)
}

fn verify_redeem(group: &TokenGroup<'_>, signers: &BTreeSet<PublicKey>) -> Result<(), RuleViolation> {
    let asset = group.asset.to_string();
    sum(group.inputs.iter().map(|(_, h)| h.quantity()), &asset, "inputs")?;
    if !signers.contains(&group.asset.issuer.owning_key) {
        return Err(RuleViolation::IssuerMustSign { asset });
    }
    owners_signed(group, signers)
}

fn owners_signed(group: &TokenGroup<'_>, signers: &BTreeSet<PublicKey>) -> Result<(), RuleViolation> {
    match group
        .inputs
        .iter()
        .find(|(_, h)| !signers.contains(&h.holder.owning_key))
    {
        Some((_, h)) => Err(RuleViolation::OwnersMustSign {
            asset: group.asset.to_string(),
            holder: h.holder.to_string(),
        }),
        None => Ok(()),
    }
}

fn sum(quantities: impl Iterator<Item = u64>, asset: &str, side: &str) -> Result<u64, RuleViolation> {
    checked_sum(quantities).map_err(|_| RuleViolation::ArithmeticOverflow {
        asset: asset.to_string(),
        side: side.to_string(),
    })
}

fn unassigned(group: &TokenGroup<'_>) -> RuleViolation {
    RuleViolation::UnassignedGroup {
        asset: group.asset.to_string(),
    }
}

fn sorted(indices: &[usize]) -> Vec<usize> {
    let mut v = indices.to_vec();
    v.sort_unstable();
    v
}
