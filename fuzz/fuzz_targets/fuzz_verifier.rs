#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use airmile_transactions::{Command, LedgerTransaction, TokenCommand};
use airmile_types::{
    AssetIdentity, Holding, Party, PublicKey, StateAndRef, StateRef, TokenType, TxHash,
};

#[derive(Arbitrary, Debug)]
struct FuzzHolding {
    issuer: u8,
    holder: u8,
    quantity: u64,
}

#[derive(Arbitrary, Debug)]
enum FuzzCommand {
    Issue { issuer: u8, outputs: Vec<u8>, signers: Vec<u8> },
    Move { issuer: u8, inputs: Vec<u8>, outputs: Vec<u8>, signers: Vec<u8> },
    Redeem { issuer: u8, inputs: Vec<u8>, signers: Vec<u8> },
}

#[derive(Arbitrary, Debug)]
struct FuzzTransaction {
    inputs: Vec<FuzzHolding>,
    outputs: Vec<FuzzHolding>,
    commands: Vec<FuzzCommand>,
}

const PARTIES: usize = 4;

fn parties() -> Vec<Party> {
    (0..PARTIES as u8)
        .map(|i| {
            let keys = airmile_crypto::keypair_from_seed(&[i + 1; 32]);
            Party::new(format!("P{i}"), keys.public)
        })
        .collect()
}

fn indices(raw: &[u8]) -> Vec<usize> {
    raw.iter().map(|i| *i as usize).collect()
}

// Arbitrary transactions, including out-of-range indices and quantities
// that overflow, must be accepted or rejected without panicking, and the
// verdict must not change between runs.
fuzz_target!(|input: FuzzTransaction| {
    let parties = parties();
    let party = |i: u8| parties[i as usize % PARTIES].clone();
    let asset = |i: u8| AssetIdentity::new(party(i), TokenType::air_mile());
    let keys = |raw: &[u8]| -> Vec<PublicKey> { raw.iter().map(|i| party(*i).owning_key).collect() };
    let holding = |h: &FuzzHolding| {
        Holding::issued(&party(h.issuer), TokenType::air_mile(), h.quantity, &party(h.holder))
    };

    let inputs = input
        .inputs
        .iter()
        .enumerate()
        .map(|(i, h)| StateAndRef::new(holding(h), StateRef::new(TxHash::new([9; 32]), i as u32)))
        .collect();
    let outputs = input.outputs.iter().map(holding).collect();
    let commands = input
        .commands
        .iter()
        .map(|c| match c {
            FuzzCommand::Issue { issuer, outputs, signers } => Command::new(
                TokenCommand::Issue { asset: asset(*issuer), outputs: indices(outputs) },
                keys(signers),
            ),
            FuzzCommand::Move { issuer, inputs, outputs, signers } => Command::new(
                TokenCommand::Move {
                    asset: asset(*issuer),
                    inputs: indices(inputs),
                    outputs: indices(outputs),
                },
                keys(signers),
            ),
            FuzzCommand::Redeem { issuer, inputs, signers } => Command::new(
                TokenCommand::Redeem { asset: asset(*issuer), inputs: indices(inputs) },
                keys(signers),
            ),
        })
        .collect();

    let tx = LedgerTransaction::from_parts(inputs, outputs, commands);
    let first = airmile_contracts::verify(&tx);
    assert_eq!(first, airmile_contracts::verify(&tx));
});
