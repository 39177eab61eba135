#![allow(dead_code)]

use airmile_crypto::keypair_from_name;
use airmile_transactions::{Command, LedgerTransaction, TokenCommand};
use airmile_types::{AssetIdentity, Holding, Party, PublicKey, StateAndRef, StateRef, TokenType, TxHash};

pub fn party(name: &str) -> Party {
    Party::new(name, keypair_from_name(name).public)
}

pub fn key(name: &str) -> PublicKey {
    party(name).owning_key
}

pub fn air_mile(issuer: &str) -> AssetIdentity {
    AssetIdentity::new(party(issuer), TokenType::air_mile())
}

pub fn held(issuer: &str, quantity: u64, holder: &str) -> Holding {
    Holding::issued(&party(issuer), TokenType::air_mile(), quantity, &party(holder))
}

/// A ledger transaction assembled index by index.
#[derive(Default)]
pub struct Tx {
    inputs: Vec<StateAndRef>,
    outputs: Vec<Holding>,
    commands: Vec<Command>,
}

impl Tx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, holding: Holding) -> Self {
        let n = self.inputs.len() as u8;
        self.inputs
            .push(StateAndRef::new(holding, StateRef::new(TxHash::new([n + 1; 32]), 0)));
        self
    }

    pub fn output(mut self, holding: Holding) -> Self {
        self.outputs.push(holding);
        self
    }

    pub fn issue(mut self, issuer: &str, outputs: &[usize], signers: &[&str]) -> Self {
        self.commands.push(Command::new(
            TokenCommand::Issue {
                asset: air_mile(issuer),
                outputs: outputs.to_vec(),
            },
            signers.iter().map(|s| key(s)),
        ));
        self
    }

    pub fn moves(mut self, issuer: &str, inputs: &[usize], outputs: &[usize], signers: &[&str]) -> Self {
        self.commands.push(Command::new(
            TokenCommand::Move {
                asset: air_mile(issuer),
                inputs: inputs.to_vec(),
                outputs: outputs.to_vec(),
            },
            signers.iter().map(|s| key(s)),
        ));
        self
    }

    pub fn redeem(mut self, issuer: &str, inputs: &[usize], signers: &[&str]) -> Self {
        self.commands.push(Command::new(
            TokenCommand::Redeem {
                asset: air_mile(issuer),
                inputs: inputs.to_vec(),
            },
            signers.iter().map(|s| key(s)),
        ));
        self
    }

    pub fn build(self) -> LedgerTransaction {
        LedgerTransaction::from_parts(self.inputs, self.outputs, self.commands)
    }
}

pub fn code(tx: &LedgerTransaction) -> &'static str {
    match airmile_contracts::verify(tx) {
        Ok(()) => "ok",
        Err(v) => v.code(),
    }
}
