#![allow(dead_code)]

use airmile_nullables::TestIdentity;
use airmile_transactions::{SignedTransaction, TransactionBuilder};
use airmile_types::{Holding, Party, StateAndRef, TokenType};

pub fn party(name: &str) -> Party {
    TestIdentity::new(name).party().clone()
}

pub fn notary() -> Party {
    party("Notary")
}

pub fn held(issuer: &str, quantity: u64, holder: &str) -> Holding {
    Holding::issued(&party(issuer), TokenType::air_mile(), quantity, &party(holder))
}

/// An issuance signed by `issuer`, built without running a flow.
pub fn issued(issuer: &str, to: &[(&str, u64)]) -> SignedTransaction {
    let mut builder = TransactionBuilder::new(Some(notary()));
    builder.add_issue_tokens(to.iter().map(|(h, q)| held(issuer, *q, h)).collect());
    builder
        .sign_initial(TestIdentity::new(issuer).keys())
        .unwrap()
}

pub fn output(tx: &SignedTransaction, index: usize) -> StateAndRef {
    StateAndRef::new(tx.tx.outputs[index].clone(), tx.tx.out_ref(index).unwrap())
}

/// A move of `inputs` to `outputs`, signed by `signers`.
pub fn moved(inputs: Vec<StateAndRef>, outputs: Vec<Holding>, signers: &[&str]) -> SignedTransaction {
    let mut builder = TransactionBuilder::new(Some(notary()));
    builder.add_move_tokens(inputs, outputs);
    let wire = builder.to_wire_transaction().unwrap();
    let sigs = signers.iter().map(|s| TestIdentity::new(s).sign(&wire.id)).collect();
    SignedTransaction::new(wire, sigs)
}
