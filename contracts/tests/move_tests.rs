mod common;

use common::{code, held, Tx};

#[test]
fn move_must_be_signed_by_current_owner() {
    let base = || {
        Tx::new()
            .input(held("Alice", 10, "Bob"))
            .output(held("Alice", 10, "Carly"))
    };
    assert_eq!(code(&base().moves("Alice", &[0], &[0], &["Carly"]).build()), "owners-must-sign");
    assert_eq!(code(&base().moves("Alice", &[0], &[0], &["Alice"]).build()), "owners-must-sign");
    assert_eq!(code(&base().moves("Alice", &[0], &[0], &["Bob"]).build()), "ok");
}

#[test]
fn every_input_holder_must_sign() {
    let tx = Tx::new()
        .input(held("Alice", 10, "Bob"))
        .input(held("Alice", 5, "Carly"))
        .output(held("Alice", 15, "Dan"))
        .moves("Alice", &[0, 1], &[0], &["Bob"])
        .build();
    assert_eq!(code(&tx), "owners-must-sign");
}

#[test]
fn move_must_have_inputs() {
    let tx = Tx::new()
        .output(held("Alice", 10, "Carly"))
        .moves("Alice", &[], &[0], &["Bob"])
        .build();
    assert_eq!(code(&tx), "move-without-inputs");
}

#[test]
fn move_must_have_outputs() {
    let tx = Tx::new()
        .input(held("Alice", 10, "Bob"))
        .moves("Alice", &[0], &[], &["Bob"])
        .build();
    assert_eq!(code(&tx), "move-without-outputs");
}

#[test]
fn move_inputs_may_have_zero_amounts() {
    let tx = Tx::new()
        .input(held("Alice", 10, "Bob"))
        .input(held("Alice", 0, "Bob"))
        .output(held("Alice", 10, "Carly"))
        .moves("Alice", &[0, 1], &[0], &["Bob"])
        .build();
    assert_eq!(code(&tx), "ok");
}

#[test]
fn move_outputs_cannot_have_zero_amounts() {
    let tx = Tx::new()
        .input(held("Alice", 10, "Bob"))
        .output(held("Alice", 10, "Carly"))
        .output(held("Alice", 0, "Dan"))
        .moves("Alice", &[0], &[0, 1], &["Bob"])
        .build();
    assert_eq!(code(&tx), "zero-output-amount");
}

#[test]
fn move_is_conserved_per_issuer() {
    let tx = Tx::new()
        .input(held("Alice", 10, "Bob"))
        .input(held("Carly", 15, "Bob"))
        .output(held("Alice", 15, "Dan"))
        .output(held("Carly", 10, "Dan"))
        .moves("Alice", &[0], &[0], &["Bob"])
        .moves("Carly", &[1], &[1], &["Bob"])
        .build();
    assert_eq!(code(&tx), "sum-mismatch");

    let tx = Tx::new()
        .input(held("Alice", 10, "Bob"))
        .input(held("Carly", 15, "Bob"))
        .output(held("Alice", 10, "Dan"))
        .output(held("Carly", 15, "Dan"))
        .moves("Alice", &[0], &[0], &["Bob"])
        .moves("Carly", &[1], &[1], &["Bob"])
        .build();
    assert_eq!(code(&tx), "ok");
}

#[test]
fn inputs_of_another_issuer_need_their_own_command() {
    let tx = Tx::new()
        .input(held("Alice", 10, "Bob"))
        .input(held("Carly", 15, "Bob"))
        .output(held("Alice", 10, "Dan"))
        .moves("Alice", &[0], &[0], &["Bob"])
        .build();
    assert_eq!(code(&tx), "unassigned-group");
}

#[test]
fn conservation_is_off_by_one_sensitive() {
    for out in [24, 26] {
        let tx = Tx::new()
            .input(held("Alice", 10, "Bob"))
            .input(held("Alice", 15, "Bob"))
            .output(held("Alice", out, "Carly"))
            .moves("Alice", &[0, 1], &[0], &["Bob"])
            .build();
        assert_eq!(code(&tx), "sum-mismatch", "output {out}");
    }
}

#[test]
fn overflowing_inputs_fail_with_overflow_not_mismatch() {
    let tx = Tx::new()
        .input(held("Alice", u64::MAX, "Bob"))
        .input(held("Alice", 1, "Bob"))
        .output(held("Alice", 1, "Carly"))
        .moves("Alice", &[0, 1], &[0], &["Bob"])
        .build();
    assert_eq!(code(&tx), "arithmetic-overflow");
}

#[test]
fn overflowing_outputs_fail_with_overflow() {
    let tx = Tx::new()
        .input(held("Alice", 1, "Bob"))
        .output(held("Alice", u64::MAX, "Carly"))
        .output(held("Alice", 1, "Carly"))
        .moves("Alice", &[0], &[0, 1], &["Bob"])
        .build();
    assert_eq!(code(&tx), "arithmetic-overflow");
}
