#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding untrusted bytes must never panic, and neither may checking
    // whatever happens to decode.

    if let Ok(tx) = bincode::deserialize::<airmile_transactions::SignedTransaction>(data) {
        let _ = tx.tx.check_id();
        let _ = tx.verify_required_signatures();
        let _ = tx.missing_signatures();
    }

    if let Ok(wire) = bincode::deserialize::<airmile_transactions::WireTransaction>(data) {
        let _ = wire.required_signing_keys();
        let _ = wire.dependencies();
    }

    let _ = bincode::deserialize::<airmile_flows::SessionMessage>(data);
    let _ = bincode::deserialize::<airmile_types::StateRef>(data);
    let _ = bincode::deserialize::<airmile_types::Signature>(data);
});
