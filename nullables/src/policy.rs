//! Signing policies for tests.

use airmile_flows::SigningPolicy;
use airmile_transactions::LedgerTransaction;
use airmile_types::Party;

/// Refuses to sign away any single input it holds above `max_quantity`.
#[derive(Clone, Copy, Debug)]
pub struct SkintPolicy {
    pub max_quantity: u64,
}

impl SkintPolicy {
    pub fn new(max_quantity: u64) -> Self {
        Self { max_quantity }
    }
}

impl SigningPolicy for SkintPolicy {
    fn check(&self, tx: &LedgerTransaction, us: &Party) -> Result<(), String> {
        let too_high = tx
            .inputs
            .iter()
            .filter(|i| i.state.holder == *us)
            .any(|i| i.state.quantity() > self.max_quantity);
        if too_high {
            return Err("quantity must not be too high".to_string());
        }
        Ok(())
    }
}
