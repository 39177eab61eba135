//! Holdings: the ledger fact that a party holds an amount of an asset.

use crate::amount::TokenAmount;
use crate::asset::AssetIdentity;
use crate::party::Party;
use serde::{Deserialize, Serialize};
use std::fmt;

/// "Party `holder` holds `amount`."
///
/// Created by issuance, consumed by a move or a redemption, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Holding {
    pub amount: TokenAmount,
    pub holder: Party,
}

impl Holding {
    pub fn new(amount: TokenAmount, holder: Party) -> Self {
        Self { amount, holder }
    }

    /// Shorthand for `quantity of token_type issued by issuer held by holder`.
    pub fn issued(issuer: &Party, token_type: crate::TokenType, quantity: u64, holder: &Party) -> Self {
        Self::new(
            TokenAmount::new(quantity, AssetIdentity::new(issuer.clone(), token_type)),
            holder.clone(),
        )
    }

    pub fn asset(&self) -> &AssetIdentity {
        &self.amount.asset
    }

    pub fn issuer(&self) -> &Party {
        &self.amount.asset.issuer
    }

    pub fn quantity(&self) -> u64 {
        self.amount.quantity
    }

    /// The parties that must be told about this state: only its holder.
    pub fn participants(&self) -> Vec<&Party> {
        vec![&self.holder]
    }

    /// The same amount re-assigned to another holder.
    pub fn with_new_holder(&self, holder: Party) -> Self {
        Self::new(self.amount.clone(), holder)
    }
}

impl fmt::Display for Holding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} held by {}", self.amount, self.holder)
    }
}
