//! Token amounts.
//!
//! Quantities are unsigned 64-bit integers in the smallest unit of the asset.
//! Every addition is checked: an overflowing sum is an error, never a wrap.

use crate::asset::AssetIdentity;
use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity of one asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenAmount {
    pub quantity: u64,
    pub asset: AssetIdentity,
}

impl TokenAmount {
    pub fn new(quantity: u64, asset: AssetIdentity) -> Self {
        Self { quantity, asset }
    }

    pub fn zero(asset: AssetIdentity) -> Self {
        Self { quantity: 0, asset }
    }

    pub fn is_zero(&self) -> bool {
        self.quantity == 0
    }

    /// Add two amounts of the same asset.
    pub fn checked_add(&self, other: &TokenAmount) -> Result<TokenAmount, TypesError> {
        if self.asset != other.asset {
            return Err(TypesError::AssetMismatch {
                left: self.asset.to_string(),
                right: other.asset.to_string(),
            });
        }
        let quantity = self
            .quantity
            .checked_add(other.quantity)
            .ok_or(TypesError::Overflow)?;
        Ok(TokenAmount::new(quantity, self.asset.clone()))
    }

    /// Render the quantity with the asset's fraction digits, e.g. `12.50`.
    pub fn display_quantity(&self) -> String {
        let digits = self.asset.fraction_digits();
        if digits == 0 {
            return self.quantity.to_string();
        }
        let Some(scale) = 10u64.checked_pow(digits) else {
            return self.quantity.to_string();
        };
        format!(
            "{}.{:0width$}",
            self.quantity / scale,
            self.quantity % scale,
            width = digits as usize
        )
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_quantity(), self.asset)
    }
}

/// Sum raw quantities left to right, failing on the first overflow of the
/// running total.
pub fn checked_sum<I>(quantities: I) -> Result<u64, TypesError>
where
    I: IntoIterator<Item = u64>,
{
    quantities
        .into_iter()
        .try_fold(0u64, |acc, q| acc.checked_add(q).ok_or(TypesError::Overflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::TokenType;
    use crate::keys::PublicKey;
    use crate::party::Party;

    fn asset(name: &str, digits: u32) -> AssetIdentity {
        AssetIdentity::new(
            Party::new(name, PublicKey([7u8; 32])),
            TokenType::new("AirMile", digits),
        )
    }

    #[test]
    fn checked_add_same_asset() {
        let a = TokenAmount::new(10, asset("Alice", 0));
        let b = TokenAmount::new(15, asset("Alice", 0));
        assert_eq!(a.checked_add(&b).unwrap().quantity, 25);
    }

    #[test]
    fn checked_add_rejects_other_issuer() {
        let a = TokenAmount::new(10, asset("Alice", 0));
        let b = TokenAmount::new(15, asset("Carly", 0));
        assert!(matches!(
            a.checked_add(&b),
            Err(TypesError::AssetMismatch { .. })
        ));
    }

    #[test]
    fn checked_add_overflow() {
        let a = TokenAmount::new(u64::MAX, asset("Alice", 0));
        let b = TokenAmount::new(1, asset("Alice", 0));
        assert_eq!(a.checked_add(&b), Err(TypesError::Overflow));
    }

    #[test]
    fn checked_sum_fails_on_running_overflow() {
        assert_eq!(checked_sum([u64::MAX, 1]), Err(TypesError::Overflow));
        // i64::MAX + 1 still fits in an unsigned quantity
        assert_eq!(checked_sum([i64::MAX as u64, 1]), Ok(1u64 << 63));
        assert_eq!(checked_sum(Vec::<u64>::new()), Ok(0));
    }

    #[test]
    fn display_uses_fraction_digits() {
        assert_eq!(TokenAmount::new(1250, asset("Alice", 2)).display_quantity(), "12.50");
        assert_eq!(TokenAmount::new(7, asset("Alice", 0)).display_quantity(), "7");
    }
}
