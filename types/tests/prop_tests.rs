use proptest::prelude::*;

use airmile_types::{checked_sum, AssetIdentity, Party, PublicKey, TokenAmount, TokenType, TxHash, TypesError};

fn alice_air_mile() -> AssetIdentity {
    AssetIdentity::new(Party::new("Alice", PublicKey([1u8; 32])), TokenType::air_mile())
}

proptest! {
    /// checked_sum agrees with wide arithmetic whenever the total fits.
    #[test]
    fn checked_sum_matches_u128(quantities in prop::collection::vec(any::<u64>(), 0..8)) {
        let wide: u128 = quantities.iter().map(|q| *q as u128).sum();
        let result = checked_sum(quantities.iter().copied());
        if wide <= u64::MAX as u128 {
            prop_assert_eq!(result, Ok(wide as u64));
        } else {
            prop_assert_eq!(result, Err(TypesError::Overflow));
        }
    }

    /// Summation order never changes a successful total.
    #[test]
    fn checked_sum_is_order_independent_when_it_fits(
        quantities in prop::collection::vec(0u64..u64::MAX / 16, 0..8),
    ) {
        let mut reversed = quantities.clone();
        reversed.reverse();
        prop_assert_eq!(checked_sum(quantities), checked_sum(reversed));
    }

    /// TokenAmount::checked_add is commutative for the same asset.
    #[test]
    fn token_amount_add_commutes(a in 0u64..u64::MAX / 2, b in 0u64..u64::MAX / 2) {
        let x = TokenAmount::new(a, alice_air_mile());
        let y = TokenAmount::new(b, alice_air_mile());
        prop_assert_eq!(x.checked_add(&y), y.checked_add(&x));
    }

    /// TxHash bincode serialization roundtrip.
    #[test]
    fn tx_hash_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        let encoded = bincode::serialize(&hash).unwrap();
        let decoded: TxHash = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, hash);
    }
}
