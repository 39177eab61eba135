//! Blake2b hashing for transaction ids.

use airmile_types::TxHash;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash multiple byte slices in sequence without concatenating them.
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Hash the canonical bytes of a transaction body to produce its id.
pub fn hash_transaction(tx_bytes: &[u8]) -> TxHash {
    TxHash::new(blake2b_256(tx_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_deterministic() {
        assert_eq!(blake2b_256(b"hello airmile"), blake2b_256(b"hello airmile"));
        assert_ne!(blake2b_256(b"hello"), blake2b_256(b"world"));
    }

    #[test]
    fn blake2b_multi_equivalent() {
        assert_eq!(blake2b_256(b"helloworld"), blake2b_256_multi(&[b"hello", b"world"]));
    }

    #[test]
    fn hash_transaction_returns_txhash() {
        assert!(!hash_transaction(b"test tx data").is_zero());
    }
}
