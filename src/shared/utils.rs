//! Shared utilities for the custody core

use crate::shared::constants::HASH_SIZE;
use sha3::{Digest, Keccak256};

/// Keccak256 hash function
pub fn keccak256(data: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty_input() {
        // Keccak-256 of the empty string, cross-checked against the reference value.
        let hash = keccak256(b"");
        assert_eq!(
            hex::encode(hash),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_is_deterministic() {
        assert_eq!(keccak256(b"custody"), keccak256(b"custody"));
        assert_ne!(keccak256(b"custody"), keccak256(b"Custody"));
    }
}
