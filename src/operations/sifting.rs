// src/operations/sifting.rs

use crate::core::{Basis, Bit, QkdResult, bits_to_string};
use crate::validation::check_same_length;
use serde::Serialize;

/// Outcome of basis sifting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiftedKey {
    /// Alice's bits at matching positions, rendered as a bit string. Alice's
    /// sequence is authoritative for key material.
    pub key: String,
    /// `true` where Alice's and Bob's bases agree.
    pub matching_bases: Vec<bool>,
    /// Alice's retained bits.
    pub alice: Vec<Bit>,
    /// Bob's retained bits.
    pub bob: Vec<Bit>,
}

impl SiftedKey {
    /// Number of retained positions.
    pub fn len(&self) -> usize {
        self.alice.len()
    }

    /// Returns `true` if no position was retained.
    pub fn is_empty(&self) -> bool {
        self.alice.is_empty()
    }

    /// Bob's retained bits as a string.
    pub fn bob_key(&self) -> String {
        bits_to_string(&self.bob)
    }
}

/// Keeps the positions where both parties used the same basis.
///
/// # Errors
/// `QkdError::InputShape` if the four sequences differ in length.
pub fn sift_key(
    alice_bits: &[Bit],
    bob_bits: &[Bit],
    alice_bases: &[Basis],
    bob_bases: &[Basis],
) -> QkdResult<SiftedKey> {
    check_same_length(
        "sift_key",
        &[alice_bits.len(), bob_bits.len(), alice_bases.len(), bob_bases.len()],
    )?;

    let matching_bases: Vec<bool> = alice_bases.iter().zip(bob_bases).map(|(a, b)| a == b).collect();
    let (alice, bob): (Vec<Bit>, Vec<Bit>) = alice_bits
        .iter()
        .zip(bob_bits)
        .zip(&matching_bases)
        .filter(|(_, matched)| **matched)
        .map(|((a, b), _)| (*a, *b))
        .unzip();

    Ok(SiftedKey {
        key: bits_to_string(&alice),
        matching_bases,
        alice,
        bob,
    })
}

/// Counts positions in `mask` that are set.
pub fn count_matches(mask: &[bool]) -> usize {
    mask.iter().filter(|m| **m).count()
}

/// Truncates a key string for transport, appending `"..."` past `limit` characters.
pub fn truncate_key(key: &str, limit: usize) -> String {
    match key.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &key[..cut]),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QkdError;
    use crate::core::Basis::{X, Z};

    #[test]
    fn test_keeps_matching_positions_in_order() {
        let sifted = sift_key(&[1, 0, 1, 1], &[1, 1, 0, 1], &[Z, X, Z, X], &[Z, Z, Z, X]).unwrap();
        assert_eq!(sifted.matching_bases, vec![true, false, true, true]);
        assert_eq!(sifted.key, "111");
        assert_eq!(sifted.alice, vec![1, 1, 1]);
        assert_eq!(sifted.bob, vec![1, 0, 1]);
        assert_eq!(sifted.bob_key(), "101");
        assert_eq!(sifted.len(), 3);
    }

    #[test]
    fn test_no_matching_bases_gives_empty_key() {
        let sifted = sift_key(&[1, 0], &[1, 0], &[Z, X], &[X, Z]).unwrap();
        assert!(sifted.is_empty());
        assert_eq!(sifted.key, "");
    }

    #[test]
    fn test_rejects_unequal_lengths() {
        let err = sift_key(&[1, 0, 1], &[1, 0], &[Z, Z, Z], &[Z, Z, Z]).unwrap_err();
        assert_eq!(err, QkdError::InputShape { context: "sift_key", expected: 3, found: 2 });
    }

    #[test]
    fn test_truncate_key() {
        let long = "1".repeat(150);
        let shown = truncate_key(&long, 100);
        assert_eq!(shown.len(), 103);
        assert!(shown.ends_with("..."));
        assert_eq!(truncate_key("0101", 100), "0101");
        assert_eq!(truncate_key(&"1".repeat(100), 100), "1".repeat(100));
    }

    #[test]
    fn test_truncate_key_counts_characters() {
        let accented = "é".repeat(60);
        assert_eq!(truncate_key(&accented, 101), accented);
        let shown = truncate_key(&accented, 50);
        assert_eq!(shown.chars().count(), 53);
        assert!(shown.starts_with(&"é".repeat(50)));
        assert_eq!(truncate_key(&"0".repeat(100), 100).len(), 100);
    }
}
