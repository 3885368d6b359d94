// src/operations/qber.rs

use crate::core::{Bit, QkdError, QkdResult};

/// Quantum bit error rate over the positions flagged in `matching_bases`.
///
/// Returns `mismatches / matches`, or exactly `0.0` when nothing matched.
///
/// # Errors
/// `QkdError::LengthMismatch` if the three sequences differ in length.
pub fn estimate_qber(alice_bits: &[Bit], bob_bits: &[Bit], matching_bases: &[bool]) -> QkdResult<f64> {
    if alice_bits.len() != bob_bits.len() {
        return Err(QkdError::LengthMismatch { left: alice_bits.len(), right: bob_bits.len() });
    }
    if alice_bits.len() != matching_bases.len() {
        return Err(QkdError::LengthMismatch { left: alice_bits.len(), right: matching_bases.len() });
    }

    let (matches, errors) = alice_bits
        .iter()
        .zip(bob_bits)
        .zip(matching_bases)
        .filter(|(_, matched)| **matched)
        .fold((0usize, 0usize), |(matches, errors), ((a, b), _)| {
            (matches + 1, errors + usize::from(a != b))
        });

    if matches == 0 {
        return Ok(0.0);
    }
    Ok(errors as f64 / matches as f64)
}

/// Number of sifted positions where the parties disagree.
pub fn count_errors(alice_sifted: &[Bit], bob_sifted: &[Bit]) -> usize {
    alice_sifted.iter().zip(bob_sifted).filter(|(a, b)| a != b).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_only_matching_positions() {
        // Position 1 disagrees but is not sifted.
        let qber = estimate_qber(&[1, 0, 1, 0], &[1, 1, 0, 0], &[true, false, true, true]).unwrap();
        assert!((qber - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_matches_is_exactly_zero() {
        assert_eq!(estimate_qber(&[1, 0], &[0, 1], &[false, false]).unwrap(), 0.0);
        assert_eq!(estimate_qber(&[], &[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_full_disagreement_is_one() {
        assert_eq!(estimate_qber(&[1, 1], &[0, 0], &[true, true]).unwrap(), 1.0);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert_eq!(
            estimate_qber(&[1, 0, 1], &[1, 0], &[true, true, true]),
            Err(QkdError::LengthMismatch { left: 3, right: 2 })
        );
        assert_eq!(
            estimate_qber(&[1, 0], &[1, 0], &[true]),
            Err(QkdError::LengthMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_count_errors() {
        assert_eq!(count_errors(&[1, 0, 1], &[1, 1, 0]), 2);
    }
}
