// src/operations/noise.rs

use crate::core::{Bit, QkdResult, QkdRng, flip};
use crate::validation::check_probability;

/// Draws the per-position flip mask of a noisy channel: one uniform draw per
/// bit, flipping when the draw falls below `error_rate`.
pub fn channel_flip_mask(n: usize, error_rate: f64, rng: &mut QkdRng) -> QkdResult<Vec<bool>> {
    check_probability("error_rate", error_rate)?;
    Ok(rng.mask(n, error_rate))
}

/// Returns a copy of `bits` with every position flagged in `mask` complemented.
pub fn flip_where(bits: &[Bit], mask: &[bool]) -> Vec<Bit> {
    bits.iter()
        .zip(mask)
        .map(|(bit, flipped)| if *flipped { flip(*bit) } else { *bit })
        .collect()
}

/// Applies independent bit-flip noise to `bits`, leaving the input untouched.
///
/// `error_rate = 0` is the identity. `error_rate = 1` flips everything, but
/// still through the same per-bit draw so the stream advances identically.
pub fn apply_channel_noise(bits: &[Bit], error_rate: f64, rng: &mut QkdRng) -> QkdResult<Vec<Bit>> {
    let mask = channel_flip_mask(bits.len(), error_rate, rng)?;
    Ok(flip_where(bits, &mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_is_identity() {
        let mut rng = QkdRng::seeded(3);
        let bits = rng.bits(128);
        let noisy = apply_channel_noise(&bits, 0.0, &mut rng).unwrap();
        assert_eq!(noisy, bits);
    }

    #[test]
    fn test_full_rate_flips_everything() {
        let mut rng = QkdRng::seeded(3);
        let bits = rng.bits(128);
        let noisy = apply_channel_noise(&bits, 1.0, &mut rng).unwrap();
        assert!(bits.iter().zip(&noisy).all(|(a, b)| a != b));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let bits = vec![0, 1, 1, 0];
        let before = bits.clone();
        let mut rng = QkdRng::seeded(9);
        let _ = apply_channel_noise(&bits, 0.5, &mut rng).unwrap();
        assert_eq!(bits, before);
    }

    #[test]
    fn test_flip_rate_tracks_error_rate() {
        let mut rng = QkdRng::seeded(42);
        let bits = vec![0; 10_000];
        let noisy = apply_channel_noise(&bits, 0.2, &mut rng).unwrap();
        let flipped = noisy.iter().filter(|b| **b == 1).count() as f64 / 10_000.0;
        assert!((flipped - 0.2).abs() < 0.02, "flip rate {}", flipped);
    }

    #[test]
    fn test_rejects_rate_outside_unit_interval() {
        let mut rng = QkdRng::seeded(1);
        assert!(apply_channel_noise(&[0, 1], 1.5, &mut rng).is_err());
        assert!(apply_channel_noise(&[0, 1], -0.1, &mut rng).is_err());
    }
}
