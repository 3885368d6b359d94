// src/core/basis.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classical bit value, always `0` or `1`.
pub type Bit = u8;

/// Measurement / encoding basis used by BB84.
///
/// `Z` is the computational basis (`|0⟩`, `|1⟩`), `X` the Hadamard basis
/// (`|+⟩`, `|-⟩`). Measuring in the wrong basis yields a uniformly random
/// outcome, which is what makes eavesdropping detectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// Computational basis.
    Z,
    /// Hadamard basis.
    X,
}

impl Basis {
    /// Maps a uniform boolean draw onto a basis. `false` is `Z`, `true` is `X`.
    pub fn from_draw(draw: bool) -> Self {
        if draw { Basis::X } else { Basis::Z }
    }

    /// Label of the state that encodes `bit` in this basis.
    pub fn state_label(self, bit: Bit) -> &'static str {
        match (self, bit) {
            (Basis::Z, 0) => "|0⟩",
            (Basis::Z, _) => "|1⟩",
            (Basis::X, 0) => "|+⟩",
            (Basis::X, _) => "|-⟩",
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Z => write!(f, "Z"),
            Basis::X => write!(f, "X"),
        }
    }
}

/// Complement of a bit.
#[inline]
pub fn flip(bit: Bit) -> Bit {
    1 - (bit & 1)
}

/// Renders a bit sequence as a `'0'`/`'1'` string.
pub fn bits_to_string(bits: &[Bit]) -> String {
    bits.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        assert_eq!(Basis::Z.state_label(0), "|0⟩");
        assert_eq!(Basis::Z.state_label(1), "|1⟩");
        assert_eq!(Basis::X.state_label(0), "|+⟩");
        assert_eq!(Basis::X.state_label(1), "|-⟩");
    }

    #[test]
    fn test_flip_and_render() {
        assert_eq!(flip(0), 1);
        assert_eq!(flip(1), 0);
        assert_eq!(bits_to_string(&[1, 0, 0, 1]), "1001");
        assert_eq!(bits_to_string(&[]), "");
    }

    #[test]
    fn test_basis_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Basis::X).unwrap(), "\"X\"");
        assert_eq!(Basis::from_draw(false), Basis::Z);
        assert_eq!(Basis::Z.to_string(), "Z");
    }
}
