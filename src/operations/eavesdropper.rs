// src/operations/eavesdropper.rs

use crate::core::{Basis, Bit, QkdResult, QkdRng, flip};
use crate::validation::{check_probability, check_same_length};
use serde::Serialize;

/// What Eve did to each transmission during an intercept-resend attack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interception {
    /// Eve's measurement basis per position, drawn for every position.
    pub eve_bases: Vec<Basis>,
    /// Whether Eve acted on the position.
    pub intercepted: Vec<bool>,
    /// The bit Eve forwards downstream.
    pub eve_bits: Vec<Bit>,
    /// Positions where Eve's measurement flipped Alice's bit.
    pub disturbed: Vec<bool>,
}

impl Interception {
    /// Number of intercepted transmissions.
    pub fn intercept_count(&self) -> usize {
        self.intercepted.iter().filter(|i| **i).count()
    }

    /// Number of transmissions Eve disturbed.
    pub fn disturbance_count(&self) -> usize {
        self.disturbed.iter().filter(|d| **d).count()
    }
}

/// Models the intercept-resend attack.
///
/// Draw order: Eve's bases (one per position), intercept flags (one per
/// position), then one fair coin per intercepted position whose basis differs
/// from Alice's, in index order. A coin landing below one half flips the bit.
/// A matching basis never disturbs the state, so the expected flip rate on
/// intercepted transmissions is 1/4.
pub fn intercept_resend(
    alice_bits: &[Bit],
    alice_bases: &[Basis],
    eve_fraction: f64,
    rng: &mut QkdRng,
) -> QkdResult<Interception> {
    check_probability("eve_fraction", eve_fraction)?;
    let n = check_same_length("intercept_resend", &[alice_bits.len(), alice_bases.len()])?;

    let eve_bases = rng.bases(n);
    let intercepted = rng.mask(n, eve_fraction);

    let mut eve_bits = alice_bits.to_vec();
    let mut disturbed = vec![false; n];
    for i in 0..n {
        if intercepted[i] && eve_bases[i] != alice_bases[i] && rng.coin() {
            eve_bits[i] = flip(alice_bits[i]);
            disturbed[i] = true;
        }
    }

    Ok(Interception {
        eve_bases,
        intercepted,
        eve_bits,
        disturbed,
    })
}
