// src/operations/mod.rs

//! The probabilistic primitives of BB84 that scenarios are composed from.
//!
//! Each primitive draws from a shared [`QkdRng`](crate::core::QkdRng) and
//! never mutates its inputs. Sequences are parallel: index `i` of every
//! slice describes the same transmission.

pub mod eavesdropper;
pub mod noise;
pub mod qber;
pub mod sifting;

pub use eavesdropper::{Interception, intercept_resend};
pub use noise::{apply_channel_noise, channel_flip_mask, flip_where};
pub use qber::{count_errors, estimate_qber};
pub use sifting::{SiftedKey, count_matches, sift_key, truncate_key};

/// A stage of the shared protocol pipeline, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Alice draws her bits, then her bases.
    Prepare,
    /// Eve runs the intercept-resend attack.
    Eavesdrop,
    /// Bob draws his bases.
    ChooseBases,
    /// The channel flips bits at random.
    ChannelNoise,
    /// Bob records his bits, randomizing on basis mismatch when modelled.
    Measure,
    /// Bases are compared publicly and the key extracted.
    Sift,
    /// The error rate of the sifted key is estimated.
    EstimateQber,
}
