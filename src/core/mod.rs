// src/core/mod.rs

//! Core data types: bits and bases, the randomness stream, errors and constants.

pub mod basis;
pub mod error;
pub mod rng;

pub use basis::{Basis, Bit, bits_to_string, flip};
pub use error::{QkdError, QkdResult};
pub use rng::QkdRng;

pub mod constants;
pub use constants::qkd_constants::{INTERCEPT_DISTURBANCE, SECURITY_THRESHOLD};
