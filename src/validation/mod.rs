// src/validation/mod.rs

//! Input validation. Every check here runs before any randomness is drawn,
//! so a rejected call leaves no partial simulation state behind.

use crate::core::{QkdError, QkdResult};
use std::ops::RangeInclusive;
use tracing::warn;

/// Qubit counts accepted by the scenario API.
pub const SCENARIO_QUBIT_RANGE: RangeInclusive<usize> = 10..=1000;
/// Qubit counts accepted by the session mode and the detailed view.
pub const SESSION_QUBIT_RANGE: RangeInclusive<usize> = 1..=1000;
/// Channel error rates accepted by the scenario API.
pub const SCENARIO_ERROR_RATE_MAX: f64 = 0.5;

/// Checks that `value` is finite and lies in `[min, max]`.
///
/// # Returns
/// * `Ok(value)` when accepted, so checks can be chained inline.
/// * `Err(QkdError::InvalidParameter)` naming `parameter` otherwise.
pub fn check_range(parameter: &'static str, value: f64, min: f64, max: f64) -> QkdResult<f64> {
    if !value.is_finite() || value < min || value > max {
        warn!(parameter, value, min, max, "rejected out-of-range parameter");
        return Err(QkdError::InvalidParameter {
            parameter,
            value,
            message: format!("must be a finite value within [{}, {}]", min, max),
        });
    }
    Ok(value)
}

/// Checks a probability in `[0, 1]`.
pub fn check_probability(parameter: &'static str, value: f64) -> QkdResult<f64> {
    check_range(parameter, value, 0.0, 1.0)
}

/// Checks a qubit count against an inclusive range.
pub fn check_qubit_count(
    parameter: &'static str,
    value: usize,
    range: &RangeInclusive<usize>,
) -> QkdResult<usize> {
    if !range.contains(&value) {
        warn!(parameter, value, "rejected out-of-range qubit count");
        return Err(QkdError::InvalidParameter {
            parameter,
            value: value as f64,
            message: format!("must be an integer within [{}, {}]", range.start(), range.end()),
        });
    }
    Ok(value)
}

/// Checks that every length in `lengths` equals the first one.
///
/// # Returns
/// * `Err(QkdError::InputShape)` reporting the first differing length.
pub fn check_same_length(context: &'static str, lengths: &[usize]) -> QkdResult<usize> {
    let expected = lengths.first().copied().unwrap_or(0);
    match lengths.iter().find(|len| **len != expected) {
        Some(found) => Err(QkdError::InputShape {
            context,
            expected,
            found: *found,
        }),
        None => Ok(expected),
    }
}
