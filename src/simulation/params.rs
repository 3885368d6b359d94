// src/simulation/params.rs
use serde::{Deserialize, Serialize};

/// Inputs to a scenario simulation.
///
/// Missing fields fall back to the API defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParams {
    /// Number of transmitted qubits.
    pub qubit_count: usize,
    /// Per-bit channel flip probability.
    pub error_rate: f64,
    /// Fraction of transmissions Eve intercepts.
    pub eve_fraction: f64,
}

impl SimulationParams {
    pub fn new(qubit_count: usize, error_rate: f64, eve_fraction: f64) -> Self {
        Self { qubit_count, error_rate, eve_fraction }
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self { qubit_count: 100, error_rate: 0.0, eve_fraction: 0.5 }
    }
}
