// src/simulation/results.rs
use crate::core::{Basis, Bit};
use crate::scenarios::Scenario;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Free-form, scenario-specific diagnostic fields.
pub type Summary = BTreeMap<String, Value>;

/// Everything observed about a single transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransmissionRecord {
    pub index: usize,
    pub alice_bit: Bit,
    pub alice_basis: Basis,
    /// Label of the prepared state, e.g. `|+⟩`.
    pub alice_state: String,
    pub eve_intercepted: bool,
    /// Eve's basis, present only if she intercepted.
    pub eve_basis: Option<Basis>,
    /// The bit Eve forwarded, present only if she intercepted.
    pub eve_bit: Option<Bit>,
    pub eve_caused_error: bool,
    pub channel_error: bool,
    pub bob_basis: Basis,
    pub bob_bit: Bit,
    pub bases_match: bool,
    /// Diagnostic only; never used for sifting.
    pub bit_match: bool,
    pub kept_in_key: bool,
}

/// Outcome of a scenario simulation, shaped for transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub scenario: Scenario,
    pub qubit_count: usize,
    /// Sifted key, truncated with `"..."` past 100 characters.
    pub sifted_key: String,
    pub sifted_key_length: usize,
    pub qber: f64,
    /// Error rate echoed from the request; Ideal reports 0.
    pub error_rate: f64,
    /// Eve fraction echoed from the request; 0 for scenarios without Eve.
    pub eve_fraction: f64,
    pub summary: Summary,
    /// Wall-clock duration in seconds.
    pub execution_time: f64,
    /// Per-position breakdown, emitted by the detailed scenario only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qubits: Option<Vec<TransmissionRecord>>,
}

impl SimulationResult {
    /// Looks up a summary field as `f64`.
    pub fn summary_f64(&self, key: &str) -> Option<f64> {
        self.summary.get(key).and_then(Value::as_f64)
    }

    /// Looks up a summary field as `bool`.
    pub fn summary_bool(&self, key: &str) -> Option<bool> {
        self.summary.get(key).and_then(Value::as_bool)
    }

    /// Looks up a summary field as `u64`.
    pub fn summary_u64(&self, key: &str) -> Option<u64> {
        self.summary.get(key).and_then(Value::as_u64)
    }

    /// Looks up a summary field as a string.
    pub fn summary_str(&self, key: &str) -> Option<&str> {
        self.summary.get(key).and_then(Value::as_str)
    }

    /// Theoretical QBER reported by the scenario.
    pub fn expected_qber(&self) -> Option<f64> {
        self.summary_f64("expected_qber")
    }

    /// Whether the measured QBER fell below the security threshold.
    pub fn is_secure(&self) -> Option<bool> {
        self.summary_bool("secure")
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results ({}):", self.scenario)?;
        writeln!(f, "  Qubits: {}", self.qubit_count)?;
        writeln!(f, "  Sifted key ({} bits): {}", self.sifted_key_length, self.sifted_key)?;
        writeln!(f, "  QBER: {:.4}", self.qber)?;
        writeln!(f, "  Error rate: {:.3}, Eve fraction: {:.3}", self.error_rate, self.eve_fraction)?;
        writeln!(f, "  Summary:")?;
        for (key, value) in &self.summary {
            writeln!(f, "    {}: {}", key, value)?;
        }
        if let Some(qubits) = &self.qubits {
            writeln!(f, "  Qubits:")?;
            for q in qubits {
                writeln!(
                    f,
                    "    #{:<3} A:{}{} B:{}{} match:{} kept:{}",
                    q.index, q.alice_bit, q.alice_basis, q.bob_bit, q.bob_basis, q.bases_match, q.kept_in_key
                )?;
            }
        }
        Ok(())
    }
}
