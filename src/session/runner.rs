// src/session/runner.rs
use super::LatestResults;
use crate::core::{Basis, Bit, QkdError, QkdResult, QkdRng, SECURITY_THRESHOLD};
use crate::simulation::engine::{PipelineConfig, ProtocolRun, run_protocol};
use crate::validation::{SESSION_QUBIT_RANGE, check_probability, check_qubit_count};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Session runs model channel noise and random wrong-basis outcomes, without Eve.
const SESSION_PIPELINE: PipelineConfig =
    PipelineConfig { apply_eve: false, apply_noise: true, randomize_on_mismatch: true };

/// Parameters of a session run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRequest {
    /// Number of rounds, within `[1, 1000]`.
    pub n_qubits: usize,
    /// Channel flip probability, within `[0, 1]`.
    pub noise_level: f64,
    pub seed: Option<u64>,
}

impl Default for SessionRequest {
    fn default() -> Self {
        Self { n_qubits: 100, noise_level: 0.0, seed: None }
    }
}

impl SessionRequest {
    pub fn validate(&self) -> QkdResult<()> {
        check_qubit_count("n_qubits", self.n_qubits, &SESSION_QUBIT_RANGE)?;
        check_probability("noise_level", self.noise_level)?;
        Ok(())
    }
}

/// Raw data of the most recent session run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRun {
    pub seed: u64,
    pub noise_level: f64,
    pub alice_bits: Vec<Bit>,
    pub alice_bases: Vec<Basis>,
    pub bob_bases: Vec<Basis>,
    pub bob_measurements: Vec<Bit>,
    pub sifted_key_alice: Vec<Bit>,
    pub sifted_key_bob: Vec<Bit>,
    pub matching_bases: Vec<bool>,
    pub total_rounds: usize,
    pub qber: f64,
    pub error_count: usize,
}

impl SessionRun {
    fn from_protocol(run: ProtocolRun, noise_level: f64) -> Self {
        let error_count = run.error_count();
        Self {
            seed: run.seed,
            noise_level,
            total_rounds: run.qubit_count(),
            qber: run.qber,
            alice_bits: run.alice_bits,
            alice_bases: run.alice_bases,
            bob_bases: run.bob_bases,
            bob_measurements: run.bob_bits,
            sifted_key_alice: run.sifted.alice,
            sifted_key_bob: run.sifted.bob,
            matching_bases: run.sifted.matching_bases,
            error_count,
        }
    }

    /// Aggregate statistics of this run.
    pub fn stats(&self) -> SessionStats {
        let sifted_key_length = self.sifted_key_alice.len();
        let efficiency = if self.total_rounds == 0 {
            0.0
        } else {
            sifted_key_length as f64 / self.total_rounds as f64
        };
        SessionStats {
            qber: self.qber,
            total_qubits: self.total_rounds,
            sifted_key_length,
            efficiency,
            matching_bases_count: self.matching_bases.iter().filter(|m| **m).count(),
            error_count: self.error_count,
            secure: self.qber < SECURITY_THRESHOLD,
            security_threshold: SECURITY_THRESHOLD,
        }
    }

    /// One round of this run.
    pub fn round(&self, index: usize) -> QkdResult<RoundView> {
        if index >= self.total_rounds {
            return Err(QkdError::RoundOutOfRange { index, total: self.total_rounds });
        }
        Ok(RoundView {
            round_index: index,
            alice_bit: self.alice_bits[index],
            alice_basis: self.alice_bases[index],
            bob_basis: self.bob_bases[index],
            bob_measurement: self.bob_measurements[index],
            bases_match: self.matching_bases[index],
            included_in_key: self.matching_bases[index],
        })
    }
}

/// Aggregate statistics of a session run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionStats {
    pub qber: f64,
    pub total_qubits: usize,
    pub sifted_key_length: usize,
    /// Sifted length over total rounds.
    pub efficiency: f64,
    pub matching_bases_count: usize,
    pub error_count: usize,
    pub secure: bool,
    pub security_threshold: f64,
}

/// A single round of a session run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundView {
    pub round_index: usize,
    pub alice_bit: Bit,
    pub alice_basis: Basis,
    pub bob_basis: Basis,
    pub bob_measurement: Bit,
    pub bases_match: bool,
    pub included_in_key: bool,
}

/// Response to a session run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutcome {
    pub status: &'static str,
    pub parameters: SessionRequest,
    pub summary: SessionStats,
}

/// The run-then-fetch interaction mode.
///
/// Each `run` overwrites the shared [`LatestResults`] slot; later fetches
/// read whatever run was published last.
#[derive(Debug, Clone)]
pub struct Bb84Session {
    store: Arc<LatestResults>,
}

impl Bb84Session {
    pub fn new(store: Arc<LatestResults>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<LatestResults> {
        &self.store
    }

    /// Validates the request, runs the protocol and publishes the raw data.
    pub fn run(&self, request: &SessionRequest) -> QkdResult<SessionOutcome> {
        request.validate()?;
        let mut rng = QkdRng::new(request.seed);
        let run = run_protocol(&SESSION_PIPELINE, request.n_qubits, request.noise_level, 0.0, &mut rng)?;
        let published = self.store.publish(SessionRun::from_protocol(run, request.noise_level));
        let stats = published.stats();
        info!(
            rounds = stats.total_qubits,
            sifted = stats.sifted_key_length,
            qber = stats.qber,
            seed = published.seed,
            "session run published"
        );
        Ok(SessionOutcome { status: "success", parameters: *request, summary: stats })
    }

    /// Raw data of the latest run.
    pub fn results(&self) -> QkdResult<Arc<SessionRun>> {
        self.store.latest().ok_or(QkdError::NoResults)
    }

    /// Statistics of the latest run.
    pub fn stats(&self) -> QkdResult<SessionStats> {
        Ok(self.results()?.stats())
    }

    /// One round of the latest run.
    pub fn round(&self, index: usize) -> QkdResult<RoundView> {
        self.results()?.round(index)
    }
}
