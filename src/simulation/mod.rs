// src/simulation/mod.rs

//! Runs BB84 scenarios.
//! This module contains the `Simulator` entry point and the internal
//! `ProtocolEngine` that drives the shared pipeline stage by stage.

mod params;
mod results;
pub(crate) mod engine;

pub use engine::{PipelineConfig, ProtocolRun};
pub use params::SimulationParams;
pub use results::{SimulationResult, Summary, TransmissionRecord};

use crate::config::SimulatorConfig;
use crate::core::constants::qkd_constants::{DETAILED_QUBIT_CAP, KEY_DISPLAY_LIMIT};
use crate::core::{QkdResult, QkdRng};
use crate::operations::truncate_key;
use crate::scenarios::Scenario;
use std::time::Instant;
use tracing::{debug, info};

/// Entry point for scenario simulations.
///
/// A `Simulator` holds no mutable state; each call builds a fresh randomness
/// stream, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    seed: Option<u64>,
    show_all: bool,
}

impl Simulator {
    /// Creates an unseeded simulator that caps the detailed view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator from loaded configuration.
    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self { seed: config.seed, show_all: config.show_all }
    }

    /// Fixes the seed so repeated runs are bit-identical.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Lifts the qubit cap of the detailed scenario.
    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates `params` and runs the scenario's pipeline, returning the raw run.
    ///
    /// # Returns
    /// * `Ok(ProtocolRun)` with every per-position sequence.
    /// * `Err(QkdError::InvalidParameter)` before any randomness is drawn if a
    ///   parameter the scenario uses is out of range.
    pub fn execute(&self, scenario: Scenario, params: &SimulationParams) -> QkdResult<ProtocolRun> {
        scenario.validate(params)?;

        let qubit_count = match scenario {
            Scenario::Detailed if !self.show_all => params.qubit_count.min(DETAILED_QUBIT_CAP),
            _ => params.qubit_count,
        };
        let mut rng = QkdRng::new(self.seed);
        debug!(%scenario, qubit_count, seed = rng.seed(), seeded = rng.is_seeded(), "starting protocol run");

        engine::run_protocol(
            &scenario.pipeline(),
            qubit_count,
            scenario.effective_error_rate(params.error_rate),
            scenario.effective_eve_fraction(params.eve_fraction),
            &mut rng,
        )
    }

    /// Runs a scenario and packages the outcome for transport.
    pub fn run(&self, scenario: Scenario, params: &SimulationParams) -> QkdResult<SimulationResult> {
        let start = Instant::now();
        let run = self.execute(scenario, params)?;

        let summary = scenario.summarize(&run, params.error_rate, params.eve_fraction);
        let qubits = (scenario == Scenario::Detailed).then(|| run.records());
        let result = SimulationResult {
            scenario,
            qubit_count: run.qubit_count(),
            sifted_key: truncate_key(&run.sifted.key, KEY_DISPLAY_LIMIT),
            sifted_key_length: run.sifted.len(),
            qber: run.qber,
            error_rate: scenario.reported_error_rate(params.error_rate),
            eve_fraction: scenario.reported_eve_fraction(params.eve_fraction),
            summary,
            execution_time: start.elapsed().as_secs_f64(),
            qubits,
        };

        info!(
            %scenario,
            qubits = result.qubit_count,
            sifted = result.sifted_key_length,
            qber = result.qber,
            seed = run.seed,
            "simulation complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QkdError;

    fn params(qubit_count: usize, error_rate: f64, eve_fraction: f64) -> SimulationParams {
        SimulationParams::new(qubit_count, error_rate, eve_fraction)
    }

    #[test]
    fn test_seeded_runs_are_identical() -> Result<(), QkdError> {
        let simulator = Simulator::new().with_seed(42);
        for scenario in [
            Scenario::Ideal,
            Scenario::ErrorOnly,
            Scenario::ErrorWithEve,
            Scenario::DecoherenceFree,
            Scenario::Detailed,
        ] {
            let a = simulator.execute(scenario, &params(200, 0.1, 0.5))?;
            let b = simulator.execute(scenario, &params(200, 0.1, 0.5))?;
            assert_eq!(a, b, "scenario {} is not deterministic", scenario);
        }
        Ok(())
    }

    #[test]
    fn test_shared_draw_order_across_scenarios() -> Result<(), QkdError> {
        // Alice draws first, so every scenario sees the same bits and bases for one seed.
        let simulator = Simulator::new().with_seed(7);
        let ideal = simulator.execute(Scenario::Ideal, &params(50, 0.0, 0.0))?;
        let eve = simulator.execute(Scenario::ErrorWithEve, &params(50, 0.1, 0.5))?;
        assert_eq!(ideal.alice_bits, eve.alice_bits);
        assert_eq!(ideal.alice_bases, eve.alice_bases);
        // Ideal and Error-Only draw nothing between Alice and Bob's bases.
        let noisy = simulator.execute(Scenario::ErrorOnly, &params(50, 0.2, 0.0))?;
        assert_eq!(ideal.bob_bases, noisy.bob_bases);
        Ok(())
    }

    #[test]
    fn test_decoherence_free_suppresses_noise() -> Result<(), QkdError> {
        let run = Simulator::new()
            .with_seed(3)
            .execute(Scenario::DecoherenceFree, &params(300, 0.0, 0.0))?;
        assert!(run.channel_errors.iter().all(|e| !e));
        assert_eq!(run.qber, 0.0);
        Ok(())
    }

    #[test]
    fn test_detailed_cap_and_override() -> Result<(), QkdError> {
        let capped = Simulator::new().with_seed(1).run(Scenario::Detailed, &params(500, 0.0, 0.0))?;
        assert_eq!(capped.qubit_count, DETAILED_QUBIT_CAP);
        assert_eq!(capped.qubits.as_ref().map(Vec::len), Some(DETAILED_QUBIT_CAP));

        let full = Simulator::new()
            .with_seed(1)
            .with_show_all(true)
            .run(Scenario::Detailed, &params(500, 0.0, 0.0))?;
        assert_eq!(full.qubit_count, 500);
        Ok(())
    }

    #[test]
    fn test_invalid_input_is_rejected_before_running() {
        let err = Simulator::new().run(Scenario::ErrorOnly, &params(100, 0.6, 0.0)).unwrap_err();
        assert_eq!(err.parameter(), Some("error_rate"));
        let err = Simulator::new().run(Scenario::ErrorWithEve, &params(100, 0.1, f64::NAN)).unwrap_err();
        assert_eq!(err.parameter(), Some("eve_fraction"));
    }

    #[test]
    fn test_result_reported_parameters() -> Result<(), QkdError> {
        let result = Simulator::new().with_seed(2).run(Scenario::Ideal, &params(100, 0.3, 0.9))?;
        assert_eq!(result.error_rate, 0.0);
        assert_eq!(result.eve_fraction, 0.0);
        assert!(result.qubits.is_none());

        // Decoherence-Free echoes the input rate even though no noise is applied.
        let result = Simulator::new().with_seed(1).run(Scenario::DecoherenceFree, &params(100, 0.3, 0.5))?;
        assert_eq!(result.error_rate, 0.3);
        assert_eq!(result.eve_fraction, 0.5);
        assert_eq!(result.summary_f64("decoherence_factor"), Some(0.0));
        Ok(())
    }
}
