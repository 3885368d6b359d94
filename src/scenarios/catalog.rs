// src/scenarios/catalog.rs
use super::Scenario;
use serde::Serialize;

/// Default and bounds of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec<T> {
    pub default: T,
    pub min: T,
    pub max: T,
}

impl<T> ParameterSpec<T> {
    const fn new(default: T, min: T, max: T) -> Self {
        Self { default, min, max }
    }
}

/// Parameters a scenario accepts. Fixed parameters have `min == max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioParameters {
    pub qubit_count: ParameterSpec<usize>,
    pub error_rate: ParameterSpec<f64>,
    pub eve_fraction: ParameterSpec<f64>,
}

/// Catalog entry describing a selectable scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioInfo {
    pub id: Scenario,
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: ScenarioParameters,
}

impl ScenarioInfo {
    /// Catalog entry for `scenario`.
    pub fn for_scenario(scenario: Scenario) -> Self {
        const QUBITS: ParameterSpec<usize> = ParameterSpec::new(100, 10, 1000);
        const FIXED_ZERO: ParameterSpec<f64> = ParameterSpec::new(0.0, 0.0, 0.0);

        let (name, description, error_rate, eve_fraction) = match scenario {
            Scenario::Ideal => (
                "Ideal Conditions",
                "Perfect BB84 protocol with no errors or eavesdropping",
                FIXED_ZERO,
                FIXED_ZERO,
            ),
            Scenario::ErrorOnly => (
                "Channel with Random Error",
                "BB84 protocol with channel noise but no eavesdropping",
                ParameterSpec::new(0.1, 0.0, 0.5),
                FIXED_ZERO,
            ),
            Scenario::ErrorWithEve => (
                "Error with Eavesdropping",
                "BB84 protocol with channel noise and Eve's intercept-resend attack",
                ParameterSpec::new(0.05, 0.0, 0.5),
                ParameterSpec::new(0.5, 0.0, 1.0),
            ),
            Scenario::DecoherenceFree => (
                "Decoherence-Free Space",
                "Theoretical scenario where quantum coherence is preserved even with eavesdropping",
                FIXED_ZERO,
                ParameterSpec::new(0.5, 0.0, 1.0),
            ),
            Scenario::Detailed => (
                "Detailed Walkthrough",
                "Step-by-step BB84 run showing every qubit, with random outcomes on basis mismatch",
                ParameterSpec::new(0.0, 0.0, 0.5),
                ParameterSpec::new(0.0, 0.0, 1.0),
            ),
        };
        let qubit_count = match scenario {
            Scenario::Detailed => ParameterSpec::new(10, 1, 1000),
            _ => QUBITS,
        };

        Self {
            id: scenario,
            name,
            description,
            parameters: ScenarioParameters { qubit_count, error_rate, eve_fraction },
        }
    }
}

/// Static listing of the selectable scenarios.
pub fn scenario_catalog() -> Vec<ScenarioInfo> {
    Scenario::SELECTABLE.iter().copied().map(ScenarioInfo::for_scenario).collect()
}
