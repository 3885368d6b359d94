// src/scenarios/mod.rs

//! The scenarios a caller can simulate.
//!
//! Scenarios share one pipeline and differ only in which stages run and in
//! what Bob records when his basis disagrees with Alice's:
//!
//! | Scenario | Eve | Noise | Bob's bit on basis mismatch |
//! |---|---|---|---|
//! | Ideal | no | no | transmitted bit |
//! | Error-Only | no | yes | (possibly flipped) transmitted bit |
//! | Error-with-Eve | yes | yes, after Eve | post-Eve, post-noise bit |
//! | Decoherence-Free | yes | no | post-Eve bit |
//! | Detailed | yes | yes | fresh random bit |
//!
//! Only the detailed view randomizes Bob's wrong-basis outcome. Mismatched
//! positions are discarded before the key and QBER are computed, so this only
//! shows up in diagnostics that inspect raw bit agreement.

mod catalog;

pub use catalog::{ParameterSpec, ScenarioInfo, ScenarioParameters, scenario_catalog};

use crate::core::constants::qkd_constants::{EAVESDROP_DETECTION_MARGIN, GOOD_CHANNEL_QBER};
use crate::core::{INTERCEPT_DISTURBANCE, QkdError, QkdResult, SECURITY_THRESHOLD};
use crate::simulation::engine::{PipelineConfig, ProtocolRun};
use crate::simulation::{SimulationParams, Summary};
use crate::validation::{
    SCENARIO_ERROR_RATE_MAX, SCENARIO_QUBIT_RANGE, SESSION_QUBIT_RANGE, check_probability, check_qubit_count,
    check_range,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A BB84 scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// No noise, no eavesdropping.
    #[serde(rename = "ideal")]
    Ideal,
    /// Channel noise only.
    #[serde(rename = "error-only")]
    ErrorOnly,
    /// Intercept-resend attack followed by channel noise.
    #[serde(rename = "error-eve")]
    ErrorWithEve,
    /// Intercept-resend attack with environmental noise suppressed.
    #[serde(rename = "decoherence-free")]
    DecoherenceFree,
    /// Step-by-step breakdown with physically random wrong-basis outcomes.
    #[serde(rename = "detailed")]
    Detailed,
}

impl Scenario {
    /// Scenarios listed in the catalog.
    pub const SELECTABLE: [Scenario; 4] =
        [Scenario::Ideal, Scenario::ErrorOnly, Scenario::ErrorWithEve, Scenario::DecoherenceFree];

    /// Stable identifier used on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            Scenario::Ideal => "ideal",
            Scenario::ErrorOnly => "error-only",
            Scenario::ErrorWithEve => "error-eve",
            Scenario::DecoherenceFree => "decoherence-free",
            Scenario::Detailed => "detailed",
        }
    }

    /// Pipeline switches for this scenario.
    pub fn pipeline(&self) -> PipelineConfig {
        let (apply_eve, apply_noise, randomize_on_mismatch) = match self {
            Scenario::Ideal => (false, false, false),
            Scenario::ErrorOnly => (false, true, false),
            Scenario::ErrorWithEve => (true, true, false),
            Scenario::DecoherenceFree => (true, false, false),
            Scenario::Detailed => (true, true, true),
        };
        PipelineConfig { apply_eve, apply_noise, randomize_on_mismatch }
    }

    /// Accepted qubit counts.
    pub fn qubit_range(&self) -> RangeInclusive<usize> {
        match self {
            Scenario::Detailed => SESSION_QUBIT_RANGE,
            _ => SCENARIO_QUBIT_RANGE,
        }
    }

    /// The error rate the scenario actually applies.
    pub fn effective_error_rate(&self, error_rate: f64) -> f64 {
        if self.pipeline().apply_noise { error_rate } else { 0.0 }
    }

    /// The eve fraction the scenario actually applies.
    pub fn effective_eve_fraction(&self, eve_fraction: f64) -> f64 {
        if self.pipeline().apply_eve { eve_fraction } else { 0.0 }
    }

    /// Error rate echoed back in a result. Ideal reports a fixed 0; every
    /// other scenario echoes the input, including Decoherence-Free, which
    /// accepts a rate but never applies it.
    pub fn reported_error_rate(&self, error_rate: f64) -> f64 {
        match self {
            Scenario::Ideal => 0.0,
            _ => error_rate,
        }
    }

    /// Eve fraction echoed back in a result. Scenarios without Eve report 0.
    pub fn reported_eve_fraction(&self, eve_fraction: f64) -> f64 {
        self.effective_eve_fraction(eve_fraction)
    }

    /// Theoretical QBER: channel error rate plus a quarter of the intercepted fraction,
    /// counting only the stages this scenario runs.
    pub fn expected_qber(&self, error_rate: f64, eve_fraction: f64) -> f64 {
        self.effective_error_rate(error_rate) + INTERCEPT_DISTURBANCE * self.effective_eve_fraction(eve_fraction)
    }

    /// Rejects out-of-range parameters. Parameters the scenario does not use
    /// are ignored rather than checked.
    pub fn validate(&self, params: &SimulationParams) -> QkdResult<()> {
        check_qubit_count("qubit_count", params.qubit_count, &self.qubit_range())?;
        let pipeline = self.pipeline();
        if pipeline.apply_noise {
            check_range("error_rate", params.error_rate, 0.0, SCENARIO_ERROR_RATE_MAX)?;
        }
        if pipeline.apply_eve {
            check_probability("eve_fraction", params.eve_fraction)?;
        }
        Ok(())
    }

    /// Builds the diagnostic summary for a finished run.
    pub(crate) fn summarize(&self, run: &ProtocolRun, error_rate: f64, eve_fraction: f64) -> Summary {
        let qber = run.qber;
        let secure = qber < SECURITY_THRESHOLD;
        let expected_qber = self.expected_qber(error_rate, eve_fraction);
        let error_rate = self.effective_error_rate(error_rate);
        let eve_fraction = self.effective_eve_fraction(eve_fraction);
        // Eve shows up as QBER in excess of what the channel explains.
        let eve_detected = qber > error_rate + EAVESDROP_DETECTION_MARGIN;

        let mut summary = Summary::new();
        summary.insert("total_qubits".into(), json!(run.qubit_count()));
        summary.insert("matching_bases".into(), json!(run.matching_count()));
        summary.insert("sifted_key_length".into(), json!(run.sifted.len()));
        summary.insert("expected_qber".into(), json!(expected_qber));
        summary.insert("actual_qber".into(), json!(qber));
        summary.insert("secure".into(), json!(secure));
        summary.insert("security_threshold".into(), json!(SECURITY_THRESHOLD));

        let (protocol_status, security_level) = match self {
            Scenario::Ideal => (
                if qber == 0.0 { "Perfect - No errors detected" } else { "Unexpected errors detected" },
                "Maximum (No eavesdropping)",
            ),
            Scenario::ErrorOnly => {
                summary.insert("channel_error_rate".into(), json!(error_rate));
                (
                    if qber > GOOD_CHANNEL_QBER { "Channel noise present" } else { "Good quality channel" },
                    if secure { "Secure (No eavesdropping)" } else { "Insecure (Channel noise above threshold)" },
                )
            }
            Scenario::ErrorWithEve => {
                summary.insert("channel_error_rate".into(), json!(error_rate));
                summary.insert("eve_fraction".into(), json!(eve_fraction));
                summary.insert("eve_detected".into(), json!(eve_detected));
                (
                    if eve_detected { "Eavesdropping detected" } else { "Eavesdropping may be present" },
                    if secure { "Potentially secure" } else { "Compromised" },
                )
            }
            Scenario::DecoherenceFree => {
                summary.insert("decoherence_factor".into(), json!(0.0));
                summary.insert("eve_fraction".into(), json!(eve_fraction));
                summary.insert("eve_detected".into(), json!(eve_detected));
                summary.insert("quantum_coherence".into(), json!("Preserved from environmental noise"));
                (
                    "Environmental decoherence eliminated, but Eve detection possible",
                    if eve_fraction > 0.0 {
                        "Protected from noise, vulnerable to eavesdropping"
                    } else {
                        "Maximum security (no eavesdropping)"
                    },
                )
            }
            Scenario::Detailed => {
                let total = run.qubit_count();
                summary.insert("non_matching_bases".into(), json!(total - run.matching_count()));
                summary.insert("correct_when_bases_match".into(), json!(run.correct_when_bases_match()));
                summary.insert("correct_when_bases_dont_match".into(), json!(run.correct_when_bases_dont_match()));
                summary.insert("eve_interceptions".into(), json!(run.intercept_count()));
                summary.insert("eve_caused_errors".into(), json!(run.eve_error_count()));
                summary.insert("channel_errors".into(), json!(run.channel_error_count()));
                summary.insert("eve_detected".into(), json!(eve_detected));
                summary.insert("qber".into(), json!(qber));
                (
                    if eve_detected { "Eavesdropping detected" } else { "No excess errors" },
                    if secure { "Secure" } else { "Compromised" },
                )
            }
        };
        summary.insert("protocol_status".into(), json!(protocol_status));
        summary.insert("security_level".into(), json!(security_level));
        summary
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Scenario {
    type Err = QkdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ideal" => Ok(Scenario::Ideal),
            "error-only" => Ok(Scenario::ErrorOnly),
            "error-eve" => Ok(Scenario::ErrorWithEve),
            "decoherence-free" => Ok(Scenario::DecoherenceFree),
            "detailed" => Ok(Scenario::Detailed),
            other => Err(QkdError::UnknownScenario { id: other.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for scenario in Scenario::SELECTABLE.iter().chain([Scenario::Detailed].iter()) {
            assert_eq!(scenario.id().parse::<Scenario>(), Ok(*scenario));
            assert_eq!(serde_json::to_string(scenario).unwrap(), format!("\"{}\"", scenario.id()));
        }
        assert_eq!(
            "quantum".parse::<Scenario>(),
            Err(QkdError::UnknownScenario { id: "quantum".to_string() })
        );
    }

    #[test]
    fn test_pipeline_switches() {
        assert_eq!(
            Scenario::DecoherenceFree.pipeline(),
            PipelineConfig { apply_eve: true, apply_noise: false, randomize_on_mismatch: false }
        );
        assert!(Scenario::Detailed.pipeline().randomize_on_mismatch);
        assert!(!Scenario::Ideal.pipeline().apply_eve);
    }

    #[test]
    fn test_expected_qber_per_scenario() {
        assert_eq!(Scenario::Ideal.expected_qber(0.3, 0.8), 0.0);
        assert_eq!(Scenario::ErrorOnly.expected_qber(0.1, 0.8), 0.1);
        assert_eq!(Scenario::ErrorWithEve.expected_qber(0.0, 1.0), 0.25);
        assert!((Scenario::ErrorWithEve.expected_qber(0.05, 0.5) - 0.175).abs() < 1e-12);
        assert_eq!(Scenario::DecoherenceFree.expected_qber(0.3, 0.5), 0.125);
    }

    #[test]
    fn test_reported_parameters_per_scenario() {
        assert_eq!(Scenario::Ideal.reported_error_rate(0.3), 0.0);
        assert_eq!(Scenario::Ideal.reported_eve_fraction(0.3), 0.0);
        assert_eq!(Scenario::ErrorOnly.reported_error_rate(0.2), 0.2);
        assert_eq!(Scenario::ErrorOnly.reported_eve_fraction(0.7), 0.0);
        assert_eq!(Scenario::DecoherenceFree.reported_error_rate(0.3), 0.3);
        assert_eq!(Scenario::DecoherenceFree.reported_eve_fraction(0.5), 0.5);
        assert_eq!(Scenario::Detailed.reported_error_rate(0.1), 0.1);
    }

    #[test]
    fn test_expected_qber_monotonic_in_eve_fraction() {
        let mut previous = f64::NEG_INFINITY;
        for step in 0..=100 {
            let expected = Scenario::ErrorWithEve.expected_qber(0.05, step as f64 / 100.0);
            assert!(expected >= previous);
            previous = expected;
        }
    }

    #[test]
    fn test_validation_ignores_unused_parameters() {
        let params = SimulationParams { qubit_count: 100, error_rate: 0.9, eve_fraction: 7.0 };
        assert!(Scenario::Ideal.validate(&params).is_ok());
        assert_eq!(Scenario::ErrorOnly.validate(&params).unwrap_err().parameter(), Some("error_rate"));
        assert_eq!(Scenario::DecoherenceFree.validate(&params).unwrap_err().parameter(), Some("eve_fraction"));
    }

    #[test]
    fn test_validation_qubit_ranges() {
        let small = SimulationParams { qubit_count: 5, error_rate: 0.0, eve_fraction: 0.0 };
        assert_eq!(Scenario::Ideal.validate(&small).unwrap_err().parameter(), Some("qubit_count"));
        assert!(Scenario::Detailed.validate(&small).is_ok());
    }
}
