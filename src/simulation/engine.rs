// src/simulation/engine.rs
use crate::core::{Basis, Bit, QkdError, QkdResult, QkdRng};
use crate::operations::{
    Interception, SiftedKey, Stage, channel_flip_mask, count_errors, count_matches, estimate_qber,
    flip_where, intercept_resend, sift_key,
};
use crate::simulation::results::TransmissionRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Switches that select which stages of the shared pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Run the intercept-resend attack before the channel.
    pub apply_eve: bool,
    /// Flip bits in the channel after Eve.
    pub apply_noise: bool,
    /// On basis mismatch Bob records a fresh random bit instead of the transmitted one.
    pub randomize_on_mismatch: bool,
}

impl PipelineConfig {
    /// Ordered stages implied by the switches. The order fixes the draw order.
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = vec![Stage::Prepare];
        if self.apply_eve {
            stages.push(Stage::Eavesdrop);
        }
        stages.push(Stage::ChooseBases);
        if self.apply_noise {
            stages.push(Stage::ChannelNoise);
        }
        stages.extend([Stage::Measure, Stage::Sift, Stage::EstimateQber]);
        stages
    }
}

/// Raw data of one protocol run. Every vector has `qubit_count` entries
/// except the sifted key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolRun {
    /// Seed of the stream that produced this run.
    pub seed: u64,
    pub alice_bits: Vec<Bit>,
    pub alice_bases: Vec<Basis>,
    /// Present only when Eve was modelled.
    pub interception: Option<Interception>,
    pub bob_bases: Vec<Basis>,
    /// Positions flipped by channel noise; all `false` when noise is off.
    pub channel_errors: Vec<bool>,
    /// Bits arriving at Bob after Eve and the channel.
    pub transmitted: Vec<Bit>,
    pub bob_bits: Vec<Bit>,
    pub sifted: SiftedKey,
    pub qber: f64,
}

impl ProtocolRun {
    pub fn qubit_count(&self) -> usize {
        self.alice_bits.len()
    }

    /// Positions where the bases agreed.
    pub fn matching_count(&self) -> usize {
        count_matches(&self.sifted.matching_bases)
    }

    /// Diagnostic `alice_bit == bob_bit` over every position, sifted or not.
    pub fn bit_matches(&self) -> Vec<bool> {
        self.alice_bits.iter().zip(&self.bob_bits).map(|(a, b)| a == b).collect()
    }

    /// Agreeing bits among matching-basis positions.
    pub fn correct_when_bases_match(&self) -> usize {
        self.count_agreeing(true)
    }

    /// Agreeing bits among mismatched-basis positions.
    pub fn correct_when_bases_dont_match(&self) -> usize {
        self.count_agreeing(false)
    }

    fn count_agreeing(&self, bases_match: bool) -> usize {
        self.bit_matches()
            .iter()
            .zip(&self.sifted.matching_bases)
            .filter(|(bit_match, matched)| **matched == bases_match && **bit_match)
            .count()
    }

    /// Disagreeing bits in the sifted key.
    pub fn error_count(&self) -> usize {
        count_errors(&self.sifted.alice, &self.sifted.bob)
    }

    pub fn intercept_count(&self) -> usize {
        self.interception.as_ref().map_or(0, Interception::intercept_count)
    }

    pub fn eve_error_count(&self) -> usize {
        self.interception.as_ref().map_or(0, Interception::disturbance_count)
    }

    pub fn channel_error_count(&self) -> usize {
        count_matches(&self.channel_errors)
    }

    /// Per-position breakdown of the run.
    pub fn records(&self) -> Vec<TransmissionRecord> {
        (0..self.qubit_count())
            .map(|i| {
                let eve = self.interception.as_ref().filter(|eve| eve.intercepted[i]);
                TransmissionRecord {
                    index: i,
                    alice_bit: self.alice_bits[i],
                    alice_basis: self.alice_bases[i],
                    alice_state: self.alice_bases[i].state_label(self.alice_bits[i]).to_string(),
                    eve_intercepted: eve.is_some(),
                    eve_basis: eve.map(|eve| eve.eve_bases[i]),
                    eve_bit: eve.map(|eve| eve.eve_bits[i]),
                    eve_caused_error: eve.is_some_and(|eve| eve.disturbed[i]),
                    channel_error: self.channel_errors[i],
                    bob_basis: self.bob_bases[i],
                    bob_bit: self.bob_bits[i],
                    bases_match: self.sifted.matching_bases[i],
                    bit_match: self.alice_bits[i] == self.bob_bits[i],
                    kept_in_key: self.sifted.matching_bases[i],
                }
            })
            .collect()
    }
}

/// Drives the stages of one run against a shared randomness stream.
/// (Internal visibility)
pub(crate) struct ProtocolEngine<'r> {
    rng: &'r mut QkdRng,
    qubit_count: usize,
    error_rate: f64,
    eve_fraction: f64,
    randomize_on_mismatch: bool,
    alice_bits: Vec<Bit>,
    alice_bases: Vec<Basis>,
    interception: Option<Interception>,
    bob_bases: Vec<Basis>,
    channel_errors: Vec<bool>,
    in_flight: Vec<Bit>,
    bob_bits: Vec<Bit>,
    sifted: Option<SiftedKey>,
    qber: Option<f64>,
}

impl<'r> ProtocolEngine<'r> {
    /// Prepares an engine. Parameters must already be validated.
    pub(crate) fn init(
        config: &PipelineConfig,
        qubit_count: usize,
        error_rate: f64,
        eve_fraction: f64,
        rng: &'r mut QkdRng,
    ) -> Self {
        Self {
            rng,
            qubit_count,
            error_rate,
            eve_fraction,
            randomize_on_mismatch: config.randomize_on_mismatch,
            alice_bits: Vec::new(),
            alice_bases: Vec::new(),
            interception: None,
            bob_bases: Vec::new(),
            channel_errors: vec![false; qubit_count],
            in_flight: Vec::new(),
            bob_bits: Vec::new(),
            sifted: None,
            qber: None,
        }
    }

    /// Applies a single stage.
    pub(crate) fn apply_stage(&mut self, stage: Stage) -> QkdResult<()> {
        match stage {
            Stage::Prepare => {
                self.alice_bits = self.rng.bits(self.qubit_count);
                self.alice_bases = self.rng.bases(self.qubit_count);
                self.in_flight = self.alice_bits.clone();
            }
            Stage::Eavesdrop => {
                self.require_prepared(stage)?;
                let eve = intercept_resend(&self.alice_bits, &self.alice_bases, self.eve_fraction, self.rng)?;
                debug!(
                    intercepted = eve.intercept_count(),
                    disturbed = eve.disturbance_count(),
                    "eavesdropper stage"
                );
                self.in_flight = eve.eve_bits.clone();
                self.interception = Some(eve);
            }
            Stage::ChooseBases => {
                self.bob_bases = self.rng.bases(self.qubit_count);
            }
            Stage::ChannelNoise => {
                self.require_prepared(stage)?;
                self.channel_errors = channel_flip_mask(self.qubit_count, self.error_rate, self.rng)?;
                self.in_flight = flip_where(&self.in_flight, &self.channel_errors);
                debug!(flipped = count_matches(&self.channel_errors), "channel noise stage");
            }
            Stage::Measure => {
                self.require_prepared(stage)?;
                if self.bob_bases.len() != self.qubit_count {
                    return Err(QkdError::Pipeline { message: "Bob measured before choosing bases".to_string() });
                }
                let mut bob_bits = Vec::with_capacity(self.qubit_count);
                for i in 0..self.qubit_count {
                    let matched = self.alice_bases[i] == self.bob_bases[i];
                    // A wrong-basis measurement has a uniformly random outcome.
                    let bit = if matched || !self.randomize_on_mismatch { self.in_flight[i] } else { self.rng.bit() };
                    bob_bits.push(bit);
                }
                self.bob_bits = bob_bits;
            }
            Stage::Sift => {
                let sifted = sift_key(&self.alice_bits, &self.bob_bits, &self.alice_bases, &self.bob_bases)?;
                debug!(sifted = sifted.len(), total = self.qubit_count, "sifting stage");
                self.sifted = Some(sifted);
            }
            Stage::EstimateQber => {
                let sifted = self.sifted.as_ref().ok_or_else(|| QkdError::Pipeline {
                    message: "QBER estimated before sifting".to_string(),
                })?;
                self.qber = Some(estimate_qber(&self.alice_bits, &self.bob_bits, &sifted.matching_bases)?);
            }
        }
        Ok(())
    }

    fn require_prepared(&self, stage: Stage) -> QkdResult<()> {
        if self.alice_bits.len() != self.qubit_count || self.alice_bases.len() != self.qubit_count {
            return Err(QkdError::Pipeline { message: format!("{:?} stage ran before Alice prepared", stage) });
        }
        Ok(())
    }

    /// Consumes the engine into the finished run.
    pub(crate) fn finish(self) -> QkdResult<ProtocolRun> {
        let (sifted, qber) = match (self.sifted, self.qber) {
            (Some(sifted), Some(qber)) => (sifted, qber),
            _ => {
                return Err(QkdError::Pipeline { message: "run finished before sifting and QBER estimation".to_string() });
            }
        };
        Ok(ProtocolRun {
            seed: self.rng.seed(),
            alice_bits: self.alice_bits,
            alice_bases: self.alice_bases,
            interception: self.interception,
            bob_bases: self.bob_bases,
            channel_errors: self.channel_errors,
            transmitted: self.in_flight,
            bob_bits: self.bob_bits,
            sifted,
            qber,
        })
    }
}

/// Runs every stage selected by `config`, in order.
pub(crate) fn run_protocol(
    config: &PipelineConfig,
    qubit_count: usize,
    error_rate: f64,
    eve_fraction: f64,
    rng: &mut QkdRng,
) -> QkdResult<ProtocolRun> {
    let mut engine = ProtocolEngine::init(config, qubit_count, error_rate, eve_fraction, rng);
    for stage in config.stages() {
        engine.apply_stage(stage)?;
    }
    engine.finish()
}
