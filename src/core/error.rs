//! Error handling logic

use thiserror::Error;

/// Result alias used throughout the crate.
pub type QkdResult<T> = Result<T, QkdError>;

/// Error types raised by the simulator.
///
/// Every variant describes a caller defect: bad input or a contract
/// violation between parallel sequences. Once inputs are validated the
/// engine itself has no failure modes, so nothing here is retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QkdError {
    /// A numeric parameter is outside its accepted range or is not finite.
    #[error("Invalid parameter `{parameter}` = {value}: {message}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value, widened to f64 for reporting.
        value: f64,
        /// What range was expected.
        message: String,
    },

    /// Parallel sequences handed to a protocol stage disagree in length.
    #[error("Input shape violation in {context}: expected length {expected}, found {found}")]
    InputShape {
        /// Stage that detected the mismatch.
        context: &'static str,
        /// Length of the reference sequence.
        expected: usize,
        /// Length of the first sequence that differed.
        found: usize,
    },

    /// The QBER estimator was given sequences of unequal length.
    #[error("Length mismatch: {left} != {right}")]
    LengthMismatch {
        /// Length of the first sequence.
        left: usize,
        /// Length of the sequence that differed.
        right: usize,
    },

    /// A scenario identifier did not name any known scenario.
    #[error("Unknown scenario '{id}'")]
    UnknownScenario {
        /// The identifier that failed to parse.
        id: String,
    },

    /// Session results were requested before any session run.
    #[error("No simulation results available; run a simulation first")]
    NoResults,

    /// A session round lookup fell outside the stored run.
    #[error("Round index {index} out of range (0..{total})")]
    RoundOutOfRange {
        /// Requested round.
        index: usize,
        /// Number of rounds in the stored run.
        total: usize,
    },

    /// The protocol pipeline was driven out of order.
    #[error("Protocol pipeline error: {message}")]
    Pipeline {
        /// Description of the broken precondition.
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration failure.
        message: String,
    },
}

impl QkdError {
    /// Returns the parameter name for `InvalidParameter`, otherwise `None`.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            QkdError::InvalidParameter { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_offending_parameter() {
        let err = QkdError::InvalidParameter {
            parameter: "error_rate",
            value: 0.7,
            message: "must be within [0, 0.5]".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("error_rate"));
        assert!(text.contains("0.7"));
        assert_eq!(err.parameter(), Some("error_rate"));
    }

    #[test]
    fn test_non_parameter_errors_have_no_parameter() {
        assert_eq!(QkdError::NoResults.parameter(), None);
        assert_eq!(
            QkdError::LengthMismatch { left: 3, right: 4 }.to_string(),
            "Length mismatch: 3 != 4"
        );
    }
}
