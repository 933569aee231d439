use thiserror::Error;

/// Main error type for the Evoxide system
#[derive(Error, Debug)]
pub enum EvoError {
    #[error("Sampling error: {0}")]
    Sampling(#[from] SamplingError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised by the perturbation-sampling subsystem.
///
/// None of these are transient: each one signals a configuration or
/// protocol mismatch between communicating workers, so they are surfaced
/// to the caller at the offending call and never retried internally.
#[derive(Error, Debug)]
pub enum SamplingError {
    #[error("Unsupported sampling kind: {kind}")]
    UnsupportedKind { kind: String },

    #[error("Invalid sampling configuration: {message}")]
    Config { message: String },

    #[error("Invalid sampling token: {message}")]
    InvalidToken { message: String },
}

impl SamplingError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }
}

/// Result type alias for the Evoxide system
pub type EvoResult<T> = Result<T, EvoError>;

/// Result type alias for sampling operations
pub type SamplingResult<T> = Result<T, SamplingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_error_converts_to_evo_error() {
        let err = SamplingError::UnsupportedKind {
            kind: "sobol".into(),
        };
        let top: EvoError = err.into();
        assert!(matches!(top, EvoError::Sampling(_)));
        assert!(top.to_string().contains("sobol"));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = SamplingError::config("std_dev must be positive, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid sampling configuration: std_dev must be positive, got -1"
        );

        let err = SamplingError::invalid_token("offset 90 + dimension 20 exceeds table size 100");
        assert!(err.to_string().starts_with("Invalid sampling token"));
    }
}
