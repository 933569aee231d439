use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{SamplingError, SamplingResult};

/// The closed set of noise-sampling strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingKind {
    /// Fresh standard-normal draws per call; token = generator seed.
    Gaussian,
    /// Slices of a pre-generated shared noise table; token = (offset, sign).
    CachedGaussian,
}

impl fmt::Display for SamplingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gaussian => write!(f, "gaussian"),
            Self::CachedGaussian => write!(f, "cached_gaussian"),
        }
    }
}

impl FromStr for SamplingKind {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gaussian" => Ok(Self::Gaussian),
            "cached_gaussian" => Ok(Self::CachedGaussian),
            other => Err(SamplingError::UnsupportedKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Configuration for the perturbation-sampling subsystem.
///
/// This is a slice of the surrounding optimizer's serialized config record;
/// unrelated fields of that record are not read here.  The strategy kind
/// arrives as a string ("gaussian" or "cached_gaussian") and is parsed into
/// [`SamplingKind`] when a strategy is constructed, so an unrecognized kind
/// surfaces as a typed error instead of failing deserialization of the whole
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Which sampling strategy to use: "gaussian" or "cached_gaussian".
    pub kind: String,

    /// Standard deviation applied to the unit-variance noise.
    pub std_dev: f64,

    /// Length of the shared noise table (cached variant only).
    #[serde(default = "default_cache_table_size")]
    pub cache_table_size: usize,

    /// Fixed seed. Required for the cached variant, where every process
    /// must generate a byte-identical table; optional for plain Gaussian,
    /// which falls back to OS entropy for its per-call seed stream.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Dimensionality of the parameter vector the optimizer perturbs, when
    /// known at startup.  Lets the cached constructor reject an undersized
    /// table before any sampling occurs.
    #[serde(default)]
    pub param_dim: Option<usize>,
}

fn default_cache_table_size() -> usize {
    10_000_000
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            kind: SamplingKind::Gaussian.to_string(),
            std_dev: 1.0,
            cache_table_size: default_cache_table_size(),
            seed: None,
            param_dim: None,
        }
    }
}

impl SamplingConfig {
    pub fn new(kind: SamplingKind) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: SamplingKind) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn with_std_dev(mut self, std_dev: f64) -> Self {
        self.std_dev = std_dev;
        self
    }

    pub fn with_cache_table_size(mut self, size: usize) -> Self {
        self.cache_table_size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_param_dim(mut self, dim: usize) -> Self {
        self.param_dim = Some(dim);
        self
    }

    /// Parse the serialized kind field.
    pub fn sampling_kind(&self) -> SamplingResult<SamplingKind> {
        self.kind.parse()
    }

    /// Check the parameters a strategy constructor will rely on.
    ///
    /// Plain Gaussian only needs a positive finite standard deviation.  The
    /// cached variant additionally needs a non-empty table, a fixed seed,
    /// and a table at least as long as the declared parameter
    /// dimensionality.
    pub fn validate(&self) -> SamplingResult<()> {
        let kind = self.sampling_kind()?;

        if !self.std_dev.is_finite() || self.std_dev <= 0.0 {
            return Err(SamplingError::config(format!(
                "std_dev must be positive and finite, got {}",
                self.std_dev
            )));
        }

        if kind == SamplingKind::CachedGaussian {
            if self.cache_table_size == 0 {
                return Err(SamplingError::config("cache_table_size must be non-zero"));
            }
            if self.seed.is_none() {
                return Err(SamplingError::config(
                    "cached_gaussian requires a fixed seed so all processes \
                     generate an identical noise table",
                ));
            }
            if let Some(dim) = self.param_dim {
                if self.cache_table_size < dim {
                    return Err(SamplingError::config(format!(
                        "cache_table_size {} is smaller than param_dim {}",
                        self.cache_table_size, dim
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_display_and_parse() {
        for kind in [SamplingKind::Gaussian, SamplingKind::CachedGaussian] {
            let parsed: SamplingKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        let err = "halton".parse::<SamplingKind>().unwrap_err();
        assert!(matches!(
            err,
            SamplingError::UnsupportedKind { kind } if kind == "halton"
        ));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SamplingConfig::default().validate().is_ok());
    }

    #[test]
    fn non_positive_std_dev_rejected() {
        for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = SamplingConfig::default().with_std_dev(bad);
            assert!(matches!(
                config.validate(),
                Err(SamplingError::Config { .. })
            ));
        }
    }

    #[test]
    fn cached_requires_seed() {
        let config = SamplingConfig::new(SamplingKind::CachedGaussian).with_cache_table_size(1000);
        assert!(matches!(
            config.validate(),
            Err(SamplingError::Config { .. })
        ));

        let config = config.with_seed(42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn cached_table_must_cover_param_dim() {
        let config = SamplingConfig::new(SamplingKind::CachedGaussian)
            .with_seed(7)
            .with_cache_table_size(100)
            .with_param_dim(101);
        assert!(matches!(
            config.validate(),
            Err(SamplingError::Config { .. })
        ));

        let config = config.with_cache_table_size(101);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_from_a_larger_record() {
        // The surrounding optimizer owns the schema; extra fields and
        // missing optional fields must both be tolerated.
        let json = r#"{
            "kind": "cached_gaussian",
            "std_dev": 0.02,
            "cache_table_size": 5000,
            "seed": 42,
            "learning_rate": 0.01,
            "population_size": 256
        }"#;
        let config: SamplingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.sampling_kind().unwrap(), SamplingKind::CachedGaussian);
        assert_eq!(config.cache_table_size, 5000);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.param_dim, None);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SamplingConfig::new(SamplingKind::CachedGaussian)
            .with_std_dev(0.5)
            .with_cache_table_size(2048)
            .with_seed(9)
            .with_param_dim(128);
        let json = serde_json::to_string(&config).unwrap();
        let back: SamplingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
