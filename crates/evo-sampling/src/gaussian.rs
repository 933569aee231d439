use evo_types::{SampleToken, SamplingConfig, SamplingError, SamplingResult};
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use tracing::debug;

/// Direct Gaussian sampling: fresh standard-normal noise on demand.
///
/// Each call draws a fresh 64-bit seed, feeds it to a portable ChaCha8
/// stream, and fills the vector from that stream.  The seed is the token:
/// re-seeding an identical generator redraws the identical sequence, so the
/// output depends only on the seed, never on wall-clock state or on what
/// other threads sampled in between.
pub struct GaussianSampling {
    std_dev: f64,
    /// Source of per-call seeds.  With a fixed config seed the seed stream
    /// itself is reproducible; without one it starts from OS entropy.
    /// Either way a token fully determines its noise vector.
    seed_source: Mutex<ChaCha8Rng>,
}

impl GaussianSampling {
    pub fn new(std_dev: f64, seed: Option<u64>) -> SamplingResult<Self> {
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(SamplingError::config(format!(
                "std_dev must be positive and finite, got {std_dev}"
            )));
        }

        let seed_source = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            std_dev,
            seed_source: Mutex::new(seed_source),
        })
    }

    pub fn from_config(config: &SamplingConfig) -> SamplingResult<Self> {
        config.validate()?;
        Self::new(config.std_dev, config.seed)
    }

    /// Sample with a caller-supplied seed instead of drawing a fresh one.
    pub fn sample_with_seed(
        &self,
        seed: u64,
        dimension: usize,
    ) -> SamplingResult<(Vec<f64>, SampleToken)> {
        let noise = self.draw(seed, dimension);
        Ok((noise, SampleToken::Seed(seed)))
    }

    fn draw(&self, seed: u64, dimension: usize) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..dimension)
            .map(|_| {
                let unit: f64 = rng.sample(StandardNormal);
                unit * self.std_dev
            })
            .collect()
    }
}

impl super::SamplingMethod for GaussianSampling {
    fn sample(&self, dimension: usize) -> SamplingResult<(Vec<f64>, SampleToken)> {
        let seed = self.seed_source.lock().gen::<u64>();
        debug!(seed, dimension, "sampling fresh gaussian noise");
        self.sample_with_seed(seed, dimension)
    }

    fn resample(&self, token: SampleToken, dimension: usize) -> SamplingResult<Vec<f64>> {
        match token {
            SampleToken::Seed(seed) => Ok(self.draw(seed, dimension)),
            other => Err(SamplingError::invalid_token(format!(
                "gaussian sampling expects a seed token, got {}",
                other.kind_name()
            ))),
        }
    }

    fn std_dev(&self) -> f64 {
        self.std_dev
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }
}
