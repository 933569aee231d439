use evo_types::{SampleToken, SamplingResult};

/// Common contract for all noise-sampling strategies.
///
/// Instances are created once at startup and shared read-mostly across all
/// worker threads for the lifetime of the optimization run, so every method
/// takes `&self`.  Internal mutable state (per-process seed or offset
/// sources) never affects the reproducibility of an issued token: the token
/// alone determines the noise vector.
pub trait SamplingMethod: Send + Sync {
    /// Produce noise of the requested length, scaled by the configured
    /// standard deviation, along with a token sufficient to reproduce it.
    fn sample(&self, dimension: usize) -> SamplingResult<(Vec<f64>, SampleToken)>;

    /// Reconstruct the exact noise vector previously produced for `token`.
    ///
    /// Fails with `InvalidToken` when the token is the wrong shape for this
    /// strategy or out of range for the current configuration.
    fn resample(&self, token: SampleToken, dimension: usize) -> SamplingResult<Vec<f64>>;

    /// Apply the configured standard-deviation scaling to a raw delta.
    ///
    /// Kept separate from [`sample`](Self::sample) so callers that hold
    /// unit-variance noise (e.g. the negated half of a mirrored pair) can
    /// apply the configured scale themselves.
    fn normalize(&self, raw_delta: &[f64]) -> Vec<f64> {
        let std_dev = self.std_dev();
        raw_delta.iter().map(|v| v * std_dev).collect()
    }

    /// The configured noise standard deviation.
    fn std_dev(&self) -> f64;

    /// Human-readable strategy name.
    fn name(&self) -> &'static str;
}
