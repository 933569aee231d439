//! # evo-sampling
//!
//! Perturbation noise sampling for the Evoxide distributed ES optimizer.
//!
//! Provides the [`SamplingMethod`] capability contract, its two strategies
//! (direct Gaussian draws and slices of a pre-generated shared noise table),
//! and the factory that selects a strategy from configuration.  Every sample
//! comes with a compact [`evo_types::SampleToken`] from which any process
//! holding a matching configuration reconstructs the identical noise vector.

mod cached;
mod factory;
mod gaussian;
mod method;

pub use cached::CachedGaussianSampling;
pub use factory::create_sampling_method;
pub use gaussian::GaussianSampling;
pub use method::SamplingMethod;
