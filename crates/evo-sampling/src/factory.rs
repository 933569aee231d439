use std::sync::Arc;

use evo_types::{SamplingConfig, SamplingKind, SamplingResult};
use tracing::info;

use crate::{CachedGaussianSampling, GaussianSampling, SamplingMethod};

/// Construct the sampling strategy named by the configuration.
///
/// Pure selection logic: the kind field is parsed into the closed strategy
/// set and dispatched to the matching constructor.  An unrecognized kind
/// fails with `UnsupportedKind` and constructs nothing; constructor failures
/// propagate unchanged.  The instance comes back behind an `Arc` so the
/// caller can hand the same strategy to every worker thread for the length
/// of the run.
pub fn create_sampling_method(
    config: &SamplingConfig,
) -> SamplingResult<Arc<dyn SamplingMethod>> {
    let kind = config.sampling_kind()?;

    let method: Arc<dyn SamplingMethod> = match kind {
        SamplingKind::Gaussian => Arc::new(GaussianSampling::from_config(config)?),
        SamplingKind::CachedGaussian => Arc::new(CachedGaussianSampling::from_config(config)?),
    };

    info!(strategy = method.name(), std_dev = config.std_dev, "created sampling method");
    Ok(method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evo_types::SamplingError;

    #[test]
    fn gaussian_kind_builds_gaussian_sampling() {
        let config = SamplingConfig::new(SamplingKind::Gaussian).with_std_dev(0.5);
        let method = create_sampling_method(&config).unwrap();
        assert_eq!(method.name(), "gaussian");
        assert_eq!(method.std_dev(), 0.5);
    }

    #[test]
    fn cached_kind_builds_cached_sampling() {
        let config = SamplingConfig::new(SamplingKind::CachedGaussian)
            .with_cache_table_size(4096)
            .with_seed(42);
        let method = create_sampling_method(&config).unwrap();
        assert_eq!(method.name(), "cached_gaussian");

        let (noise, token) = method.sample(256).unwrap();
        assert_eq!(method.resample(token, 256).unwrap(), noise);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut config = SamplingConfig::default();
        config.kind = "sobol".to_string();

        let err = match create_sampling_method(&config) {
            Ok(_) => panic!("expected create_sampling_method to fail"),
            Err(e) => e,
        };
        assert!(matches!(
            err,
            SamplingError::UnsupportedKind { kind } if kind == "sobol"
        ));
    }

    #[test]
    fn invalid_parameters_fail_before_any_sampling() {
        let config = SamplingConfig::new(SamplingKind::Gaussian).with_std_dev(-1.0);
        assert!(matches!(
            create_sampling_method(&config),
            Err(SamplingError::Config { .. })
        ));

        let config = SamplingConfig::new(SamplingKind::CachedGaussian)
            .with_seed(1)
            .with_cache_table_size(10)
            .with_param_dim(11);
        assert!(matches!(
            create_sampling_method(&config),
            Err(SamplingError::Config { .. })
        ));
    }

    #[test]
    fn strategies_are_interchangeable_behind_the_trait() {
        // The optimizer asks once at startup and shares the instance; both
        // strategies must satisfy the same round-trip contract.
        let configs = [
            SamplingConfig::new(SamplingKind::Gaussian).with_seed(3),
            SamplingConfig::new(SamplingKind::CachedGaussian)
                .with_cache_table_size(2048)
                .with_seed(3),
        ];

        for config in &configs {
            let method = create_sampling_method(config).unwrap();
            let shared = Arc::clone(&method);

            let (noise, token) = method.sample(64).unwrap();
            assert_eq!(shared.resample(token, 64).unwrap(), noise);
        }
    }

    #[test]
    fn concurrent_workers_share_one_instance() {
        let config = SamplingConfig::new(SamplingKind::CachedGaussian)
            .with_cache_table_size(8192)
            .with_seed(77);
        let method = create_sampling_method(&config).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let worker = Arc::clone(&method);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let (noise, token) = worker.sample(100).unwrap();
                        assert_eq!(worker.resample(token, 100).unwrap(), noise);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
