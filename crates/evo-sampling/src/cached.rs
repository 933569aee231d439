use std::sync::Arc;
use std::time::Instant;

use evo_types::{SampleToken, SamplingConfig, SamplingError, SamplingResult};
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;
use tracing::info;

/// Table fill granularity.  Chunk boundaries are part of the table's
/// identity: every process derives chunk `i` from ChaCha8 stream `i` of the
/// shared seed, so the result is byte-identical regardless of how rayon
/// schedules the fill.
const FILL_CHUNK: usize = 1 << 16;

/// ChaCha8 stream reserved for the offset/sign source, outside the range
/// any table chunk can use.
const OFFSET_STREAM: u64 = u64::MAX;

/// Cache-backed Gaussian sampling: one large shared noise table, sampled by
/// offset.
///
/// Pays the noise-generation cost once instead of per round: a table of
/// independent standard normals is built from the fixed config seed at
/// construction, and each sample is a contiguous slice of it, identified by
/// `(offset, sign)`.  Any process that built its table from the same seed
/// reconstructs the slice without generating anything.
///
/// The table is write-once.  After construction it is only ever read, so
/// worker threads sample concurrently without locks; the only guarded state
/// is the small offset source.
pub struct CachedGaussianSampling {
    std_dev: f64,
    table: Arc<Vec<f64>>,
    offset_source: Mutex<ChaCha8Rng>,
}

impl CachedGaussianSampling {
    pub fn new(std_dev: f64, cache_table_size: usize, seed: u64) -> SamplingResult<Self> {
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(SamplingError::config(format!(
                "std_dev must be positive and finite, got {std_dev}"
            )));
        }
        if cache_table_size == 0 {
            return Err(SamplingError::config("cache_table_size must be non-zero"));
        }

        let started = Instant::now();
        let table = Arc::new(Self::generate_table(cache_table_size, seed));
        info!(
            table_size = cache_table_size,
            seed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated shared noise table"
        );

        let mut offset_source = ChaCha8Rng::seed_from_u64(seed);
        offset_source.set_stream(OFFSET_STREAM);

        Ok(Self {
            std_dev,
            table,
            offset_source: Mutex::new(offset_source),
        })
    }

    /// Construct from the shared configuration record.
    ///
    /// Fails before any table generation when the record cannot support
    /// cache-backed sampling: missing fixed seed, empty table, or a table
    /// smaller than the declared parameter dimensionality.
    pub fn from_config(config: &SamplingConfig) -> SamplingResult<Self> {
        let seed = config.seed.ok_or_else(|| {
            SamplingError::config(
                "cached_gaussian requires a fixed seed so all processes \
                 generate an identical noise table",
            )
        })?;

        if let Some(dim) = config.param_dim {
            if config.cache_table_size < dim {
                return Err(SamplingError::config(format!(
                    "cache_table_size {} is smaller than param_dim {}",
                    config.cache_table_size, dim
                )));
            }
        }

        Self::new(config.std_dev, config.cache_table_size, seed)
    }

    /// Standard normals, filled in parallel but deterministic in `seed`:
    /// chunk `i` always comes from stream `i`, whatever the scheduling.
    fn generate_table(size: usize, seed: u64) -> Vec<f64> {
        let mut table = vec![0.0f64; size];
        table
            .par_chunks_mut(FILL_CHUNK)
            .enumerate()
            .for_each(|(chunk_index, chunk)| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(chunk_index as u64);
                for slot in chunk.iter_mut() {
                    *slot = rng.sample(StandardNormal);
                }
            });
        table
    }

    fn slice(&self, offset: usize, negated: bool, dimension: usize) -> Vec<f64> {
        let sign = if negated { -1.0 } else { 1.0 };
        self.table[offset..offset + dimension]
            .iter()
            .map(|v| v * sign * self.std_dev)
            .collect()
    }

    /// Length of the shared noise table.
    pub fn table_size(&self) -> usize {
        self.table.len()
    }

    /// Shared handle to the underlying table, for diagnostics and tests.
    pub fn table_handle(&self) -> Arc<Vec<f64>> {
        Arc::clone(&self.table)
    }
}

impl super::SamplingMethod for CachedGaussianSampling {
    fn sample(&self, dimension: usize) -> SamplingResult<(Vec<f64>, SampleToken)> {
        if dimension > self.table.len() {
            return Err(SamplingError::config(format!(
                "dimension {} exceeds cache_table_size {}",
                dimension,
                self.table.len()
            )));
        }

        let max_offset = self.table.len() - dimension;
        let (offset, negated) = {
            let mut source = self.offset_source.lock();
            (source.gen_range(0..=max_offset), source.gen::<bool>())
        };

        let noise = self.slice(offset, negated, dimension);
        Ok((noise, SampleToken::Slice { offset, negated }))
    }

    fn resample(&self, token: SampleToken, dimension: usize) -> SamplingResult<Vec<f64>> {
        match token {
            SampleToken::Slice { offset, negated } => {
                let in_range = offset
                    .checked_add(dimension)
                    .map_or(false, |end| end <= self.table.len());
                if !in_range {
                    return Err(SamplingError::invalid_token(format!(
                        "offset {} + dimension {} exceeds table size {}",
                        offset,
                        dimension,
                        self.table.len()
                    )));
                }
                Ok(self.slice(offset, negated, dimension))
            }
            other => Err(SamplingError::invalid_token(format!(
                "cached sampling expects a slice token, got {}",
                other.kind_name()
            ))),
        }
    }

    fn std_dev(&self) -> f64 {
        self.std_dev
    }

    fn name(&self) -> &'static str {
        "cached_gaussian"
    }
}
