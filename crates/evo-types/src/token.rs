use serde::{Deserialize, Serialize};

/// Compact reproducible identifier for a noise vector.
///
/// Workers exchange tokens instead of full noise vectors: a peer holding a
/// sampling method built from the same configuration reconstructs the exact
/// vector from the token alone.  Identical token and matching configuration
/// imply a bit-identical reconstruction, regardless of which process runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleToken {
    /// Generator seed used for a direct Gaussian draw.
    Seed(u64),

    /// Offset into the shared noise table, plus the sign bit applied to the
    /// slice (mirrored sampling flips the whole vector).
    Slice { offset: usize, negated: bool },
}

impl SampleToken {
    /// Short strategy tag for log lines and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Seed(_) => "seed",
            Self::Slice { .. } => "slice",
        }
    }
}
