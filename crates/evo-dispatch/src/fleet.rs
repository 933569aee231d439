//! Fleet configuration and task/report descriptors for distributed rounds.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use evo_types::{SampleToken, SamplingConfig};

/// Configuration for the worker fleet evaluating perturbations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Coordinator address workers report back to (e.g. "tcp://head:5555").
    pub address: String,

    /// Namespace for this optimization run.
    pub namespace: String,

    /// Resource requirements per worker.
    pub worker_resources: WorkerResources,

    /// Maximum number of workers evaluating concurrently.
    pub max_concurrent_workers: usize,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            address: "tcp://localhost:5555".to_string(),
            namespace: "evoxide".to_string(),
            worker_resources: WorkerResources::default(),
            max_concurrent_workers: 4,
        }
    }
}

/// Resource requirements for a single worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerResources {
    /// Number of CPUs per worker (fractional ok).
    pub num_cpus: f64,
    /// Number of GPUs per worker (0 = no GPU).
    pub num_gpus: f64,
    /// Memory in bytes (0 = no limit).
    pub memory_bytes: u64,
    /// Custom resource requirements.
    pub custom: HashMap<String, f64>,
}

impl Default for WorkerResources {
    fn default() -> Self {
        Self {
            num_cpus: 1.0,
            num_gpus: 0.0,
            memory_bytes: 0,
            custom: HashMap::new(),
        }
    }
}

/// Describes one perturbation evaluation to dispatch to a worker.
///
/// The worker constructs its sampling method from the embedded
/// `sampling` record (so its noise table/seed configuration matches the
/// coordinator's), samples locally, evaluates the perturbed parameters, and
/// answers with an [`EvaluationReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalTaskDescriptor {
    /// Unique task id (matches the report that comes back).
    pub task_id: Uuid,

    /// Optimization run this task belongs to.
    pub run_id: Uuid,

    /// Perturbation round number (0-indexed).
    pub round: usize,

    /// Serialized base optimizer config (JSON).  Stored opaquely so this
    /// crate doesn't depend on the surrounding optimizer's models.
    pub base_config: serde_json::Value,

    /// Sampling configuration every worker must construct from.
    pub sampling: SamplingConfig,

    /// Whether the worker should also evaluate the negated noise variant.
    pub mirrored: bool,
}

/// What a worker sends back in place of a full noise vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Task this report answers.
    pub task_id: Uuid,

    /// Token identifying the noise vector used for the perturbation.
    pub token: SampleToken,

    /// Reward measured for `params + noise`.
    pub reward: f64,

    /// Reward for the `params - noise` variant, when mirrored evaluation
    /// was requested.
    pub mirrored_reward: Option<f64>,

    /// Worker that produced this report.
    pub worker_id: String,

    /// Wall-clock evaluation time.
    pub duration_seconds: Option<u64>,
}

impl EvaluationReport {
    /// Best reward across the mirrored pair.
    pub fn best_reward(&self) -> f64 {
        match self.mirrored_reward {
            Some(mirrored) => self.reward.max(mirrored),
            None => self.reward,
        }
    }
}

/// Allocation plan produced by the round coordinator for the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerAllocation {
    /// Total number of workers to request.
    pub num_workers: usize,

    /// Per-worker resource spec.
    pub resources: WorkerResources,

    /// Task descriptors ready to dispatch.
    pub tasks: Vec<EvalTaskDescriptor>,

    /// Fleet config to use.
    pub fleet: FleetConfig,
}

impl WorkerAllocation {
    /// Create an allocation for a batch of tasks.
    pub fn new(fleet: FleetConfig, tasks: Vec<EvalTaskDescriptor>) -> Self {
        let num_workers = fleet.max_concurrent_workers.min(tasks.len());
        let resources = fleet.worker_resources.clone();
        Self {
            num_workers,
            resources,
            tasks,
            fleet,
        }
    }
}
