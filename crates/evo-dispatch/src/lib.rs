//! # evo-dispatch
//!
//! Boundary types between the Evoxide round coordinator and its worker
//! fleet.  A round dispatches evaluation tasks, each worker perturbs the
//! shared parameters with sampled noise, and what travels back is an
//! [`EvaluationReport`]: a compact sample token plus the measured reward,
//! never the noise vector itself.  The transport that carries these types
//! is owned by the surrounding system; everything here serializes exactly.

mod fleet;
mod round;

pub use fleet::{EvalTaskDescriptor, EvaluationReport, FleetConfig, WorkerAllocation, WorkerResources};
pub use round::{RoundState, RoundStatus, RunId};
