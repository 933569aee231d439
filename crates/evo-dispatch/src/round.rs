//! Perturbation-round lifecycle tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::fleet::EvaluationReport;

/// Unique optimization run identifier.
pub type RunId = Uuid;

/// Lifecycle state for a perturbation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Aggregate status of one perturbation round.
///
/// The coordinator dispatches `expected_reports` evaluation tasks and folds
/// the reports back in as workers answer; the reports (token + reward) are
/// everything the gradient combination step downstream needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStatus {
    pub run_id: RunId,
    pub round: usize,
    pub state: RoundState,
    pub expected_reports: usize,
    pub reports_received: usize,
    pub reports_failed: usize,
    pub best_report: Option<EvaluationReport>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl RoundStatus {
    pub fn new(run_id: RunId, round: usize, expected_reports: usize) -> Self {
        Self {
            run_id,
            round,
            state: RoundState::Pending,
            expected_reports,
            reports_received: 0,
            reports_failed: 0,
            best_report: None,
            started_at: None,
            finished_at: None,
            error: None,
        }
    }

    pub fn mark_running(&mut self) {
        self.state = RoundState::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn mark_completed(&mut self) {
        self.state = RoundState::Completed;
        self.finished_at = Some(Utc::now());
    }

    pub fn mark_failed(&mut self, error: String) {
        self.state = RoundState::Failed;
        self.finished_at = Some(Utc::now());
        self.error = Some(error);
    }

    /// Fold a worker's report into the round.
    pub fn record_report(&mut self, report: EvaluationReport) {
        if self.reports_received + self.reports_failed >= self.expected_reports {
            warn!(
                round = self.round,
                task_id = %report.task_id,
                "report received after round already accounted for all tasks"
            );
        }
        self.reports_received += 1;
        self.update_best(report);
    }

    /// Record a task that produced no usable evaluation.
    pub fn record_failure(&mut self) {
        self.reports_failed += 1;
    }

    /// All dispatched tasks have been accounted for.
    pub fn is_complete(&self) -> bool {
        self.reports_received + self.reports_failed >= self.expected_reports
    }

    fn update_best(&mut self, report: EvaluationReport) {
        let improves = match &self.best_report {
            None => true,
            Some(current) => report.best_reward() > current.best_reward(),
        };
        if improves {
            self.best_report = Some(report);
        }
    }
}
