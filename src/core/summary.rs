//! Dashboard-level aggregation across a user's goals.

use chrono::{DateTime, Utc};

use crate::domain::Goal;
use crate::errors::TrackerResult;

use super::estimate::ContributionEstimator;
use super::progress::ProgressService;

/// Totals shown on the dashboard summary cards.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSummary {
    pub total_cash: f64,
    pub total_pix: f64,
    pub total_balance: f64,
    pub total_target: f64,
    pub goal_count: usize,
    pub completed_goals: usize,
    /// Mean of per-goal capped percentages; zero when there are no goals.
    pub average_progress: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn overview(
        goals: &[Goal],
        estimator: &dyn ContributionEstimator,
        now: DateTime<Utc>,
    ) -> TrackerResult<TrackerSummary> {
        let mut summary = TrackerSummary {
            total_cash: 0.0,
            total_pix: 0.0,
            total_balance: 0.0,
            total_target: 0.0,
            goal_count: goals.len(),
            completed_goals: 0,
            average_progress: 0.0,
        };

        let mut progress_sum = 0.0;
        for goal in goals {
            summary.total_cash += goal.current_cash;
            summary.total_pix += goal.current_pix;
            summary.total_target += goal.target_amount;
            if goal.is_completed {
                summary.completed_goals += 1;
            }
            progress_sum += ProgressService::compute(goal, estimator, now)?.progress_percentage;
        }

        summary.total_balance = summary.total_cash + summary.total_pix;
        if !goals.is_empty() {
            summary.average_progress = progress_sum / goals.len() as f64;
        }
        Ok(summary)
    }
}
