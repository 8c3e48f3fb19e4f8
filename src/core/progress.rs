//! Derivation of progress metrics from a goal's recorded balances.

use chrono::{DateTime, Duration, Utc};

use crate::domain::Goal;
use crate::errors::{TrackerError, TrackerResult};

use super::estimate::ContributionEstimator;

/// Derived progress metrics. Recomputed on every read, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub total_amount: f64,
    /// Capped at 100.
    pub progress_percentage: f64,
    pub estimated_days: i64,
    pub estimated_date: DateTime<Utc>,
}

/// A goal together with its derived metrics, for display.
#[derive(Debug, Clone)]
pub struct GoalWithProgress {
    pub goal: Goal,
    pub progress: GoalProgress,
}

pub struct ProgressService;

impl ProgressService {
    /// Derives total saved, capped percentage, and a linear days-remaining
    /// estimate. Pure function of its inputs; requires `target_amount > 0`.
    pub fn compute(
        goal: &Goal,
        estimator: &dyn ContributionEstimator,
        now: DateTime<Utc>,
    ) -> TrackerResult<GoalProgress> {
        if goal.target_amount <= 0.0 {
            return Err(TrackerError::InvalidTarget(goal.target_amount));
        }

        let total_amount = goal.total();
        let progress_percentage = (total_amount / goal.target_amount * 100.0).min(100.0);

        let remaining = (goal.target_amount - total_amount).max(0.0);
        let estimated_days = estimator.estimated_days(remaining).max(0);

        // A huge target can put the estimate past the representable date
        // range; saturate instead of overflowing.
        let estimated_date = Duration::try_days(estimated_days)
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Ok(GoalProgress {
            total_amount,
            progress_percentage,
            estimated_days,
            estimated_date,
        })
    }

    pub fn with_progress(
        goal: Goal,
        estimator: &dyn ContributionEstimator,
        now: DateTime<Utc>,
    ) -> TrackerResult<GoalWithProgress> {
        let progress = Self::compute(&goal, estimator, now)?;
        Ok(GoalWithProgress { goal, progress })
    }
}
