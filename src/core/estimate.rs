/// Reference contribution pace used when nothing better is known, in
/// currency units per month.
pub const DEFAULT_AVG_MONTHLY_CONTRIBUTION: f64 = 1000.0;

/// Strategy for turning a remaining amount into an estimated number of days
/// until the goal is reached. Swapping the strategy never touches callers.
pub trait ContributionEstimator: Send + Sync {
    /// Estimated whole days to save `remaining` currency units. Never
    /// negative; zero when nothing remains.
    fn estimated_days(&self, remaining: f64) -> i64;
}

/// Naive estimator assuming a flat monthly contribution. Deliberately ignores
/// each goal's actual historical pace; a trailing-rate estimator would
/// implement the same trait.
#[derive(Debug, Clone, Copy)]
pub struct FixedMonthlyContribution {
    monthly_amount: f64,
}

impl FixedMonthlyContribution {
    /// Builds the estimator; non-positive paces fall back to the reference
    /// constant.
    pub fn new(monthly_amount: f64) -> Self {
        let monthly_amount = if monthly_amount > 0.0 {
            monthly_amount
        } else {
            DEFAULT_AVG_MONTHLY_CONTRIBUTION
        };
        Self { monthly_amount }
    }

    pub fn monthly_amount(&self) -> f64 {
        self.monthly_amount
    }
}

impl Default for FixedMonthlyContribution {
    fn default() -> Self {
        Self::new(DEFAULT_AVG_MONTHLY_CONTRIBUTION)
    }
}

impl ContributionEstimator for FixedMonthlyContribution {
    fn estimated_days(&self, remaining: f64) -> i64 {
        let remaining = remaining.max(0.0);
        let estimated_months = remaining / self.monthly_amount;
        (estimated_months * 30.0).ceil().max(0.0) as i64
    }
}
