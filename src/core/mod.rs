//! Business logic and services for the savings-goal tracker.
//!
//! No terminal I/O and no direct persistence; collaborators (store, clock,
//! notification sink, estimator) are injected behind traits.

pub mod apply;
pub mod clock;
pub mod comparison;
pub mod estimate;
pub mod notify;
pub mod progress;
pub mod store;
pub mod summary;
pub mod tracker;

pub use apply::{AppliedTransaction, TransactionService};
pub use clock::{Clock, ManualClock, SystemClock};
pub use comparison::{ComparisonEntry, ComparisonService, RankBadge, RankedComparison};
pub use estimate::{ContributionEstimator, FixedMonthlyContribution};
pub use notify::{CompletionEvent, LogSink, NotificationSink, RecordingSink};
pub use progress::{GoalProgress, GoalWithProgress, ProgressService};
pub use store::{GoalStore, InMemoryGoalStore};
pub use summary::{SummaryService, TrackerSummary};
pub use tracker::{GoalFilter, GoalTracker, NewGoal};
