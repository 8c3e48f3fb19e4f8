//! Orchestrator tying the goal store, clock, notification sink, and
//! estimator together behind one synchronous API.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    ActivityFeedItem, ActivityKind, Goal, GoalVisibility, NewTransaction, RecurringTransaction,
    User,
};
use crate::errors::{TrackerError, TrackerResult};

use super::apply::{AppliedTransaction, TransactionService};
use super::clock::Clock;
use super::comparison::{ComparisonEntry, ComparisonService, RankedComparison};
use super::estimate::ContributionEstimator;
use super::notify::{CompletionEvent, NotificationSink};
use super::progress::{GoalWithProgress, ProgressService};
use super::store::GoalStore;
use super::summary::{SummaryService, TrackerSummary};

/// Caller input for creating a goal.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    pub initial_cash: f64,
    pub initial_pix: f64,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub visibility: GoalVisibility,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target_amount: f64) -> Self {
        Self {
            name: name.into(),
            target_amount,
            initial_cash: 0.0,
            initial_pix: 0.0,
            image_url: None,
            product_link: None,
            visibility: GoalVisibility::Private,
        }
    }
}

/// Dashboard list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl GoalFilter {
    fn keeps(self, goal: &Goal) -> bool {
        match self {
            GoalFilter::All => true,
            GoalFilter::Active => !goal.is_completed,
            GoalFilter::Completed => goal.is_completed,
        }
    }
}

/// Single-writer, synchronous tracker. Each operation is applied atomically
/// to the injected store; behind a network boundary the applicator must stay
/// the sole writer of a goal's balances (e.g. guarded by a per-goal lock or
/// a compare-and-swap on `updated_at`) to keep the exactly-once completion
/// signal.
pub struct GoalTracker {
    store: Box<dyn GoalStore>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn NotificationSink>,
    estimator: Box<dyn ContributionEstimator>,
    recurring: Vec<RecurringTransaction>,
    feed: Vec<ActivityFeedItem>,
}

impl GoalTracker {
    pub fn new(
        store: Box<dyn GoalStore>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn NotificationSink>,
        estimator: Box<dyn ContributionEstimator>,
    ) -> Self {
        Self {
            store,
            clock,
            sink,
            estimator,
            recurring: Vec::new(),
            feed: Vec::new(),
        }
    }

    /// Creates a goal owned by `owner`. Rejects a non-positive target
    /// (`InvalidTarget`) and non-finite or negative initial balances
    /// (`Validation`) before anything is stored.
    pub fn create_goal(&mut self, owner: &User, input: NewGoal) -> TrackerResult<Goal> {
        if !input.target_amount.is_finite() || input.target_amount <= 0.0 {
            return Err(TrackerError::InvalidTarget(input.target_amount));
        }
        if !input.initial_cash.is_finite()
            || input.initial_cash < 0.0
            || !input.initial_pix.is_finite()
            || input.initial_pix < 0.0
        {
            return Err(TrackerError::Validation(
                "initial balances must be finite and not negative".into(),
            ));
        }
        if input.name.trim().is_empty() {
            return Err(TrackerError::Validation("goal name must not be empty".into()));
        }

        let now = self.clock.now();
        let mut goal = Goal::new(
            input.name,
            input.target_amount,
            input.visibility,
            owner.id,
            now,
        );
        goal.current_cash = input.initial_cash;
        goal.current_pix = input.initial_pix;
        goal.image_url = input.image_url;
        goal.product_link = input.product_link;

        self.store.insert(goal.clone())?;
        self.feed.push(ActivityFeedItem::new(
            owner.id,
            owner.name.clone(),
            goal.id,
            goal.name.clone(),
            ActivityKind::GoalCreated,
            now,
        ));
        tracing::info!(goal = %goal.name, target = goal.target_amount, "goal created");
        Ok(goal)
    }

    /// Applies a transaction submitted by `user` to the stored goal.
    /// Validation happens before mutation, so a rejected submission leaves
    /// stored state unchanged. On the completion edge the notification sink
    /// fires exactly once.
    pub fn record_transaction(
        &mut self,
        user: &User,
        goal_id: Uuid,
        input: NewTransaction,
    ) -> TrackerResult<AppliedTransaction> {
        let goal = self.store.get(goal_id)?;
        let now = self.clock.now();
        let applied = TransactionService::apply(&goal, &input, user.id, now)?;
        self.store.replace(applied.goal.clone())?;

        self.feed.push(
            ActivityFeedItem::new(
                user.id,
                user.name.clone(),
                goal_id,
                applied.goal.name.clone(),
                ActivityKind::Transaction,
                now,
            )
            .with_amount(applied.transaction.amount, applied.transaction.method),
        );

        if applied.completed_just_now {
            let event = CompletionEvent {
                goal_id,
                goal_name: applied.goal.name.clone(),
                target_amount: applied.goal.target_amount,
                completed_at: now,
            };
            self.sink.goal_completed(&event);
            self.feed.push(ActivityFeedItem::new(
                user.id,
                user.name.clone(),
                goal_id,
                applied.goal.name.clone(),
                ActivityKind::GoalCompleted,
                now,
            ));
            tracing::info!(goal = %applied.goal.name, "goal reached its target");
        }
        Ok(applied)
    }

    pub fn goal(&self, goal_id: Uuid) -> TrackerResult<Goal> {
        self.store.get(goal_id)
    }

    pub fn goal_with_progress(&self, goal_id: Uuid) -> TrackerResult<GoalWithProgress> {
        let goal = self.store.get(goal_id)?;
        ProgressService::with_progress(goal, self.estimator.as_ref(), self.clock.now())
    }

    /// Goals with derived metrics, newest first, optionally filtered by
    /// completion state.
    pub fn goals_with_progress(&self, filter: GoalFilter) -> TrackerResult<Vec<GoalWithProgress>> {
        let now = self.clock.now();
        self.store
            .list()
            .into_iter()
            .filter(|goal| filter.keeps(goal))
            .map(|goal| ProgressService::with_progress(goal, self.estimator.as_ref(), now))
            .collect()
    }

    pub fn summary(&self) -> TrackerResult<TrackerSummary> {
        SummaryService::overview(&self.store.list(), self.estimator.as_ref(), self.clock.now())
    }

    /// Ranks the caller among peer progress summaries. The caller's entry is
    /// derived from their first active goal (the dashboard's "main goal");
    /// when the caller has no active goal, only peers are ranked. Peer
    /// summaries come from the external friend directory.
    pub fn compare_with_friends(
        &self,
        user: &User,
        peers: Vec<ComparisonEntry>,
    ) -> TrackerResult<Vec<RankedComparison>> {
        let mut entries = peers;
        let main_goal = self
            .store
            .list_for_owner(user.id)
            .into_iter()
            .find(|goal| !goal.is_completed);
        if let Some(goal) = main_goal {
            let progress =
                ProgressService::compute(&goal, self.estimator.as_ref(), self.clock.now())?;
            entries.insert(
                0,
                ComparisonEntry {
                    user_id: user.id,
                    user_name: user.name.clone(),
                    goal_id: goal.id,
                    goal_name: goal.name.clone(),
                    total_cash: goal.current_cash,
                    total_pix: goal.current_pix,
                    total_amount: progress.total_amount,
                    progress_percentage: progress.progress_percentage,
                    estimated_days: progress.estimated_days,
                    is_self: true,
                },
            );
        }
        Ok(ComparisonService::rank(entries))
    }

    /// Feed entries newest first.
    pub fn activity_feed(&self) -> Vec<ActivityFeedItem> {
        let mut feed = self.feed.clone();
        feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        feed
    }

    pub fn push_feed_item(&mut self, item: ActivityFeedItem) {
        self.feed.push(item);
    }

    /// Registers a recurring template against an existing goal. Templates
    /// are declarative; nothing here fires them.
    pub fn add_recurring(&mut self, template: RecurringTransaction) -> TrackerResult<Uuid> {
        TransactionService::validate(&template.to_input())?;
        self.store.get(template.goal_id)?;
        let id = template.id;
        self.recurring.push(template);
        Ok(id)
    }

    pub fn recurring_for_goal(&self, goal_id: Uuid) -> Vec<&RecurringTransaction> {
        self.recurring
            .iter()
            .filter(|template| template.goal_id == goal_id)
            .collect()
    }

    pub fn set_recurring_active(&mut self, id: Uuid, active: bool) -> TrackerResult<()> {
        let template = self
            .recurring
            .iter_mut()
            .find(|template| template.id == id)
            .ok_or_else(|| TrackerError::Validation(format!("recurring template {id} not found")))?;
        template.is_active = active;
        Ok(())
    }

    /// Active templates due on or before `on`. Listing only; applying one is
    /// an explicit `record_transaction` by the caller.
    pub fn due_recurring(&self, on: NaiveDate) -> Vec<&RecurringTransaction> {
        self.recurring
            .iter()
            .filter(|template| template.is_due(on))
            .collect()
    }
}
