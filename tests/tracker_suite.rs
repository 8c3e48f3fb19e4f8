use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use cofrinho::{
    core::{
        Clock, ComparisonEntry, FixedMonthlyContribution, GoalFilter, GoalTracker,
        InMemoryGoalStore, ManualClock, RankBadge, RecordingSink,
    },
    domain::{
        Frequency, NewTransaction, PaymentMethod, RecurringTransaction, TransactionKind, User,
    },
    errors::TrackerError,
};
use uuid::Uuid;

fn fixed_start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn tracker_fixture() -> (GoalTracker, Arc<ManualClock>, Arc<RecordingSink>, User) {
    let clock = Arc::new(ManualClock::new(fixed_start()));
    let sink = Arc::new(RecordingSink::new());
    let tracker = GoalTracker::new(
        Box::new(InMemoryGoalStore::new()),
        Arc::clone(&clock) as Arc<dyn cofrinho::core::Clock>,
        Arc::clone(&sink) as Arc<dyn cofrinho::core::NotificationSink>,
        Box::new(FixedMonthlyContribution::default()),
    );
    let user = User::new("João Silva", "usuario@exemplo.com", fixed_start());
    (tracker, clock, sink, user)
}

fn income(method: PaymentMethod, amount: f64) -> NewTransaction {
    NewTransaction::new(TransactionKind::Income, method, amount)
}

fn expense(method: PaymentMethod, amount: f64) -> NewTransaction {
    NewTransaction::new(TransactionKind::Expense, method, amount)
}

#[test]
fn completion_edge_fires_exactly_once() {
    let (mut tracker, clock, sink, user) = tracker_fixture();
    let mut input = cofrinho::core::NewGoal::new("Meta", 1000.0);
    input.initial_cash = 900.0;
    let goal = tracker.create_goal(&user, input).unwrap();

    let applied = tracker
        .record_transaction(&user, goal.id, income(PaymentMethod::Cash, 200.0))
        .unwrap();
    assert_eq!(applied.goal.current_cash, 1100.0);
    assert!(applied.goal.is_completed);
    assert!(applied.completed_just_now);
    assert_eq!(sink.count(), 1);
    assert_eq!(sink.events()[0].goal_id, goal.id);
    assert_eq!(sink.events()[0].completed_at, clock.now());

    // Anything applied to the already-completed goal stays silent.
    clock.advance(Duration::hours(1));
    tracker
        .record_transaction(&user, goal.id, income(PaymentMethod::Pix, 50.0))
        .unwrap();
    tracker
        .record_transaction(&user, goal.id, expense(PaymentMethod::Cash, 600.0))
        .unwrap();
    assert_eq!(sink.count(), 1);

    let stored = tracker.goal(goal.id).unwrap();
    assert!(stored.is_completed, "completion is sticky");
    assert_eq!(stored.completed_at, Some(fixed_start()));
}

#[test]
fn cash_and_pix_are_independent_ledgers() {
    let (mut tracker, _clock, _sink, user) = tracker_fixture();
    let mut input = cofrinho::core::NewGoal::new("Meta", 1000.0);
    input.initial_cash = 100.0;
    input.initial_pix = 50.0;
    let goal = tracker.create_goal(&user, input).unwrap();

    let applied = tracker
        .record_transaction(&user, goal.id, expense(PaymentMethod::Cash, 30.0))
        .unwrap();
    assert_eq!(applied.goal.current_cash, 70.0);
    assert_eq!(applied.goal.current_pix, 50.0);
}

#[test]
fn balances_floor_at_zero() {
    let (mut tracker, _clock, _sink, user) = tracker_fixture();
    let mut input = cofrinho::core::NewGoal::new("Meta", 1000.0);
    input.initial_cash = 20.0;
    let goal = tracker.create_goal(&user, input).unwrap();

    let applied = tracker
        .record_transaction(&user, goal.id, expense(PaymentMethod::Cash, 50.0))
        .unwrap();
    assert_eq!(applied.goal.current_cash, 0.0);
    assert_eq!(applied.goal.current_pix, 0.0);
}

#[test]
fn rejected_submission_leaves_store_unchanged() {
    let (mut tracker, _clock, sink, user) = tracker_fixture();
    let mut input = cofrinho::core::NewGoal::new("Meta", 1000.0);
    input.initial_cash = 400.0;
    let goal = tracker.create_goal(&user, input).unwrap();
    let before = tracker.goal(goal.id).unwrap();

    let err = tracker
        .record_transaction(&user, goal.id, income(PaymentMethod::Cash, 0.0))
        .expect_err("zero amount must be rejected, not a silent no-op");
    assert!(matches!(err, TrackerError::InvalidAmount(_)));

    let after = tracker.goal(goal.id).unwrap();
    assert_eq!(after.current_cash, before.current_cash);
    assert_eq!(after.updated_at, before.updated_at);
    assert_eq!(sink.count(), 0);
}

#[test]
fn unknown_goal_is_reported() {
    let (mut tracker, _clock, _sink, user) = tracker_fixture();
    let missing = Uuid::new_v4();
    let err = tracker
        .record_transaction(&user, missing, income(PaymentMethod::Pix, 10.0))
        .expect_err("unknown goal must fail");
    assert!(matches!(err, TrackerError::UnknownGoal(id) if id == missing));
}

#[test]
fn create_goal_validation() {
    let (mut tracker, _clock, _sink, user) = tracker_fixture();

    let err = tracker
        .create_goal(&user, cofrinho::core::NewGoal::new("Meta", 0.0))
        .expect_err("zero target must fail");
    assert!(matches!(err, TrackerError::InvalidTarget(_)));

    let mut negative = cofrinho::core::NewGoal::new("Meta", 100.0);
    negative.initial_pix = -1.0;
    let err = tracker
        .create_goal(&user, negative)
        .expect_err("negative initial balance must fail");
    assert!(matches!(err, TrackerError::Validation(_)));

    // Non-finite balances would poison every summary total downstream.
    for poison in [f64::INFINITY, f64::NAN] {
        let mut bad = cofrinho::core::NewGoal::new("Meta", 100.0);
        bad.initial_cash = poison;
        let err = tracker
            .create_goal(&user, bad)
            .expect_err("non-finite initial balance must fail");
        assert!(matches!(err, TrackerError::Validation(_)));
    }

    assert!(tracker.goals_with_progress(GoalFilter::All).unwrap().is_empty());
}

#[test]
fn progress_estimate_matches_reference_example() {
    let (mut tracker, clock, _sink, user) = tracker_fixture();
    let mut input = cofrinho::core::NewGoal::new("Meta", 4000.0);
    input.initial_cash = 1000.0;
    let goal = tracker.create_goal(&user, input).unwrap();

    let detailed = tracker.goal_with_progress(goal.id).unwrap();
    assert_eq!(detailed.progress.total_amount, 1000.0);
    assert_eq!(detailed.progress.progress_percentage, 25.0);
    assert_eq!(detailed.progress.estimated_days, 90);
    assert_eq!(
        detailed.progress.estimated_date,
        clock.now() + Duration::days(90)
    );
}

#[test]
fn huge_target_still_yields_progress_and_summary() {
    let (mut tracker, clock, _sink, user) = tracker_fixture();
    let goal = tracker
        .create_goal(&user, cofrinho::core::NewGoal::new("Meta", 1.0e13))
        .unwrap();

    // The estimate runs past the representable date range; it saturates
    // instead of panicking.
    let detailed = tracker.goal_with_progress(goal.id).unwrap();
    assert_eq!(detailed.progress.progress_percentage, 0.0);
    assert!(detailed.progress.estimated_date > clock.now());

    let summary = tracker.summary().unwrap();
    assert_eq!(summary.total_target, 1.0e13);
}

#[test]
fn filters_split_active_and_completed() {
    let (mut tracker, _clock, _sink, user) = tracker_fixture();
    let mut open = cofrinho::core::NewGoal::new("Ativa", 1000.0);
    open.initial_cash = 100.0;
    tracker.create_goal(&user, open).unwrap();

    let mut done = cofrinho::core::NewGoal::new("Conquistada", 500.0);
    done.initial_cash = 499.0;
    let done_goal = tracker.create_goal(&user, done).unwrap();
    tracker
        .record_transaction(&user, done_goal.id, income(PaymentMethod::Pix, 1.0))
        .unwrap();

    assert_eq!(tracker.goals_with_progress(GoalFilter::All).unwrap().len(), 2);
    let active = tracker.goals_with_progress(GoalFilter::Active).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].goal.name, "Ativa");
    let completed = tracker.goals_with_progress(GoalFilter::Completed).unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].goal.name, "Conquistada");
}

#[test]
fn comparison_ranks_caller_among_peers() {
    let (mut tracker, _clock, _sink, user) = tracker_fixture();
    // Caller sits at 50%.
    let mut input = cofrinho::core::NewGoal::new("PlayStation 5", 4500.0);
    input.initial_cash = 1200.0;
    input.initial_pix = 1050.0;
    tracker.create_goal(&user, input).unwrap();

    let peer = |name: &str, pct: f64| ComparisonEntry {
        user_id: Uuid::new_v4(),
        user_name: name.into(),
        goal_id: Uuid::new_v4(),
        goal_name: format!("{name}'s goal"),
        total_cash: 0.0,
        total_pix: 0.0,
        total_amount: 0.0,
        progress_percentage: pct,
        estimated_days: 10,
        is_self: false,
    };

    let ranked = tracker
        .compare_with_friends(&user, vec![peer("Maria", 72.0), peer("Pedro", 90.0)])
        .unwrap();
    let names: Vec<&str> = ranked.iter().map(|r| r.entry.user_name.as_str()).collect();
    assert_eq!(names, vec!["Pedro", "Maria", "João Silva"]);
    assert_eq!(ranked[0].badge, Some(RankBadge::Leader));
    assert!(ranked[2].entry.is_self);
}

#[test]
fn feed_records_creation_transactions_and_completion() {
    let (mut tracker, clock, _sink, user) = tracker_fixture();
    let mut input = cofrinho::core::NewGoal::new("Meta", 100.0);
    input.initial_cash = 90.0;
    let goal = tracker.create_goal(&user, input).unwrap();

    clock.advance(Duration::minutes(5));
    tracker
        .record_transaction(&user, goal.id, income(PaymentMethod::Pix, 10.0))
        .unwrap();

    let feed = tracker.activity_feed();
    let kinds: Vec<_> = feed.iter().map(|item| item.kind).collect();
    use cofrinho::domain::ActivityKind::*;
    // Newest first; completion and its transaction share a timestamp.
    assert_eq!(kinds.len(), 3);
    assert!(kinds[0] == Transaction || kinds[0] == GoalCompleted);
    assert!(kinds[1] == Transaction || kinds[1] == GoalCompleted);
    assert_eq!(kinds[2], GoalCreated);
    let txn = feed.iter().find(|item| item.kind == Transaction).unwrap();
    assert_eq!(txn.amount, Some(10.0));
    assert_eq!(txn.method, Some(PaymentMethod::Pix));
}

#[test]
fn recurring_templates_are_declarative() {
    let (mut tracker, clock, sink, user) = tracker_fixture();
    let mut input = cofrinho::core::NewGoal::new("Meta", 10_000.0);
    input.initial_pix = 100.0;
    let goal = tracker.create_goal(&user, input).unwrap();

    let due = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
    let template = RecurringTransaction::new(
        goal.id,
        TransactionKind::Income,
        PaymentMethod::Pix,
        800.0,
        Frequency::Monthly,
        due,
        clock.now(),
    );
    let template_id = template.id;
    tracker.add_recurring(template).unwrap();

    assert_eq!(tracker.recurring_for_goal(goal.id).len(), 1);
    assert!(tracker.due_recurring(due).iter().any(|t| t.id == template_id));
    assert!(tracker
        .due_recurring(due - Duration::days(1))
        .is_empty());

    // Nothing fires on its own: balances and the sink are untouched.
    assert_eq!(tracker.goal(goal.id).unwrap().current_pix, 100.0);
    assert_eq!(sink.count(), 0);

    tracker.set_recurring_active(template_id, false).unwrap();
    assert!(tracker.due_recurring(due).is_empty());
}

#[test]
fn recurring_template_rejects_unknown_goal_and_bad_amount() {
    let (mut tracker, clock, _sink, user) = tracker_fixture();
    let goal = tracker
        .create_goal(&user, cofrinho::core::NewGoal::new("Meta", 1000.0))
        .unwrap();
    let due = clock.today();

    let orphan = RecurringTransaction::new(
        Uuid::new_v4(),
        TransactionKind::Income,
        PaymentMethod::Cash,
        50.0,
        Frequency::Weekly,
        due,
        clock.now(),
    );
    assert!(matches!(
        tracker.add_recurring(orphan),
        Err(TrackerError::UnknownGoal(_))
    ));

    let worthless = RecurringTransaction::new(
        goal.id,
        TransactionKind::Income,
        PaymentMethod::Cash,
        0.0,
        Frequency::Weekly,
        due,
        clock.now(),
    );
    assert!(matches!(
        tracker.add_recurring(worthless),
        Err(TrackerError::InvalidAmount(_))
    ));
}

#[test]
fn summary_matches_dashboard_cards() {
    let (mut tracker, _clock, _sink, user) = tracker_fixture();
    let mut first = cofrinho::core::NewGoal::new("Meta A", 1000.0);
    first.initial_cash = 250.0;
    first.initial_pix = 250.0;
    tracker.create_goal(&user, first).unwrap();
    let mut second = cofrinho::core::NewGoal::new("Meta B", 2000.0);
    second.initial_cash = 1999.0;
    let second_goal = tracker.create_goal(&user, second).unwrap();
    tracker
        .record_transaction(&user, second_goal.id, income(PaymentMethod::Cash, 1.0))
        .unwrap();

    let summary = tracker.summary().unwrap();
    assert_eq!(summary.goal_count, 2);
    assert_eq!(summary.completed_goals, 1);
    assert_eq!(summary.total_cash, 2250.0);
    assert_eq!(summary.total_pix, 250.0);
    assert_eq!(summary.total_balance, 2500.0);
    assert_eq!(summary.total_target, 3000.0);
    assert_eq!(summary.average_progress, 75.0);
}
