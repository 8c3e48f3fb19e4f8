//! Application of a transaction to a goal's balances.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Goal, NewTransaction, PaymentMethod, Transaction};
use crate::errors::{TrackerError, TrackerResult};

/// Result of applying a transaction: the next goal state, the recorded
/// transaction, and whether this application crossed the completion edge.
#[derive(Debug, Clone)]
pub struct AppliedTransaction {
    pub goal: Goal,
    pub transaction: Transaction,
    /// True only on the single transition where the total first reaches the
    /// target. The presentation layer decides what celebration to run.
    pub completed_just_now: bool,
}

pub struct TransactionService;

impl TransactionService {
    /// Rejects caller-input errors before any mutation happens.
    pub fn validate(input: &NewTransaction) -> TrackerResult<()> {
        if !input.amount.is_finite() || input.amount <= 0.0 {
            return Err(TrackerError::InvalidAmount(input.amount));
        }
        Ok(())
    }

    /// Applies `input` to `goal`, producing the next goal state.
    ///
    /// Only the balance matching the transaction's method changes; the other
    /// balance is untouched. Balances floor at zero — an expense larger than
    /// the available balance in that method loses the excess rather than
    /// erroring (documented policy). Completion is sticky: once a goal's
    /// total has reached its target it never re-opens, and the completion
    /// edge is reported at most once.
    pub fn apply(
        goal: &Goal,
        input: &NewTransaction,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> TrackerResult<AppliedTransaction> {
        Self::validate(input)?;

        let signed = input.amount * input.kind.sign();
        let new_cash = match input.method {
            PaymentMethod::Cash => clamp0(goal.current_cash + signed),
            PaymentMethod::Pix => goal.current_cash,
        };
        let new_pix = match input.method {
            PaymentMethod::Pix => clamp0(goal.current_pix + signed),
            PaymentMethod::Cash => goal.current_pix,
        };

        let total = new_cash + new_pix;
        let was_completed = goal.is_completed;
        let completed_just_now = !was_completed && total >= goal.target_amount;

        let mut next = goal.clone();
        next.current_cash = new_cash;
        next.current_pix = new_pix;
        next.is_completed = was_completed || total >= goal.target_amount;
        if completed_just_now {
            next.completed_at = Some(now);
        }
        next.touch(now);

        let transaction = Transaction::from_input(goal.id, input, user_id, now);
        tracing::debug!(
            goal = %goal.name,
            kind = %input.kind,
            method = %input.method,
            amount = input.amount,
            "transaction applied"
        );

        Ok(AppliedTransaction {
            goal: next,
            transaction,
            completed_just_now,
        })
    }
}

fn clamp0(value: f64) -> f64 {
    value.max(0.0)
}
