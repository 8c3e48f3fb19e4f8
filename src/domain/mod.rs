//! Savings-goal domain models and shared helpers.

pub mod activity;
pub mod common;
pub mod goal;
pub mod transaction;
pub mod user;

pub use activity::{ActivityFeedItem, ActivityKind};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use goal::{Goal, GoalCollaborator, GoalPermission, GoalVisibility};
pub use transaction::{
    Frequency, NewTransaction, PaymentMethod, RecurringTransaction, Transaction, TransactionKind,
};
pub use user::{Friend, FriendStatus, User};
