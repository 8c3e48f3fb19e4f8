use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::PaymentMethod;

/// What a feed entry announces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Transaction,
    GoalCompleted,
    GoalCreated,
    BadgeEarned,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityKind::Transaction => "transaction",
            ActivityKind::GoalCompleted => "goal_completed",
            ActivityKind::GoalCreated => "goal_created",
            ActivityKind::BadgeEarned => "badge_earned",
        };
        f.write_str(label)
    }
}

/// One entry of the social activity feed. Amount and method are present for
/// transaction entries only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFeedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub goal_id: Uuid,
    pub goal_name: String,
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: u32,
}

impl ActivityFeedItem {
    pub fn new(
        user_id: Uuid,
        user_name: impl Into<String>,
        goal_id: Uuid,
        goal_name: impl Into<String>,
        kind: ActivityKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            user_name: user_name.into(),
            goal_id,
            goal_name: goal_name.into(),
            kind,
            amount: None,
            method: None,
            created_at,
            likes: 0,
            comments: 0,
        }
    }

    pub fn with_amount(mut self, amount: f64, method: PaymentMethod) -> Self {
        self.amount = Some(amount);
        self.method = Some(method);
        self
    }
}
