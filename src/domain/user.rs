use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Identifiable, NamedEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            avatar_url: None,
            created_at: now,
        }
    }
}

impl Identifiable for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for User {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Relationship state of a friendship request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FriendStatus {
    Pending,
    Accepted,
}

impl fmt::Display for FriendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FriendStatus::Pending => "pending",
            FriendStatus::Accepted => "accepted",
        };
        f.write_str(label)
    }
}

/// A friendship edge as seen from one user. Managed by an external friend
/// directory; carried here for display lookups only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    pub id: Uuid,
    pub user: User,
    pub status: FriendStatus,
    pub created_at: DateTime<Utc>,
}

impl Friend {
    pub fn accepted(user: User, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            status: FriendStatus::Accepted,
            created_at: now,
        }
    }
}
