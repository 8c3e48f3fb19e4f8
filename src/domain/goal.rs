use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Displayable, Identifiable, NamedEntity};

/// A named savings target funded through two independent balances: physical
/// cash and Pix. Balances are never negative; completion is sticky.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_cash: f64,
    pub current_pix: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_link: Option<String>,
    pub visibility: GoalVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    #[serde(default)]
    pub collaborators: Vec<GoalCollaborator>,
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Goal {
    pub fn new(
        name: impl Into<String>,
        target_amount: f64,
        visibility: GoalVisibility,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            current_cash: 0.0,
            current_pix: 0.0,
            image_url: None,
            product_link: None,
            visibility,
            created_at: now,
            updated_at: now,
            user_id,
            collaborators: Vec::new(),
            is_completed: false,
            completed_at: None,
        }
    }

    /// Sum of both balances. Display-level only; the balances themselves
    /// stay independent ledgers.
    pub fn total(&self) -> f64 {
        self.current_cash + self.current_pix
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn add_collaborator(&mut self, collaborator: GoalCollaborator) {
        self.collaborators.push(collaborator);
    }
}

impl Identifiable for Goal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Goal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Goal {
    fn display_label(&self) -> String {
        format!("goal:{} [{}]", self.name, self.visibility)
    }
}

/// Who may see a goal besides its owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalVisibility {
    #[default]
    Private,
    Friends,
    Public,
}

impl fmt::Display for GoalVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalVisibility::Private => "private",
            GoalVisibility::Friends => "friends",
            GoalVisibility::Public => "public",
        };
        f.write_str(label)
    }
}

/// Permission level granted to a collaborator. Collaborators hold a
/// non-owning reference; ownership never transfers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalPermission {
    View,
    Contribute,
    Manage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalCollaborator {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_id: Uuid,
    pub permission: GoalPermission,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_percentage: Option<f64>,
    pub joined_at: DateTime<Utc>,
}

impl GoalCollaborator {
    pub fn new(
        user_id: Uuid,
        goal_id: Uuid,
        permission: GoalPermission,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            goal_id,
            permission,
            contribution_percentage: None,
            joined_at,
        }
    }
}
