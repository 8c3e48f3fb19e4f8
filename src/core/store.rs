use uuid::Uuid;

use crate::domain::Goal;
use crate::errors::{TrackerError, TrackerResult};

/// Abstraction over goal record storage. Reads return the latest committed
/// state; `replace` is a full overwrite of the goal's mutable fields. The
/// shipped implementation is in-memory; durable backends sit behind the same
/// trait.
pub trait GoalStore: Send + Sync {
    fn insert(&mut self, goal: Goal) -> TrackerResult<()>;
    fn get(&self, id: Uuid) -> TrackerResult<Goal>;
    fn replace(&mut self, goal: Goal) -> TrackerResult<()>;
    fn list(&self) -> Vec<Goal>;
    fn list_for_owner(&self, user_id: Uuid) -> Vec<Goal>;
    fn remove(&mut self, id: Uuid) -> TrackerResult<Goal>;
}

/// Vec-backed store, newest goal first (matches the dashboard ordering).
#[derive(Debug, Default)]
pub struct InMemoryGoalStore {
    goals: Vec<Goal>,
}

impl InMemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

impl GoalStore for InMemoryGoalStore {
    fn insert(&mut self, goal: Goal) -> TrackerResult<()> {
        if self.goals.iter().any(|existing| existing.id == goal.id) {
            return Err(TrackerError::Validation(format!(
                "goal `{}` already stored",
                goal.id
            )));
        }
        self.goals.insert(0, goal);
        Ok(())
    }

    fn get(&self, id: Uuid) -> TrackerResult<Goal> {
        self.goals
            .iter()
            .find(|goal| goal.id == id)
            .cloned()
            .ok_or(TrackerError::UnknownGoal(id))
    }

    fn replace(&mut self, goal: Goal) -> TrackerResult<()> {
        let slot = self
            .goals
            .iter_mut()
            .find(|existing| existing.id == goal.id)
            .ok_or(TrackerError::UnknownGoal(goal.id))?;
        *slot = goal;
        Ok(())
    }

    fn list(&self) -> Vec<Goal> {
        self.goals.clone()
    }

    fn list_for_owner(&self, user_id: Uuid) -> Vec<Goal> {
        self.goals
            .iter()
            .filter(|goal| goal.user_id == user_id)
            .cloned()
            .collect()
    }

    fn remove(&mut self, id: Uuid) -> TrackerResult<Goal> {
        let index = self
            .goals
            .iter()
            .position(|goal| goal.id == id)
            .ok_or(TrackerError::UnknownGoal(id))?;
        Ok(self.goals.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GoalVisibility;
    use chrono::Utc;

    fn sample_goal(owner: Uuid) -> Goal {
        Goal::new("Moto", 15000.0, GoalVisibility::Friends, owner, Utc::now())
    }

    #[test]
    fn get_unknown_goal_errors() {
        let store = InMemoryGoalStore::new();
        let missing = Uuid::new_v4();
        let err = store.get(missing).expect_err("missing goal must fail");
        assert!(matches!(err, TrackerError::UnknownGoal(id) if id == missing));
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut store = InMemoryGoalStore::new();
        let goal = sample_goal(Uuid::new_v4());
        store.insert(goal.clone()).unwrap();
        assert!(store.insert(goal).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_overwrites_stored_goal() {
        let mut store = InMemoryGoalStore::new();
        let mut goal = sample_goal(Uuid::new_v4());
        store.insert(goal.clone()).unwrap();

        goal.current_cash = 500.0;
        store.replace(goal.clone()).unwrap();
        assert_eq!(store.get(goal.id).unwrap().current_cash, 500.0);
    }

    #[test]
    fn remove_returns_the_goal_and_forgets_it() {
        let mut store = InMemoryGoalStore::new();
        let goal = sample_goal(Uuid::new_v4());
        store.insert(goal.clone()).unwrap();

        let removed = store.remove(goal.id).unwrap();
        assert_eq!(removed.id, goal.id);
        assert!(store.is_empty());
        assert!(store.remove(goal.id).is_err());
    }

    #[test]
    fn newest_goal_listed_first() {
        let owner = Uuid::new_v4();
        let mut store = InMemoryGoalStore::new();
        let first = sample_goal(owner);
        let second = sample_goal(owner);
        store.insert(first).unwrap();
        store.insert(second.clone()).unwrap();

        assert_eq!(store.list()[0].id, second.id);
        assert_eq!(store.list_for_owner(owner).len(), 2);
        assert!(store.list_for_owner(Uuid::new_v4()).is_empty());
    }
}
