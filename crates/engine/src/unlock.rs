//! Unlock engine - prerequisite graph evaluation.

use stride_core::{Goal, GoalStatus, SessionEntry, Time};
use stride_storage::Storage;

use crate::{GoalService, Result};

/// Whether a locked goal's prerequisites are all satisfied.
///
/// Only locked goals can unlock. Empty prerequisites unlock trivially;
/// otherwise every prerequisite id must resolve to an achieved goal, and a
/// dangling id counts as unsatisfied.
pub fn can_unlock(goal: &Goal, all_goals: &[Goal]) -> bool {
    if goal.status != GoalStatus::Locked {
        return false;
    }
    if goal.prerequisites.is_empty() {
        return true;
    }

    goal.prerequisites.iter().all(|prereq_id| {
        all_goals
            .iter()
            .find(|g| &g.id == prereq_id)
            .is_some_and(|prereq| prereq.status == GoalStatus::Achieved)
    })
}

impl<S: Storage> GoalService<S> {
    /// Promote every goal whose prerequisites are now satisfied.
    ///
    /// Idempotent: a second run with no new achievements promotes nothing.
    /// An empty result is success, not an error.
    pub async fn run_unlock_sweep(&mut self, user: &str, now: Time) -> Result<Vec<Goal>> {
        let mut data = self.storage.load_goals(user).await?;

        let to_unlock: Vec<_> = data
            .goals
            .iter()
            .filter(|g| can_unlock(g, &data.goals))
            .map(|g| g.id.clone())
            .collect();

        if to_unlock.is_empty() {
            return Ok(Vec::new());
        }

        let mut unlocked = Vec::new();
        for id in &to_unlock {
            if let Some(goal) = data.find_mut(id) {
                goal.status = GoalStatus::Available;
                goal.updated_at = now;
                unlocked.push(goal.clone());
            }
        }

        data.last_updated = now;
        self.storage.save_goals(user, &data).await?;

        for goal in &unlocked {
            tracing::info!("unlocked goal {} for {}", goal.id, user);
            self.audit(
                user,
                SessionEntry::for_goal(now, "unlock", goal.id.clone(), serde_json::json!({})),
            )
            .await;
        }

        Ok(unlocked)
    }

    /// Promote goals enabled by one newly achieved goal.
    ///
    /// The scan is restricted to the achieved goal's `unlocks` set; each
    /// candidate still has to pass the full prerequisite check, since
    /// achieving one of several prerequisites is not sufficient.
    pub(crate) async fn unlock_after_achievement(
        &mut self,
        user: &str,
        achieved_id: &stride_core::GoalId,
        now: Time,
    ) -> Result<Vec<Goal>> {
        let mut data = self.storage.load_goals(user).await?;

        let candidates = match data.find(achieved_id) {
            Some(achieved) if !achieved.unlocks.is_empty() => achieved.unlocks.clone(),
            _ => return Ok(Vec::new()),
        };

        let to_unlock: Vec<_> = data
            .goals
            .iter()
            .filter(|g| candidates.contains(&g.id) && g.status == GoalStatus::Locked)
            .filter(|g| can_unlock(g, &data.goals))
            .map(|g| g.id.clone())
            .collect();

        if to_unlock.is_empty() {
            return Ok(Vec::new());
        }

        let mut unlocked = Vec::new();
        for id in &to_unlock {
            if let Some(goal) = data.find_mut(id) {
                goal.status = GoalStatus::Available;
                goal.updated_at = now;
                unlocked.push(goal.clone());
            }
        }

        data.last_updated = now;
        self.storage.save_goals(user, &data).await?;

        for goal in &unlocked {
            tracing::info!("unlocked goal {} after achieving {}", goal.id, achieved_id);
            self.audit(
                user,
                SessionEntry::for_goal(
                    now,
                    "unlock",
                    goal.id.clone(),
                    serde_json::json!({ "triggeredBy": achieved_id }),
                ),
            )
            .await;
        }

        Ok(unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::tests::{habit_input, test_now};
    use crate::GoalUpdate;
    use stride_core::GoalId;
    use stride_storage::MemoryStorage;

    #[tokio::test]
    async fn non_locked_goals_never_unlock() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let goal = service.create_goal("alice", habit_input("Run"), now).await.unwrap();
        assert_eq!(goal.status, stride_core::GoalStatus::Active);

        let data = service.storage().load_goals("alice").await.unwrap();
        assert!(!can_unlock(&data.goals[0], &data.goals));
    }

    #[tokio::test]
    async fn dangling_prerequisite_blocks_unlock() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let mut input = habit_input("Advanced");
        input.prerequisites = vec![GoalId::from("never-created")];
        service.create_goal("alice", input, now).await.unwrap();

        let unlocked = service.run_unlock_sweep("alice", now).await.unwrap();
        assert!(unlocked.is_empty());
    }

    #[tokio::test]
    async fn sweep_is_idempotent() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let base = service.create_goal("alice", habit_input("Base"), now).await.unwrap();
        let mut input = habit_input("Advanced");
        input.prerequisites = vec![base.id.clone()];
        service.create_goal("alice", input, now).await.unwrap();

        service
            .update_goal(
                "alice",
                &base.id,
                GoalUpdate {
                    status: Some(stride_core::GoalStatus::Achieved),
                    ..Default::default()
                },
                now,
            )
            .await
            .unwrap();

        let first = service.run_unlock_sweep("alice", now).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].status, stride_core::GoalStatus::Available);

        let second = service.run_unlock_sweep("alice", now).await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn one_of_two_prerequisites_is_not_enough() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let a = service.create_goal("alice", habit_input("First"), now).await.unwrap();
        let b = service.create_goal("alice", habit_input("Second"), now).await.unwrap();
        let mut input = habit_input("Capstone");
        input.prerequisites = vec![a.id.clone(), b.id.clone()];
        let capstone = service.create_goal("alice", input, now).await.unwrap();

        let result = service.achieve_goal("alice", &a.id, now).await.unwrap();
        assert!(result.unlocked.is_empty());

        let result = service.achieve_goal("alice", &b.id, now).await.unwrap();
        assert_eq!(result.unlocked.len(), 1);
        assert_eq!(result.unlocked[0].id, capstone.id);
    }
}
