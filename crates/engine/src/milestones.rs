//! Achievement and hierarchy roll-up operations.

use stride_core::{Goal, GoalId, GoalStatus, SessionEntry, Time};
use stride_storage::Storage;

use crate::{EngineError, GoalService, Result};

/// Result of marking a goal achieved.
#[derive(Debug, Clone)]
pub struct Achievement {
    /// The achieved goal
    pub goal: Goal,
    /// Goals promoted to available as a consequence
    pub unlocked: Vec<Goal>,
}

impl<S: Storage> GoalService<S> {
    /// Mark a goal achieved.
    ///
    /// Sets progress to 100, stamps the goal, then runs the unlock engine
    /// over the goals this one enables. Achieved is terminal for lifecycle
    /// purposes, though field edits remain possible.
    pub async fn achieve_goal(&mut self, user: &str, id: &GoalId, now: Time) -> Result<Achievement> {
        let mut data = self.storage.load_goals(user).await?;
        let goal = data
            .find_mut(id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        goal.status = GoalStatus::Achieved;
        goal.progress = 100.0;
        goal.updated_at = now;
        let achieved = goal.clone();

        data.last_updated = now;
        self.storage.save_goals(user, &data).await?;

        tracing::info!("goal {} achieved by {}", id, user);
        self.audit(
            user,
            SessionEntry::for_goal(now, "achieved", id.clone(), serde_json::json!({})),
        )
        .await;

        let unlocked = self.unlock_after_achievement(user, id, now).await?;

        Ok(Achievement {
            goal: achieved,
            unlocked,
        })
    }

    /// Direct children of a goal.
    pub async fn child_goals(&self, user: &str, parent_id: &GoalId) -> Result<Vec<Goal>> {
        let data = self.storage.load_goals(user).await?;
        Ok(data
            .goals
            .into_iter()
            .filter(|g| g.parent_id.as_ref() == Some(parent_id))
            .collect())
    }

    /// Parent of a goal, if it has one.
    pub async fn parent_goal(&self, user: &str, child_id: &GoalId) -> Result<Option<Goal>> {
        let data = self.storage.load_goals(user).await?;
        let parent_id = match data.find(child_id) {
            Some(child) => child.parent_id.clone(),
            None => return Err(EngineError::NotFound(child_id.to_string())),
        };
        Ok(parent_id.and_then(|id| data.find(&id).cloned()))
    }

    /// Share of a goal's children that are achieved, as 0-100.
    pub async fn parent_progress(&self, user: &str, parent_id: &GoalId) -> Result<f64> {
        let children = self.child_goals(user, parent_id).await?;
        if children.is_empty() {
            return Ok(0.0);
        }
        let achieved = children
            .iter()
            .filter(|c| c.status == GoalStatus::Achieved)
            .count();
        Ok((achieved as f64 / children.len() as f64 * 100.0).round())
    }

    /// Refresh a parent's progress after a child changed.
    ///
    /// No-op when the child has no parent.
    pub async fn update_parent_progress(
        &mut self,
        user: &str,
        child_id: &GoalId,
        now: Time,
    ) -> Result<()> {
        let Some(parent) = self.parent_goal(user, child_id).await? else {
            return Ok(());
        };
        let progress = self.parent_progress(user, &parent.id).await?;

        let mut data = self.storage.load_goals(user).await?;
        if let Some(parent) = data.find_mut(&parent.id) {
            parent.progress = progress;
            parent.updated_at = now;
            data.last_updated = now;
            self.storage.save_goals(user, &data).await?;
        }
        Ok(())
    }
}
