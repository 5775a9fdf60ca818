//! Goal lifecycle operations: create, read, update, delete.

use serde::Serialize;
use stride_core::{
    Goal, GoalFrequency, GoalId, GoalStatus, GoalType, SessionEntry, Time,
};
use stride_storage::Storage;

use crate::scheduling;
use crate::{EngineError, GoalService, Result};

/// Input for creating a goal.
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    /// Goal title, also the source of the derived id
    pub title: String,
    /// Goal classification
    pub goal_type: GoalType,
    /// Review cadence period
    pub frequency: GoalFrequency,
    /// Target amount per period
    pub target: f64,
    /// Unit for the target
    pub unit: String,
    /// The motivation behind the goal
    pub why: String,
    /// Detailed description
    pub description: Option<String>,
    /// Identity statement
    pub identity: Option<String>,
    /// Parent goal in the hierarchy
    pub parent_id: Option<GoalId>,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Goals that must be achieved before this one unlocks
    pub prerequisites: Vec<GoalId>,
}

/// Field edits applied by [`GoalService::update_goal`].
///
/// Only the set fields change; an explicit status override here does not
/// trigger unlock side effects.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    /// New title (the id stays as derived at creation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New motivation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    /// New identity statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// New target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    /// New unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Explicit status override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    /// Replacement tag set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Filter for listing goals.
#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    /// Restrict to one status
    pub status: Option<GoalStatus>,
    /// Keep goals carrying any of these tags
    pub tags: Vec<String>,
    /// Restrict to children of this goal
    pub parent_id: Option<GoalId>,
}

impl<S: Storage> GoalService<S> {
    /// Create a goal.
    ///
    /// The id is derived from the title (namespaced under the parent when
    /// present) and must not collide. A goal with prerequisites starts
    /// locked; one without starts active. Both sides of every graph edge
    /// (parent/children, prerequisites/unlocks) are wired here.
    pub async fn create_goal(&mut self, user: &str, input: CreateGoalInput, now: Time) -> Result<Goal> {
        if input.title.trim().is_empty() {
            return Err(EngineError::Validation("title must not be empty".into()));
        }
        if input.target < 0.0 {
            return Err(EngineError::Validation("target must not be negative".into()));
        }

        let mut data = self.storage.load_goals(user).await?;

        let id = GoalId::derive(&input.title, input.parent_id.as_ref());
        if data.find(&id).is_some() {
            return Err(EngineError::AlreadyExists(id.to_string()));
        }

        let status = if input.prerequisites.is_empty() {
            GoalStatus::Active
        } else {
            GoalStatus::Locked
        };

        let today = now.date_naive();
        let interval = self.config.default_check_in_interval;
        let goal = Goal {
            id: id.clone(),
            title: input.title.clone(),
            description: input.description,
            why: input.why,
            identity: input.identity,
            parent_id: input.parent_id.clone(),
            children: Vec::new(),
            goal_type: input.goal_type,
            frequency: input.frequency,
            target: input.target,
            unit: input.unit,
            status,
            progress: 0.0,
            maturity: 0,
            prerequisites: input.prerequisites.clone(),
            unlocks: Vec::new(),
            last_review: None,
            next_check_in: Some(scheduling::next_check_in(today, interval, 0)),
            check_in_interval: interval,
            owner: user.to_string(),
            tags: input.tags,
            created_at: now,
            updated_at: now,
        };
        data.goals.push(goal.clone());

        if let Some(parent_id) = &input.parent_id {
            if let Some(parent) = data.find_mut(parent_id) {
                if !parent.children.contains(&id) {
                    parent.children.push(id.clone());
                }
            }
        }

        // Mirror each prerequisite edge on the prerequisite's unlocks set
        for prereq_id in &input.prerequisites {
            if let Some(prereq) = data.find_mut(prereq_id) {
                if !prereq.unlocks.contains(&id) {
                    prereq.unlocks.push(id.clone());
                }
            }
        }

        data.last_updated = now;
        self.storage.save_goals(user, &data).await?;

        tracing::info!("created goal {} for {}", id, user);
        self.audit(
            user,
            SessionEntry::for_goal(
                now,
                "add_goal",
                id,
                serde_json::json!({ "title": input.title, "type": input.goal_type }),
            ),
        )
        .await;

        Ok(goal)
    }

    /// Fetch one goal.
    pub async fn get_goal(&self, user: &str, id: &GoalId) -> Result<Goal> {
        let data = self.storage.load_goals(user).await?;
        data.find(id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(id.to_string()))
    }

    /// List goals matching a filter.
    pub async fn list_goals(&self, user: &str, filter: &GoalFilter) -> Result<Vec<Goal>> {
        let data = self.storage.load_goals(user).await?;
        Ok(data
            .goals
            .into_iter()
            .filter(|g| filter.status.map_or(true, |s| g.status == s))
            .filter(|g| {
                filter.tags.is_empty() || filter.tags.iter().any(|t| g.tags.contains(t))
            })
            .filter(|g| {
                filter
                    .parent_id
                    .as_ref()
                    .map_or(true, |p| g.parent_id.as_ref() == Some(p))
            })
            .collect())
    }

    /// Apply field edits to a goal.
    ///
    /// Refreshes `updated_at` but drives no lifecycle side effects; an
    /// unlock check only runs on the achievement action.
    pub async fn update_goal(
        &mut self,
        user: &str,
        id: &GoalId,
        updates: GoalUpdate,
        now: Time,
    ) -> Result<Goal> {
        let mut data = self.storage.load_goals(user).await?;
        let goal = data
            .find_mut(id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        if let Some(title) = updates.title.clone() {
            goal.title = title;
        }
        if let Some(description) = updates.description.clone() {
            goal.description = Some(description);
        }
        if let Some(why) = updates.why.clone() {
            goal.why = why;
        }
        if let Some(identity) = updates.identity.clone() {
            goal.identity = Some(identity);
        }
        if let Some(target) = updates.target {
            goal.target = target;
        }
        if let Some(unit) = updates.unit.clone() {
            goal.unit = unit;
        }
        if let Some(status) = updates.status {
            goal.status = status;
        }
        if let Some(tags) = updates.tags.clone() {
            goal.tags = tags;
        }
        goal.updated_at = now;
        let updated = goal.clone();

        data.last_updated = now;
        self.storage.save_goals(user, &data).await?;

        let payload = serde_json::to_value(&updates).unwrap_or_default();
        self.audit(user, SessionEntry::for_goal(now, "update_goal", id.clone(), payload))
            .await;

        Ok(updated)
    }

    /// Delete a goal, hard.
    ///
    /// The id is scrubbed from every other goal's children, prerequisites,
    /// and unlocks sets so no dangling references survive.
    pub async fn delete_goal(&mut self, user: &str, id: &GoalId, now: Time) -> Result<()> {
        let mut data = self.storage.load_goals(user).await?;
        let index = data
            .goals
            .iter()
            .position(|g| &g.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        let removed = data.goals.remove(index);

        for other in &mut data.goals {
            other.children.retain(|c| c != id);
            other.prerequisites.retain(|p| p != id);
            other.unlocks.retain(|u| u != id);
        }

        data.last_updated = now;
        self.storage.save_goals(user, &data).await?;

        tracing::info!("deleted goal {} for {}", id, user);
        self.audit(
            user,
            SessionEntry::for_goal(
                now,
                "delete_goal",
                id.clone(),
                serde_json::json!({ "title": removed.title }),
            ),
        )
        .await;

        Ok(())
    }

    /// The active goal most in need of a check-in.
    ///
    /// Picks the earliest-due active goal whose check-in is absent or has
    /// arrived; `None` means nothing needs attention today.
    pub async fn next_goal_needing_attention(&self, user: &str, now: Time) -> Result<Option<Goal>> {
        let data = self.storage.load_goals(user).await?;
        let today = now.date_naive();

        let mut due: Vec<Goal> = data
            .goals
            .into_iter()
            .filter(|g| g.status == GoalStatus::Active)
            .filter(|g| g.next_check_in.map_or(true, |d| d <= today))
            .collect();
        due.sort_by_key(|g| g.next_check_in.unwrap_or_else(|| g.created_at.date_naive()));

        Ok(due.into_iter().next())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stride_storage::MemoryStorage;

    pub(crate) fn test_now() -> Time {
        Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
    }

    pub(crate) fn habit_input(title: &str) -> CreateGoalInput {
        CreateGoalInput {
            title: title.to_string(),
            goal_type: GoalType::Habit,
            frequency: GoalFrequency::Weekly,
            target: 3.0,
            unit: "sessions".to_string(),
            why: "it matters".to_string(),
            description: None,
            identity: None,
            parent_id: None,
            tags: Vec::new(),
            prerequisites: Vec::new(),
        }
    }

    #[tokio::test]
    async fn create_assigns_slug_and_schedule() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let goal = service
            .create_goal("alice", habit_input("Morning Run"), now)
            .await
            .unwrap();

        assert_eq!(goal.id.as_str(), "morning-run");
        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(goal.maturity, 0);
        // default interval 7 at maturity 0
        assert_eq!(
            goal.next_check_in,
            Some(now.date_naive() + chrono::Duration::days(7))
        );
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        service.create_goal("alice", habit_input("Run"), now).await.unwrap();
        let err = service
            .create_goal("alice", habit_input("Run"), now)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn prerequisites_lock_and_mirror() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let base = service.create_goal("alice", habit_input("Base"), now).await.unwrap();

        let mut input = habit_input("Advanced");
        input.prerequisites = vec![base.id.clone()];
        let advanced = service.create_goal("alice", input, now).await.unwrap();

        assert_eq!(advanced.status, GoalStatus::Locked);
        let base = service.get_goal("alice", &base.id).await.unwrap();
        assert_eq!(base.unlocks, vec![advanced.id]);
    }

    #[tokio::test]
    async fn parent_gains_child_edge() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let parent = service.create_goal("alice", habit_input("Get Fit"), now).await.unwrap();

        let mut input = habit_input("Morning Run");
        input.parent_id = Some(parent.id.clone());
        let child = service.create_goal("alice", input, now).await.unwrap();

        assert_eq!(child.id.as_str(), "get-fit/morning-run");
        let parent = service.get_goal("alice", &parent.id).await.unwrap();
        assert_eq!(parent.children, vec![child.id]);
    }

    #[tokio::test]
    async fn delete_scrubs_every_edge() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let base = service.create_goal("alice", habit_input("Base"), now).await.unwrap();
        let mut input = habit_input("Advanced");
        input.prerequisites = vec![base.id.clone()];
        input.parent_id = Some(base.id.clone());
        let advanced = service.create_goal("alice", input, now).await.unwrap();

        service.delete_goal("alice", &advanced.id, now).await.unwrap();

        let remaining = service.list_goals("alice", &GoalFilter::default()).await.unwrap();
        for goal in &remaining {
            assert!(!goal.children.contains(&advanced.id));
            assert!(!goal.prerequisites.contains(&advanced.id));
            assert!(!goal.unlocks.contains(&advanced.id));
        }
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let mut service = GoalService::new(MemoryStorage::new());
        let err = service
            .delete_goal("alice", &GoalId::from("ghost"), test_now())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_refreshes_timestamp_only() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let goal = service.create_goal("alice", habit_input("Run"), now).await.unwrap();
        let later = now + chrono::Duration::hours(2);

        let updated = service
            .update_goal(
                "alice",
                &goal.id,
                GoalUpdate {
                    target: Some(5.0),
                    status: Some(GoalStatus::Paused),
                    ..Default::default()
                },
                later,
            )
            .await
            .unwrap();

        assert_eq!(updated.target, 5.0);
        assert_eq!(updated.status, GoalStatus::Paused);
        assert_eq!(updated.updated_at, later);
        // Manual status edits never fire the unlock engine
        assert_eq!(updated.progress, 0.0);
    }

    #[tokio::test]
    async fn operations_land_in_the_session_log() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let goal = service.create_goal("alice", habit_input("Run"), now).await.unwrap();
        service.delete_goal("alice", &goal.id, now).await.unwrap();

        let entries = service.storage().session_entries("alice");
        let actions: Vec<&str> = entries.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, ["add_goal", "delete_goal"]);
        assert_eq!(entries[0].goal_id.as_ref(), Some(&goal.id));
    }

    #[tokio::test]
    async fn attention_prefers_earliest_due() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        service.create_goal("alice", habit_input("Run"), now).await.unwrap();
        // Not yet due: check-in is a week out
        assert!(service
            .next_goal_needing_attention("alice", now)
            .await
            .unwrap()
            .is_none());

        let next_week = now + chrono::Duration::days(8);
        let due = service
            .next_goal_needing_attention("alice", next_week)
            .await
            .unwrap();
        assert_eq!(due.unwrap().id.as_str(), "run");
    }
}
