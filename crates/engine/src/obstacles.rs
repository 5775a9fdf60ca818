//! Obstacle capture and resolution.

use stride_core::{GoalId, Obstacle, ObstacleId, SessionEntry, Time};
use stride_storage::Storage;

use crate::{EngineError, GoalService, Result};

impl<S: Storage> GoalService<S> {
    /// Capture an obstacle against an existing goal.
    pub async fn capture_obstacle(
        &mut self,
        user: &str,
        goal_id: &GoalId,
        description: String,
        now: Time,
    ) -> Result<Obstacle> {
        let goals = self.storage.load_goals(user).await?;
        if goals.find(goal_id).is_none() {
            return Err(EngineError::NotFound(goal_id.to_string()));
        }

        let obstacle = Obstacle {
            id: ObstacleId::new(),
            goal_id: goal_id.clone(),
            description: description.clone(),
            created_at: now,
            resolved: false,
            resolved_at: None,
        };

        let mut data = self.storage.load_obstacles(user).await?;
        data.obstacles.push(obstacle.clone());
        data.last_updated = now;
        self.storage.save_obstacles(user, &data).await?;

        self.audit(
            user,
            SessionEntry::for_goal(
                now,
                "capture_obstacle",
                goal_id.clone(),
                serde_json::json!({ "description": description }),
            ),
        )
        .await;

        Ok(obstacle)
    }

    /// Mark an obstacle resolved.
    pub async fn resolve_obstacle(
        &mut self,
        user: &str,
        id: ObstacleId,
        now: Time,
    ) -> Result<Obstacle> {
        let mut data = self.storage.load_obstacles(user).await?;
        let obstacle = data
            .obstacles
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        obstacle.resolved = true;
        obstacle.resolved_at = Some(now);
        let resolved = obstacle.clone();

        data.last_updated = now;
        self.storage.save_obstacles(user, &data).await?;

        self.audit(
            user,
            SessionEntry::for_goal(
                now,
                "resolve_obstacle",
                resolved.goal_id.clone(),
                serde_json::json!({ "obstacleId": resolved.id }),
            ),
        )
        .await;

        Ok(resolved)
    }

    /// Unresolved obstacles for a goal.
    pub async fn open_obstacles(&self, user: &str, goal_id: &GoalId) -> Result<Vec<Obstacle>> {
        let data = self.storage.load_obstacles(user).await?;
        Ok(data
            .obstacles
            .into_iter()
            .filter(|o| &o.goal_id == goal_id && !o.resolved)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::tests::{habit_input, test_now};
    use stride_storage::MemoryStorage;

    #[tokio::test]
    async fn capture_requires_existing_goal() {
        let mut service = GoalService::new(MemoryStorage::new());
        let err = service
            .capture_obstacle("alice", &GoalId::from("ghost"), "too busy".into(), test_now())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[tokio::test]
    async fn resolve_closes_the_obstacle() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let goal = service.create_goal("alice", habit_input("Run"), now).await.unwrap();
        let obstacle = service
            .capture_obstacle("alice", &goal.id, "knee pain".into(), now)
            .await
            .unwrap();

        assert_eq!(service.open_obstacles("alice", &goal.id).await.unwrap().len(), 1);

        let resolved = service.resolve_obstacle("alice", obstacle.id, now).await.unwrap();
        assert!(resolved.resolved);
        assert!(service.open_obstacles("alice", &goal.id).await.unwrap().is_empty());
    }
}
