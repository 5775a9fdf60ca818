//! Obstacle model - captured blockers against a goal.

use serde::{Deserialize, Serialize};
use crate::id::{GoalId, ObstacleId};
use crate::Time;

/// Something standing in the way of a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstacle {
    /// Unique identifier
    pub id: ObstacleId,

    /// The goal being blocked
    pub goal_id: GoalId,

    /// What the obstacle is
    pub description: String,

    /// When captured
    pub created_at: Time,

    /// Whether it has been dealt with
    pub resolved: bool,

    /// When it was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<Time>,
}

/// A user's captured obstacles, persisted as one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstaclesData {
    /// All obstacles for one user
    pub obstacles: Vec<Obstacle>,

    /// When the collection was last written
    pub last_updated: Time,
}

impl ObstaclesData {
    /// Empty collection stamped at `now`.
    pub fn empty(now: Time) -> Self {
        Self {
            obstacles: Vec::new(),
            last_updated: now,
        }
    }
}
