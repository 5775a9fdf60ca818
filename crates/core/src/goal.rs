//! Goal model - a tracked objective with lifecycle status and review cadence.

use serde::{Deserialize, Serialize};
use crate::id::GoalId;
use crate::{Date, Time};

/// A goal is a tracked objective: a habit, a milestone, or a measurable target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier (title-derived slug, stable once created)
    pub id: GoalId,

    /// Goal title
    pub title: String,

    /// Detailed description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The motivation behind the goal
    pub why: String,

    /// Identity statement ("I am a runner")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    /// Parent goal in the hierarchy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<GoalId>,

    /// Child goals in the hierarchy
    #[serde(default)]
    pub children: Vec<GoalId>,

    /// Goal classification
    #[serde(rename = "type")]
    pub goal_type: GoalType,

    /// Review cadence period
    pub frequency: GoalFrequency,

    /// Target amount per period
    pub target: f64,

    /// Unit for the target ("sessions", "km", "pages")
    pub unit: String,

    /// Lifecycle status
    pub status: GoalStatus,

    /// Current progress (period count for habits, last value for measurables,
    /// 0-100 for milestones)
    pub progress: f64,

    /// Maturity level 0..=5, grows with sustained success and stretches the
    /// check-in interval
    pub maturity: u8,

    /// Goals that must be achieved before this one unlocks
    #[serde(default)]
    pub prerequisites: Vec<GoalId>,

    /// Goals this one enables (inverse of `prerequisites`)
    #[serde(default)]
    pub unlocks: Vec<GoalId>,

    /// Date of the most recent review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review: Option<Date>,

    /// Date the next review is expected by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_check_in: Option<Date>,

    /// Base check-in cadence in days
    pub check_in_interval: u32,

    /// Owning user id
    pub owner: String,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl Goal {
    /// Maximum maturity level.
    pub const MAX_MATURITY: u8 = 5;
}

/// Goal classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    /// Recurring behavior, progress counts distinct active days per period
    Habit,
    /// One-shot objective, progress is a 0-100 completion percentage
    Milestone,
    /// Numeric target, progress tracks the reported value
    Measurable,
}

/// Review cadence period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalFrequency {
    /// Calendar day
    Daily,
    /// Monday-aligned week
    Weekly,
    /// Calendar month
    Monthly,
    /// Three-month block starting Jan/Apr/Jul/Oct
    Quarterly,
    /// Calendar year
    Yearly,
}

/// Goal lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// Waiting on unmet prerequisites
    Locked,
    /// Prerequisites met, not yet started
    Available,
    /// Being worked on
    Active,
    /// Deliberately on hold
    Paused,
    /// Done; terminal for lifecycle purposes
    Achieved,
}

/// A user's whole goal collection, persisted as one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsData {
    /// All goals for one user
    pub goals: Vec<Goal>,

    /// When the collection was last written
    pub last_updated: Time,
}

impl GoalsData {
    /// Empty collection stamped at `now`.
    pub fn empty(now: Time) -> Self {
        Self {
            goals: Vec::new(),
            last_updated: now,
        }
    }

    /// Find a goal by id.
    pub fn find(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| &g.id == id)
    }

    /// Find a goal by id, mutably.
    pub fn find_mut(&mut self, id: &GoalId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| &g.id == id)
    }
}
