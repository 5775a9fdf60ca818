//! Session log entries - the audit trail of user actions.

use serde::{Deserialize, Serialize};
use crate::id::GoalId;
use crate::Time;

/// One audit record in the session log.
///
/// Entries are appended as line-delimited JSON and never read back by the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    /// When the action happened
    pub ts: Time,

    /// Action tag ("add_goal", "review", "unlock", ...)
    pub action: String,

    /// Goal the action applies to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<GoalId>,

    /// Action-specific payload
    pub data: serde_json::Value,
}

impl SessionEntry {
    /// Build an entry for an action against a specific goal.
    pub fn for_goal(
        ts: Time,
        action: impl Into<String>,
        goal_id: GoalId,
        data: serde_json::Value,
    ) -> Self {
        Self {
            ts,
            action: action.into(),
            goal_id: Some(goal_id),
            data,
        }
    }
}
