//! Pattern model - advisory observations derived from review history.

use serde::{Deserialize, Serialize};
use crate::id::{GoalId, PatternId};
use crate::Time;

/// A behavioral pattern detected in a user's review history.
///
/// Patterns are derived and non-authoritative; they never feed back into
/// the goal lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    /// Unique identifier
    pub id: PatternId,

    /// What kind of pattern this is
    #[serde(rename = "type")]
    pub pattern_type: PatternType,

    /// Human-readable description
    pub description: String,

    /// Detection confidence, 0.0..=1.0
    pub confidence: f64,

    /// Goals this pattern applies to
    pub applies_to: Vec<GoalId>,

    /// When the pattern was detected
    pub detected_at: Time,

    /// Suggested action, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Pattern classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Something working well
    Success,
    /// Something threatening progress
    Risk,
    /// An unexploited synergy
    Opportunity,
}

/// A user's stored patterns, persisted as one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternsData {
    /// Most recent analysis output
    pub patterns: Vec<Pattern>,

    /// When analysis last ran
    pub last_analyzed: Time,
}

impl PatternsData {
    /// Empty collection stamped at `now`.
    pub fn empty(now: Time) -> Self {
        Self {
            patterns: Vec::new(),
            last_analyzed: now,
        }
    }
}
