//! Review model - immutable evaluation events against a goal.

use serde::{Deserialize, Serialize};
use crate::id::{GoalId, ReviewId};
use crate::{Date, Time};

/// An immutable, dated evaluation of a goal.
///
/// Reviews are append-only: history is never mutated or deleted, only
/// superseded by newer reviews. The date is a calendar date and may be
/// backdated relative to when the review was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique identifier
    pub id: ReviewId,

    /// The goal this review evaluates
    pub goal_id: GoalId,

    /// Calendar date the review applies to
    pub date: Date,

    /// How the goal went
    pub rating: ReviewRating,

    /// What actually happened
    pub evidence: String,

    /// Reported value, used only by measurable goals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Obstacles encountered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obstacles: Option<Vec<String>>,

    /// Wins worth remembering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wins: Option<Vec<String>>,
}

/// Rating given in a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewRating {
    /// Having real difficulty
    Struggling,
    /// Moving, but behind
    Slow,
    /// Going as planned
    OnTrack,
    /// Ahead of plan
    Exceeding,
}

impl ReviewRating {
    /// Whether this rating counts as a success for maturity purposes.
    pub fn is_success(self) -> bool {
        matches!(self, Self::OnTrack | Self::Exceeding)
    }
}

/// A user's whole review history, persisted as one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsData {
    /// All reviews for one user, append-only
    pub reviews: Vec<Review>,

    /// When the collection was last written
    pub last_updated: Time,
}

impl ReviewsData {
    /// Empty collection stamped at `now`.
    pub fn empty(now: Time) -> Self {
        Self {
            reviews: Vec::new(),
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_serializes_kebab_case() {
        let json = serde_json::to_string(&ReviewRating::OnTrack).unwrap();
        assert_eq!(json, "\"on-track\"");
    }

    #[test]
    fn success_ratings() {
        assert!(ReviewRating::OnTrack.is_success());
        assert!(ReviewRating::Exceeding.is_success());
        assert!(!ReviewRating::Slow.is_success());
        assert!(!ReviewRating::Struggling.is_success());
    }
}
