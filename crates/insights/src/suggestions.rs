//! Target calibration suggestions.
//!
//! Looks at the last four weeks of ratings: a goal exceeded most of the
//! time deserves a bigger target, one failed most of the time a smaller
//! one.

use chrono::Duration;
use stride_core::{Date, GoalId, GoalStatus, GoalType, Review, Time};
use stride_storage::{Result, Storage};

/// Which way a target should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDirection {
    /// Raise the target
    Increase,
    /// Lower the target
    Decrease,
}

/// Advisory target adjustment for one goal.
#[derive(Debug, Clone)]
pub struct TargetSuggestion {
    /// The goal in question
    pub goal_id: GoalId,
    /// Its title, for display
    pub goal_title: String,
    /// Target as currently set
    pub current_target: f64,
    /// Proposed target
    pub suggested_target: f64,
    /// Unit, for display
    pub unit: String,
    /// Why the adjustment is proposed
    pub reason: String,
    /// Which way the target moves
    pub direction: TargetDirection,
}

struct RatingMix {
    exceeding: usize,
    on_track: usize,
    struggling: usize,
    slow: usize,
}

impl RatingMix {
    fn total(&self) -> usize {
        self.exceeding + self.on_track + self.struggling + self.slow
    }
}

fn recent_mix(reviews: &[Review], goal_id: &GoalId, today: Date, weeks: i64) -> RatingMix {
    let cutoff = today - Duration::weeks(weeks);
    let recent: Vec<&Review> = reviews
        .iter()
        .filter(|r| &r.goal_id == goal_id && r.date >= cutoff)
        .collect();

    RatingMix {
        exceeding: recent
            .iter()
            .filter(|r| r.rating == stride_core::ReviewRating::Exceeding)
            .count(),
        on_track: recent
            .iter()
            .filter(|r| r.rating == stride_core::ReviewRating::OnTrack)
            .count(),
        struggling: recent
            .iter()
            .filter(|r| r.rating == stride_core::ReviewRating::Struggling)
            .count(),
        slow: recent
            .iter()
            .filter(|r| r.rating == stride_core::ReviewRating::Slow)
            .count(),
    }
}

fn next_target(current: f64, direction: TargetDirection) -> f64 {
    match direction {
        TargetDirection::Increase => {
            if current <= 3.0 {
                current + 1.0
            } else {
                (current * 1.2).round()
            }
        }
        TargetDirection::Decrease => {
            if current <= 2.0 {
                1.0
            } else if current <= 4.0 {
                current - 1.0
            } else {
                (current * 0.8).round()
            }
        }
    }
}

/// Propose target adjustments for active, non-milestone goals.
pub async fn analyze_targets<S: Storage>(
    storage: &S,
    user: &str,
    now: Time,
) -> Result<Vec<TargetSuggestion>> {
    let goals_data = storage.load_goals(user).await?;
    let reviews_data = storage.load_reviews(user).await?;
    let today = now.date_naive();

    let mut suggestions = Vec::new();
    for goal in goals_data
        .goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active && g.goal_type != GoalType::Milestone)
    {
        let mix = recent_mix(&reviews_data.reviews, &goal.id, today, 4);
        let total = mix.total();
        if total < 3 {
            continue;
        }

        let success_rate = (mix.exceeding + mix.on_track) as f64 / total as f64;
        let exceeding_rate = mix.exceeding as f64 / total as f64;

        if exceeding_rate >= 0.6 && total >= 4 {
            suggestions.push(TargetSuggestion {
                goal_id: goal.id.clone(),
                goal_title: goal.title.clone(),
                current_target: goal.target,
                suggested_target: next_target(goal.target, TargetDirection::Increase),
                unit: goal.unit.clone(),
                reason: format!(
                    "You've been exceeding {}% of the time. Time to level up!",
                    (exceeding_rate * 100.0).round()
                ),
                direction: TargetDirection::Increase,
            });
        } else if success_rate <= 0.3 && total >= 4 {
            suggestions.push(TargetSuggestion {
                goal_id: goal.id.clone(),
                goal_title: goal.title.clone(),
                current_target: goal.target,
                suggested_target: next_target(goal.target, TargetDirection::Decrease),
                unit: goal.unit.clone(),
                reason: "Current target may be too ambitious. Consider a more achievable goal."
                    .to_string(),
                direction: TargetDirection::Decrease,
            });
        }
    }

    Ok(suggestions)
}

/// Target suggestion for a single goal, when one applies.
pub async fn goal_target_suggestion<S: Storage>(
    storage: &S,
    user: &str,
    goal_id: &GoalId,
    now: Time,
) -> Result<Option<TargetSuggestion>> {
    let suggestions = analyze_targets(storage, user, now).await?;
    Ok(suggestions.into_iter().find(|s| &s.goal_id == goal_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increase_steps_small_targets_by_one() {
        assert_eq!(next_target(2.0, TargetDirection::Increase), 3.0);
        assert_eq!(next_target(3.0, TargetDirection::Increase), 4.0);
        assert_eq!(next_target(10.0, TargetDirection::Increase), 12.0);
    }

    #[test]
    fn decrease_never_goes_below_one() {
        assert_eq!(next_target(1.0, TargetDirection::Decrease), 1.0);
        assert_eq!(next_target(2.0, TargetDirection::Decrease), 1.0);
        assert_eq!(next_target(4.0, TargetDirection::Decrease), 3.0);
        assert_eq!(next_target(10.0, TargetDirection::Decrease), 8.0);
    }
}
