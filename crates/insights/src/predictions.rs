//! Risk prediction for active goals.

use stride_core::{Date, Goal, GoalId, GoalStatus, Review, Time};
use stride_engine::scheduling::days_since_last_review;
use stride_storage::{Result, Storage};

/// How endangered a goal looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    /// On track
    Low,
    /// Slipping
    Medium,
    /// In real danger of being dropped
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// Advisory risk assessment for one goal.
#[derive(Debug, Clone)]
pub struct RiskPrediction {
    /// The goal at risk
    pub goal_id: GoalId,
    /// Its title, for display
    pub goal_title: String,
    /// Assessed level
    pub risk_level: RiskLevel,
    /// Why the level was assigned
    pub reason: String,
    /// Whole days since the last check-in, `None` when never reviewed
    pub days_since_check_in: Option<i64>,
    /// What to do about it
    pub suggestion: String,
}

fn assess(goal: &Goal, reviews: &[Review], today: Date) -> (RiskLevel, String) {
    let expected = if goal.check_in_interval == 0 {
        7
    } else {
        goal.check_in_interval
    } as i64;

    // Never reviewed reads as infinitely overdue
    let days_since = days_since_last_review(today, goal.last_review);

    if days_since.map_or(true, |d| d > expected * 2) {
        let days = days_since
            .map(|d| d.to_string())
            .unwrap_or_else(|| "many".to_string());
        return (
            RiskLevel::High,
            format!("No check-in for {days} days (expected every {expected} days)"),
        );
    }
    if let Some(days) = days_since {
        if days > expected {
            return (
                RiskLevel::Medium,
                format!("Check-in overdue by {} days", days - expected),
            );
        }
    }

    let mut recent: Vec<&Review> = reviews.iter().filter(|r| r.goal_id == goal.id).collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(5);

    if recent.len() >= 3 {
        let struggling = recent.iter().filter(|r| !r.rating.is_success()).count();
        if struggling >= 3 {
            return (
                RiskLevel::High,
                "Recent reviews show consistent difficulty".to_string(),
            );
        }
        if struggling >= 2 {
            return (
                RiskLevel::Medium,
                "Recent reviews show some difficulty".to_string(),
            );
        }
    }

    (RiskLevel::Low, "On track".to_string())
}

fn suggestion_for(level: RiskLevel, goal: &Goal) -> String {
    match level {
        RiskLevel::High => {
            if goal.target > 1.0 {
                format!(
                    "Consider reducing target from {} to {} {}",
                    goal.target,
                    (goal.target * 0.7).ceil(),
                    goal.unit
                )
            } else {
                "Try breaking this into smaller milestones".to_string()
            }
        }
        RiskLevel::Medium => "Schedule a check-in today to get back on track".to_string(),
        RiskLevel::Low => "Keep up the good work!".to_string(),
    }
}

/// Assess every active goal and report the ones not at low risk,
/// highest first.
pub async fn predict_risks<S: Storage>(
    storage: &S,
    user: &str,
    now: Time,
) -> Result<Vec<RiskPrediction>> {
    let goals_data = storage.load_goals(user).await?;
    let reviews_data = storage.load_reviews(user).await?;
    let today = now.date_naive();

    let mut predictions: Vec<RiskPrediction> = goals_data
        .goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .filter_map(|goal| {
            let (level, reason) = assess(goal, &reviews_data.reviews, today);
            if level == RiskLevel::Low {
                return None;
            }
            Some(RiskPrediction {
                goal_id: goal.id.clone(),
                goal_title: goal.title.clone(),
                risk_level: level,
                reason,
                days_since_check_in: days_since_last_review(today, goal.last_review),
                suggestion: suggestion_for(level, goal),
            })
        })
        .collect();

    predictions.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));
    Ok(predictions)
}

/// Risk assessment for a single goal, `None` when it is low risk.
pub async fn goal_risk<S: Storage>(
    storage: &S,
    user: &str,
    goal_id: &GoalId,
    now: Time,
) -> Result<Option<RiskPrediction>> {
    let risks = predict_risks(storage, user, now).await?;
    Ok(risks.into_iter().find(|r| &r.goal_id == goal_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use stride_core::{ReviewId, ReviewRating};

    fn goal(id: &str, last_review: Option<Date>) -> Goal {
        let now = chrono::Utc::now();
        Goal {
            id: GoalId::from(id),
            title: id.to_string(),
            description: None,
            why: String::new(),
            identity: None,
            parent_id: None,
            children: Vec::new(),
            goal_type: stride_core::GoalType::Habit,
            frequency: stride_core::GoalFrequency::Weekly,
            target: 3.0,
            unit: "sessions".to_string(),
            status: GoalStatus::Active,
            progress: 0.0,
            maturity: 0,
            prerequisites: Vec::new(),
            unlocks: Vec::new(),
            last_review,
            next_check_in: None,
            check_in_interval: 7,
            owner: "alice".to_string(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn silence_escalates_risk() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

        // Never reviewed: high
        let (level, _) = assess(&goal("a", None), &[], today);
        assert_eq!(level, RiskLevel::High);

        // 15 days on a 7-day interval: past 2x, high
        let (level, _) = assess(&goal("a", Some(today - Duration::days(15))), &[], today);
        assert_eq!(level, RiskLevel::High);

        // 10 days: overdue but under 2x, medium
        let (level, reason) = assess(&goal("a", Some(today - Duration::days(10))), &[], today);
        assert_eq!(level, RiskLevel::Medium);
        assert!(reason.contains("overdue by 3 days"));

        // Fresh: low
        let (level, _) = assess(&goal("a", Some(today - Duration::days(2))), &[], today);
        assert_eq!(level, RiskLevel::Low);
    }

    #[test]
    fn repeated_struggle_raises_risk() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let g = goal("a", Some(today));
        let reviews: Vec<Review> = (0..3)
            .map(|i| Review {
                id: ReviewId::new(),
                goal_id: g.id.clone(),
                date: today - Duration::days(i),
                rating: ReviewRating::Struggling,
                evidence: String::new(),
                value: None,
                obstacles: None,
                wins: None,
            })
            .collect();

        let (level, _) = assess(&g, &reviews, today);
        assert_eq!(level, RiskLevel::High);
    }
}
