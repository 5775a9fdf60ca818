//! Coaching digest for one goal.
//!
//! Composes a markdown summary from the other analyzers: identity
//! reminder, risk alert, recent-rating encouragement, target suggestion,
//! matching patterns, open obstacles, recent wins, and the goal's why.

use stride_core::{GoalId, Locale, Review, Time};
use stride_engine::scheduling::days_since_last_review;
use stride_i18n::translate;
use stride_storage::{Result, Storage};

use crate::patterns::stored_patterns;
use crate::predictions::goal_risk;
use crate::suggestions::goal_target_suggestion;

/// Build the coaching digest for a goal.
///
/// A missing goal produces the translated not-found message rather than
/// an error; coaching is advisory output, not a state mutation.
pub async fn generate_coaching<S: Storage>(
    storage: &S,
    user: &str,
    goal_id: &GoalId,
    locale: Locale,
    now: Time,
) -> Result<String> {
    let goals_data = storage.load_goals(user).await?;
    let reviews_data = storage.load_reviews(user).await?;
    let obstacles_data = storage.load_obstacles(user).await?;
    let patterns = stored_patterns(storage, user).await?;

    let Some(goal) = goals_data.find(goal_id) else {
        return Ok(translate(
            locale,
            "goals.notFound",
            &[("id", goal_id.to_string())],
        ));
    };

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# Coaching for: {}", goal.title));
    lines.push(String::new());

    if let Some(identity) = &goal.identity {
        lines.push(translate(
            locale,
            "coaching.identityReminder",
            &[("identity", identity.clone())],
        ));
        lines.push(String::new());
    }

    if goal_risk(storage, user, goal_id, now).await?.is_some() {
        if let Some(days) = days_since_last_review(now.date_naive(), goal.last_review) {
            if days > 3 {
                lines.push(translate(
                    locale,
                    "coaching.riskAlert",
                    &[("days", days.to_string())],
                ));
                lines.push(translate(locale, "coaching.suggestion", &[]));
                lines.push(String::new());
            }
        }
    }

    let mut recent: Vec<&Review> = reviews_data
        .reviews
        .iter()
        .filter(|r| &r.goal_id == goal_id)
        .collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(5);

    if recent.len() >= 3 {
        let exceeding = recent
            .iter()
            .filter(|r| r.rating == stride_core::ReviewRating::Exceeding)
            .count();
        let struggling = recent.iter().filter(|r| !r.rating.is_success()).count();

        let key = if exceeding >= 3 {
            "coaching.greatProgress"
        } else if struggling >= 3 {
            "coaching.needHelp"
        } else {
            "coaching.keepGoing"
        };
        lines.push(translate(locale, key, &[]));
        lines.push(String::new());
    }

    if let Some(suggestion) = goal_target_suggestion(storage, user, goal_id, now).await? {
        lines.push(format!(
            "**Target suggestion:** {} → {} {}",
            suggestion.current_target, suggestion.suggested_target, suggestion.unit
        ));
        lines.push(format!("Reason: {}", suggestion.reason));
        lines.push(String::new());
    }

    let relevant: Vec<_> = patterns
        .iter()
        .filter(|p| p.applies_to.contains(goal_id))
        .collect();
    if !relevant.is_empty() {
        lines.push("**Patterns detected:**".to_string());
        for pattern in relevant {
            lines.push(translate(
                locale,
                "coaching.patternDetected",
                &[("description", pattern.description.clone())],
            ));
            if let Some(suggestion) = &pattern.suggestion {
                lines.push(translate(
                    locale,
                    "coaching.suggestionAction",
                    &[("suggestion", suggestion.clone())],
                ));
            }
        }
        lines.push(String::new());
    }

    let open: Vec<_> = obstacles_data
        .obstacles
        .iter()
        .filter(|o| &o.goal_id == goal_id && !o.resolved)
        .collect();
    if !open.is_empty() {
        lines.push("**Current obstacles:**".to_string());
        for obstacle in open {
            lines.push(format!("• {}", obstacle.description));
        }
        lines.push(String::new());
    }

    let wins: Vec<&String> = recent
        .iter()
        .flat_map(|r| r.wins.iter().flatten())
        .take(3)
        .collect();
    if !wins.is_empty() {
        lines.push("**Recent wins:**".to_string());
        for win in wins {
            lines.push(format!("• {win}"));
        }
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push(format!("**Remember your WHY:** {}", goal.why));

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stride_storage::MemoryStorage;

    #[tokio::test]
    async fn missing_goal_yields_translated_message() {
        let storage = MemoryStorage::new();
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();

        let text = generate_coaching(&storage, "alice", &GoalId::from("ghost"), Locale::En, now)
            .await
            .unwrap();
        assert_eq!(text, "Goal ghost not found.");
    }
}
