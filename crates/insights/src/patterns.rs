//! Pattern detection over review history.
//!
//! Three analyzers run over the active goals: weekday success/risk rates,
//! best consistency runs, and same-day goal correlations. Results are
//! deduplicated and stored as the user's current pattern set.

use std::collections::HashMap;

use chrono::Datelike;
use stride_core::{Goal, GoalId, GoalStatus, Pattern, PatternId, PatternType, Review, Time};
use stride_storage::{Result, Storage};

/// Minimum review history before analysis produces anything.
const MIN_HISTORY: usize = 10;

const DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

fn weekday_patterns(reviews: &[Review], goal_ids: &[GoalId], now: Time) -> Vec<Pattern> {
    let mut totals = [0u32; 7];
    let mut successes = [0u32; 7];

    for review in reviews {
        if !goal_ids.contains(&review.goal_id) {
            continue;
        }
        let day = review.date.weekday().num_days_from_sunday() as usize;
        totals[day] += 1;
        if review.rating.is_success() {
            successes[day] += 1;
        }
    }

    let mut patterns = Vec::new();
    for day in 0..7 {
        if totals[day] < 3 {
            continue;
        }
        let rate = successes[day] as f64 / totals[day] as f64;
        let confidence = (totals[day] as f64 / 10.0).min(1.0);

        if rate >= 0.8 {
            patterns.push(Pattern {
                id: PatternId::new(),
                pattern_type: PatternType::Success,
                description: format!(
                    "You perform well on {}s ({}% success rate)",
                    DAY_NAMES[day],
                    (rate * 100.0).round()
                ),
                confidence,
                applies_to: goal_ids.to_vec(),
                detected_at: now,
                suggestion: Some(format!(
                    "Consider scheduling important goals on {}s",
                    DAY_NAMES[day]
                )),
            });
        } else if rate <= 0.3 && totals[day] >= 5 {
            patterns.push(Pattern {
                id: PatternId::new(),
                pattern_type: PatternType::Risk,
                description: format!(
                    "{}s are challenging ({}% success rate)",
                    DAY_NAMES[day],
                    (rate * 100.0).round()
                ),
                confidence,
                applies_to: goal_ids.to_vec(),
                detected_at: now,
                suggestion: Some(format!(
                    "Consider lighter goals or rest on {}s",
                    DAY_NAMES[day]
                )),
            });
        }
    }
    patterns
}

fn consistency_patterns(reviews: &[Review], goals: &[Goal], now: Time) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    for goal in goals {
        let mut goal_reviews: Vec<&Review> =
            reviews.iter().filter(|r| r.goal_id == goal.id).collect();
        if goal_reviews.len() < 5 {
            continue;
        }
        goal_reviews.sort_by(|a, b| a.date.cmp(&b.date));

        let mut current = 0u32;
        let mut best = 0u32;
        for review in goal_reviews {
            if review.rating.is_success() {
                current += 1;
                best = best.max(current);
            } else {
                current = 0;
            }
        }

        if best >= 7 {
            patterns.push(Pattern {
                id: PatternId::new(),
                pattern_type: PatternType::Success,
                description: format!(
                    "Strong consistency on \"{}\" ({} day streak achieved)",
                    goal.title, best
                ),
                confidence: 0.9,
                applies_to: vec![goal.id.clone()],
                detected_at: now,
                suggestion: Some("Keep momentum! Consider increasing the challenge.".to_string()),
            });
        }
    }
    patterns
}

fn correlation_patterns(reviews: &[Review], goals: &[Goal], now: Time) -> Vec<Pattern> {
    let mut by_date: HashMap<stride_core::Date, Vec<&Review>> = HashMap::new();
    for review in reviews {
        by_date.entry(review.date).or_default().push(review);
    }

    let mut patterns = Vec::new();
    for (i, first) in goals.iter().enumerate() {
        for second in &goals[i + 1..] {
            let mut both_total = 0u32;
            let mut both_success = 0u32;

            for day_reviews in by_date.values() {
                let a = day_reviews.iter().find(|r| r.goal_id == first.id);
                let b = day_reviews.iter().find(|r| r.goal_id == second.id);
                if let (Some(a), Some(b)) = (a, b) {
                    both_total += 1;
                    if a.rating.is_success() && b.rating.is_success() {
                        both_success += 1;
                    }
                }
            }

            if both_total >= 5 && both_success as f64 / both_total as f64 >= 0.8 {
                patterns.push(Pattern {
                    id: PatternId::new(),
                    pattern_type: PatternType::Opportunity,
                    description: format!(
                        "\"{}\" and \"{}\" work well together",
                        first.title, second.title
                    ),
                    confidence: (both_total as f64 / 15.0).min(1.0),
                    applies_to: vec![first.id.clone(), second.id.clone()],
                    detected_at: now,
                    suggestion: Some(
                        "These goals reinforce each other. Keep them paired!".to_string(),
                    ),
                });
            }
        }
    }
    patterns
}

fn dedup(patterns: Vec<Pattern>) -> Vec<Pattern> {
    let mut seen = std::collections::HashSet::new();
    patterns
        .into_iter()
        .filter(|p| seen.insert((p.pattern_type as u8, p.description.clone())))
        .collect()
}

/// Run all analyzers and persist the resulting pattern set.
///
/// Returns nothing until at least ten reviews exist; thin history produces
/// noise rather than signal.
pub async fn analyze_patterns<S: Storage>(
    storage: &mut S,
    user: &str,
    now: Time,
) -> Result<Vec<Pattern>> {
    let goals_data = storage.load_goals(user).await?;
    let reviews_data = storage.load_reviews(user).await?;

    if reviews_data.reviews.len() < MIN_HISTORY {
        return Ok(Vec::new());
    }

    let active: Vec<Goal> = goals_data
        .goals
        .into_iter()
        .filter(|g| g.status == GoalStatus::Active)
        .collect();
    let goal_ids: Vec<GoalId> = active.iter().map(|g| g.id.clone()).collect();

    let mut all = weekday_patterns(&reviews_data.reviews, &goal_ids, now);
    all.extend(consistency_patterns(&reviews_data.reviews, &active, now));
    all.extend(correlation_patterns(&reviews_data.reviews, &active, now));
    let unique = dedup(all);

    tracing::debug!("detected {} patterns for {}", unique.len(), user);

    let mut stored = storage.load_patterns(user).await?;
    stored.patterns = unique.clone();
    stored.last_analyzed = now;
    storage.save_patterns(user, &stored).await?;

    Ok(unique)
}

/// The most recently stored pattern set.
pub async fn stored_patterns<S: Storage>(storage: &S, user: &str) -> Result<Vec<Pattern>> {
    Ok(storage.load_patterns(user).await?.patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use stride_core::{ReviewId, ReviewRating};

    fn review(goal: &str, date: stride_core::Date, rating: ReviewRating) -> Review {
        Review {
            id: ReviewId::new(),
            goal_id: GoalId::from(goal),
            date,
            rating,
            evidence: String::new(),
            value: None,
            obstacles: None,
            wins: None,
        }
    }

    #[test]
    fn strong_weekdays_surface_as_success() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        let ids = vec![GoalId::from("run")];
        // Three Mondays, all successful
        let reviews: Vec<Review> = [2, 9, 16]
            .iter()
            .map(|d| {
                review(
                    "run",
                    NaiveDate::from_ymd_opt(2026, 3, *d).unwrap(),
                    ReviewRating::OnTrack,
                )
            })
            .collect();

        let patterns = weekday_patterns(&reviews, &ids, now);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].pattern_type, PatternType::Success);
        assert!(patterns[0].description.contains("Monday"));
    }

    #[test]
    fn short_history_stays_quiet() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        let ids = vec![GoalId::from("run")];
        let reviews = vec![review(
            "run",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            ReviewRating::OnTrack,
        )];
        assert!(weekday_patterns(&reviews, &ids, now).is_empty());
    }

    #[test]
    fn duplicate_descriptions_collapse() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        let mk = || Pattern {
            id: PatternId::new(),
            pattern_type: PatternType::Success,
            description: "same".to_string(),
            confidence: 1.0,
            applies_to: Vec::new(),
            detected_at: now,
            suggestion: None,
        };
        assert_eq!(dedup(vec![mk(), mk()]).len(), 1);
    }
}
