//! Review ingestion and period progress accounting.

use chrono::{Datelike, Duration, NaiveDate};
use stride_core::{
    Date, Goal, GoalFrequency, GoalId, GoalType, Review, ReviewId, ReviewRating, SessionEntry,
    Time,
};
use stride_storage::Storage;

use crate::scheduling;
use crate::{EngineError, GoalService, Result};

/// A rating event to record against a goal.
#[derive(Debug, Clone)]
pub struct ReviewInput {
    /// The goal being reviewed
    pub goal_id: GoalId,
    /// How it went
    pub rating: ReviewRating,
    /// What actually happened
    pub evidence: String,
    /// Reported value, for measurable goals
    pub value: Option<f64>,
    /// Obstacles encountered
    pub obstacles: Option<Vec<String>>,
    /// Wins worth remembering
    pub wins: Option<Vec<String>>,
    /// Calendar date of the review; defaults to today, may be backdated
    pub date: Option<Date>,
}

/// Result of submitting a review.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    /// The recorded review
    pub review: Review,
    /// The goal after rescheduling and progress accounting
    pub goal: Goal,
    /// Period accounting for the presentation layer
    pub summary: PeriodSummary,
}

/// Progress accounting for the goal's current period.
#[derive(Debug, Clone)]
pub struct PeriodSummary {
    /// Value sum (measurable) or distinct active days (other types) in the
    /// current period
    pub current: f64,
    /// Target for the period, from the goal
    pub target: f64,
    /// Count of distinct periods with at least one review, across all
    /// history (not a consecutive run; see module docs)
    pub streak: usize,
    /// Distinct review dates inside the current period, sorted
    pub unique_days: Vec<Date>,
    /// Whether this submission raised the goal's maturity
    pub maturity_increased: bool,
}

/// Start of the period containing `today` for a frequency.
fn period_start(frequency: GoalFrequency, today: Date) -> Date {
    match frequency {
        GoalFrequency::Daily => today,
        GoalFrequency::Weekly => week_start(today),
        GoalFrequency::Monthly => first_of_month(today.year(), today.month()),
        GoalFrequency::Quarterly => {
            let quarter_month = (today.month0() / 3) * 3 + 1;
            first_of_month(today.year(), quarter_month)
        }
        GoalFrequency::Yearly => first_of_month(today.year(), 1),
    }
}

/// Monday of the week containing `date`.
fn week_start(date: Date) -> Date {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn first_of_month(year: i32, month: u32) -> Date {
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date")
}

/// Bucketing key for streak accounting.
///
/// Weekly goals bucket by week start, monthly by `YYYY-MM`, and every
/// other frequency by the raw review date.
fn period_key(frequency: GoalFrequency, date: Date) -> String {
    match frequency {
        GoalFrequency::Weekly => week_start(date).to_string(),
        GoalFrequency::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
        _ => date.to_string(),
    }
}

/// Recompute period progress and streak for a goal from its full history.
fn period_progress(reviews: &[Review], goal: &Goal, today: Date) -> (f64, usize, Vec<Date>) {
    let start = period_start(goal.frequency, today);

    let period_reviews: Vec<&Review> = reviews
        .iter()
        .filter(|r| r.goal_id == goal.id && r.date >= start && r.date <= today)
        .collect();

    // Repeated same-day logs must not inflate habit progress
    let mut unique_days: Vec<Date> = period_reviews.iter().map(|r| r.date).collect();
    unique_days.sort();
    unique_days.dedup();

    let current = if goal.goal_type == GoalType::Measurable {
        period_reviews.iter().map(|r| r.value.unwrap_or(0.0)).sum()
    } else {
        unique_days.len() as f64
    };

    // Streak counts distinct active periods across all history. A gap does
    // not reset it, so this is a lifetime activity count rather than a
    // consecutive run (kept for compatibility with the stored data).
    let streak = reviews
        .iter()
        .filter(|r| r.goal_id == goal.id)
        .map(|r| period_key(goal.frequency, r.date))
        .collect::<std::collections::HashSet<_>>()
        .len();

    (current, streak, unique_days)
}

impl<S: Storage> GoalService<S> {
    /// Record a review and recompute the goal's schedule and progress.
    ///
    /// The next check-in is computed from today (not the review's possibly
    /// backdated date) using the goal's pre-update maturity; maturity then
    /// advances when the review completes a run of four successes. Nothing
    /// is persisted when the goal does not exist.
    pub async fn submit_review(
        &mut self,
        user: &str,
        input: ReviewInput,
        now: Time,
    ) -> Result<ReviewOutcome> {
        let mut goals_data = self.storage.load_goals(user).await?;
        let mut reviews_data = self.storage.load_reviews(user).await?;

        let goal = goals_data
            .find_mut(&input.goal_id)
            .ok_or_else(|| EngineError::NotFound(input.goal_id.to_string()))?;

        let today = now.date_naive();
        let review_date = input.date.unwrap_or(today);

        let review = Review {
            id: ReviewId::new(),
            goal_id: input.goal_id.clone(),
            date: review_date,
            rating: input.rating,
            evidence: input.evidence,
            value: input.value,
            obstacles: input.obstacles,
            wins: input.wins,
        };
        reviews_data.reviews.push(review.clone());

        goal.last_review = Some(review_date);
        goal.next_check_in = Some(scheduling::next_check_in_from_rating(
            today,
            input.rating,
            goal.maturity,
        ));
        goal.updated_at = now;

        let consecutive = scheduling::consecutive_successes(&reviews_data.reviews, &goal.id);
        let new_maturity = scheduling::maturity_increase(goal.maturity, consecutive);
        let maturity_increased = new_maturity > goal.maturity;
        goal.maturity = new_maturity;

        let (current, streak, unique_days) = period_progress(&reviews_data.reviews, goal, today);

        match goal.goal_type {
            GoalType::Habit => goal.progress = current,
            GoalType::Measurable => {
                if let Some(value) = input.value {
                    goal.progress = value;
                }
            }
            GoalType::Milestone => {}
        }

        let updated_goal = goal.clone();

        reviews_data.last_updated = now;
        goals_data.last_updated = now;
        self.storage.save_reviews(user, &reviews_data).await?;
        self.storage.save_goals(user, &goals_data).await?;

        self.audit(
            user,
            SessionEntry::for_goal(
                now,
                "review",
                updated_goal.id.clone(),
                serde_json::json!({
                    "rating": input.rating,
                    "value": input.value,
                    "date": review_date,
                }),
            ),
        )
        .await;

        Ok(ReviewOutcome {
            review,
            summary: PeriodSummary {
                current,
                target: updated_goal.target,
                streak,
                unique_days,
                maturity_increased,
            },
            goal: updated_goal,
        })
    }

    /// Most recent reviews for a goal, newest first.
    pub async fn review_history(
        &self,
        user: &str,
        goal_id: &GoalId,
        limit: usize,
    ) -> Result<Vec<Review>> {
        let data = self.storage.load_reviews(user).await?;
        let mut reviews: Vec<Review> = data
            .reviews
            .into_iter()
            .filter(|r| &r.goal_id == goal_id)
            .collect();
        reviews.sort_by(|a, b| b.date.cmp(&a.date));
        reviews.truncate(limit);
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::tests::{habit_input, test_now};
    use chrono::{TimeZone, Utc};
    use stride_storage::MemoryStorage;

    fn review_input(goal_id: &GoalId, rating: ReviewRating) -> ReviewInput {
        ReviewInput {
            goal_id: goal_id.clone(),
            rating,
            evidence: "did it".to_string(),
            value: None,
            obstacles: None,
            wins: None,
            date: None,
        }
    }

    #[test]
    fn period_windows() {
        // 2026-03-18 is a Wednesday
        let day = NaiveDate::from_ymd_opt(2026, 3, 18).unwrap();
        assert_eq!(period_start(GoalFrequency::Daily, day), day);
        assert_eq!(
            period_start(GoalFrequency::Weekly, day),
            NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
        );
        assert_eq!(
            period_start(GoalFrequency::Monthly, day),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert_eq!(
            period_start(GoalFrequency::Quarterly, day),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert_eq!(
            period_start(GoalFrequency::Yearly, day),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        // November sits in the Oct-Dec quarter
        let nov = NaiveDate::from_ymd_opt(2026, 11, 5).unwrap();
        assert_eq!(
            period_start(GoalFrequency::Quarterly, nov),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
        );
    }

    #[test]
    fn monday_stays_put() {
        let monday = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        assert_eq!(week_start(monday), monday);
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 22).unwrap();
        assert_eq!(week_start(sunday), monday);
    }

    #[tokio::test]
    async fn weekly_habit_counts_distinct_days() {
        let mut service = GoalService::new(MemoryStorage::new());
        // Monday of an arbitrary week
        let monday = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();

        let goal = service.create_goal("alice", habit_input("Run"), monday).await.unwrap();

        for offset in [0, 1, 2] {
            let at = monday + Duration::days(offset);
            service
                .submit_review("alice", review_input(&goal.id, ReviewRating::OnTrack), at)
                .await
                .unwrap();
        }
        // Second log on the same day must not inflate progress
        let outcome = service
            .submit_review(
                "alice",
                review_input(&goal.id, ReviewRating::OnTrack),
                monday + Duration::days(2),
            )
            .await
            .unwrap();

        assert_eq!(outcome.goal.progress, 3.0);
        assert_eq!(outcome.summary.current, 3.0);
        assert_eq!(outcome.summary.unique_days.len(), 3);
    }

    #[tokio::test]
    async fn measurable_sums_window_but_reports_last_value() {
        let mut service = GoalService::new(MemoryStorage::new());
        let monday = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();

        let mut input = habit_input("Pages");
        input.goal_type = GoalType::Measurable;
        input.target = 100.0;
        input.unit = "pages".to_string();
        let goal = service.create_goal("alice", input, monday).await.unwrap();

        let mut first = review_input(&goal.id, ReviewRating::OnTrack);
        first.value = Some(20.0);
        service.submit_review("alice", first, monday).await.unwrap();

        let mut second = review_input(&goal.id, ReviewRating::OnTrack);
        second.value = Some(30.0);
        let outcome = service
            .submit_review("alice", second, monday + Duration::days(1))
            .await
            .unwrap();

        // Window sum feeds the summary; progress takes the explicit value
        assert_eq!(outcome.summary.current, 50.0);
        assert_eq!(outcome.goal.progress, 30.0);
    }

    #[tokio::test]
    async fn maturity_bumps_exactly_on_fourth_success() {
        let mut service = GoalService::new(MemoryStorage::new());
        let start = test_now();

        let goal = service.create_goal("alice", habit_input("Run"), start).await.unwrap();

        for i in 0..3 {
            let outcome = service
                .submit_review(
                    "alice",
                    review_input(&goal.id, ReviewRating::OnTrack),
                    start + Duration::days(i),
                )
                .await
                .unwrap();
            assert_eq!(outcome.goal.maturity, 0, "no bump before four successes");
        }

        let outcome = service
            .submit_review(
                "alice",
                review_input(&goal.id, ReviewRating::Exceeding),
                start + Duration::days(3),
            )
            .await
            .unwrap();
        assert_eq!(outcome.goal.maturity, 1);
        assert!(outcome.summary.maturity_increased);

        // A fifth consecutive success keeps the run >= 4, so maturity
        // moves again on every submission until the cap
        let outcome = service
            .submit_review(
                "alice",
                review_input(&goal.id, ReviewRating::OnTrack),
                start + Duration::days(4),
            )
            .await
            .unwrap();
        assert_eq!(outcome.goal.maturity, 2);
    }

    #[tokio::test]
    async fn failure_resets_the_run() {
        let mut service = GoalService::new(MemoryStorage::new());
        let start = test_now();

        let goal = service.create_goal("alice", habit_input("Run"), start).await.unwrap();

        for i in 0..3 {
            service
                .submit_review(
                    "alice",
                    review_input(&goal.id, ReviewRating::OnTrack),
                    start + Duration::days(i),
                )
                .await
                .unwrap();
        }
        let outcome = service
            .submit_review(
                "alice",
                review_input(&goal.id, ReviewRating::Struggling),
                start + Duration::days(3),
            )
            .await
            .unwrap();
        assert_eq!(outcome.goal.maturity, 0);
        // Struggling shrinks the horizon to one day
        assert_eq!(
            outcome.goal.next_check_in,
            Some((start + Duration::days(3)).date_naive() + Duration::days(1))
        );
    }

    #[tokio::test]
    async fn backdated_review_schedules_from_today() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let goal = service.create_goal("alice", habit_input("Run"), now).await.unwrap();

        let mut input = review_input(&goal.id, ReviewRating::OnTrack);
        input.date = Some(now.date_naive() - Duration::days(3));
        let outcome = service.submit_review("alice", input, now).await.unwrap();

        assert_eq!(outcome.review.date, now.date_naive() - Duration::days(3));
        assert_eq!(outcome.goal.last_review, Some(outcome.review.date));
        // Interval base is today, not the backdated review date
        assert_eq!(
            outcome.goal.next_check_in,
            Some(now.date_naive() + Duration::days(7))
        );
    }

    #[tokio::test]
    async fn streak_counts_distinct_weeks_over_all_history() {
        let mut service = GoalService::new(MemoryStorage::new());
        let monday = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();

        let goal = service.create_goal("alice", habit_input("Run"), monday).await.unwrap();

        // One review ten weeks back, one now; gap does not reset
        let mut old = review_input(&goal.id, ReviewRating::OnTrack);
        old.date = Some(monday.date_naive() - Duration::weeks(10));
        service.submit_review("alice", old, monday).await.unwrap();

        let outcome = service
            .submit_review("alice", review_input(&goal.id, ReviewRating::OnTrack), monday)
            .await
            .unwrap();
        assert_eq!(outcome.summary.streak, 2);
    }

    #[tokio::test]
    async fn unknown_goal_leaves_history_untouched() {
        let mut service = GoalService::new(MemoryStorage::new());
        let now = test_now();

        let before = service.storage().load_reviews("alice").await.unwrap();
        let err = service
            .submit_review(
                "alice",
                review_input(&GoalId::from("ghost"), ReviewRating::OnTrack),
                now,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));

        let after = service.storage().load_reviews("alice").await.unwrap();
        assert_eq!(before.reviews.len(), after.reviews.len());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_limited() {
        let mut service = GoalService::new(MemoryStorage::new());
        let start = test_now();

        let goal = service.create_goal("alice", habit_input("Run"), start).await.unwrap();
        for i in 0..5 {
            service
                .submit_review(
                    "alice",
                    review_input(&goal.id, ReviewRating::OnTrack),
                    start + Duration::days(i),
                )
                .await
                .unwrap();
        }

        let history = service.review_history("alice", &goal.id, 3).await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].date >= w[1].date));
    }
}
