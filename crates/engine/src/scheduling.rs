//! Scheduling policy - pure functions, no state.
//!
//! The policy shrinks the review horizon when a goal is struggling and
//! stretches it as the goal matures: a rating maps to a base interval,
//! and maturity 0..=5 lengthens any interval by up to 100%.

use chrono::Duration;
use stride_core::{Date, Goal, GoalId, Review, ReviewRating};

/// Base check-in interval in days for a review rating.
pub fn interval_for_rating(rating: ReviewRating) -> u32 {
    match rating {
        ReviewRating::Struggling => 1,
        ReviewRating::Slow => 3,
        ReviewRating::OnTrack => 7,
        ReviewRating::Exceeding => 14,
    }
}

/// Next check-in date from a base interval, adjusted for maturity.
///
/// `adjusted = round(base * (1 + maturity * 0.2))` days after `from`.
pub fn next_check_in(from: Date, base_interval: u32, maturity: u8) -> Date {
    let adjusted = (base_interval as f64 * (1.0 + maturity as f64 * 0.2)).round() as i64;
    from + Duration::days(adjusted)
}

/// Next check-in date straight from a rating.
pub fn next_check_in_from_rating(from: Date, rating: ReviewRating, maturity: u8) -> Date {
    next_check_in(from, interval_for_rating(rating), maturity)
}

/// Whole days since the last review, `None` when never reviewed.
///
/// A `None` signals maximal risk to upstream consumers.
pub fn days_since_last_review(today: Date, last_review: Option<Date>) -> Option<i64> {
    last_review.map(|last| (today - last).num_days())
}

/// Whether a check-in has been missed.
///
/// An absent check-in date counts as overdue.
pub fn is_overdue(today: Date, next_check_in: Option<Date>) -> bool {
    match next_check_in {
        None => true,
        Some(date) => today > date,
    }
}

/// Apply the maturity progression rule.
///
/// Maturity grows by one level, capped at [`Goal::MAX_MATURITY`], once a
/// goal has four or more consecutive successful reviews; otherwise it is
/// unchanged. Maturity never decreases here.
pub fn maturity_increase(current: u8, consecutive_successes: u32) -> u8 {
    if consecutive_successes >= 4 && current < Goal::MAX_MATURITY {
        (current + 1).min(Goal::MAX_MATURITY)
    } else {
        current
    }
}

/// Count the most-recent-first run of successful reviews for a goal.
///
/// The run ends at the first rating that is not on-track or exceeding; a
/// single struggling or slow review resets the count.
pub fn consecutive_successes(reviews: &[Review], goal_id: &GoalId) -> u32 {
    let mut goal_reviews: Vec<&Review> =
        reviews.iter().filter(|r| &r.goal_id == goal_id).collect();
    goal_reviews.sort_by(|a, b| b.date.cmp(&a.date));

    let mut count = 0;
    for review in goal_reviews {
        if review.rating.is_success() {
            count += 1;
        } else {
            break;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stride_core::ReviewId;

    fn d(y: i32, m: u32, day: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn review(goal_id: &str, date: Date, rating: ReviewRating) -> Review {
        Review {
            id: ReviewId::new(),
            goal_id: GoalId::from(goal_id),
            date,
            rating,
            evidence: String::new(),
            value: None,
            obstacles: None,
            wins: None,
        }
    }

    #[test]
    fn interval_lookup_covers_every_rating() {
        assert_eq!(interval_for_rating(ReviewRating::Struggling), 1);
        assert_eq!(interval_for_rating(ReviewRating::Slow), 3);
        assert_eq!(interval_for_rating(ReviewRating::OnTrack), 7);
        assert_eq!(interval_for_rating(ReviewRating::Exceeding), 14);
    }

    #[test]
    fn zero_maturity_is_identity() {
        let from = d(2026, 3, 2);
        assert_eq!(next_check_in(from, 7, 0), d(2026, 3, 9));
        assert_eq!(next_check_in(from, 1, 0), d(2026, 3, 3));
    }

    #[test]
    fn maturity_stretches_interval() {
        let from = d(2026, 3, 2);
        // round(7 * (1 + 0.2m)) for m = 0..=5
        let expected = [7, 8, 10, 11, 13, 14];
        let mut last = from;
        for (m, days) in expected.iter().enumerate() {
            let next = next_check_in(from, 7, m as u8);
            assert_eq!(next, from + Duration::days(*days));
            assert!(next >= last, "non-decreasing in maturity");
            last = next;
        }
    }

    #[test]
    fn rating_composition() {
        let from = d(2026, 3, 2);
        assert_eq!(
            next_check_in_from_rating(from, ReviewRating::Exceeding, 5),
            // round(14 * 2.0) = 28
            from + Duration::days(28)
        );
    }

    #[test]
    fn days_since_floor_and_never() {
        let today = d(2026, 3, 10);
        assert_eq!(days_since_last_review(today, None), None);
        assert_eq!(days_since_last_review(today, Some(d(2026, 3, 3))), Some(7));
        assert_eq!(days_since_last_review(today, Some(today)), Some(0));
    }

    #[test]
    fn overdue_is_strict() {
        let today = d(2026, 3, 10);
        assert!(is_overdue(today, None));
        assert!(is_overdue(today, Some(d(2026, 3, 9))));
        assert!(!is_overdue(today, Some(today)));
        assert!(!is_overdue(today, Some(d(2026, 3, 11))));
    }

    #[test]
    fn maturity_rules() {
        assert_eq!(maturity_increase(0, 3), 0);
        assert_eq!(maturity_increase(0, 4), 1);
        assert_eq!(maturity_increase(2, 9), 3);
        assert_eq!(maturity_increase(5, 10), 5);
    }

    #[test]
    fn consecutive_run_stops_at_first_failure() {
        let reviews = vec![
            review("run", d(2026, 3, 1), ReviewRating::Exceeding),
            review("run", d(2026, 3, 2), ReviewRating::Slow),
            review("run", d(2026, 3, 3), ReviewRating::OnTrack),
            review("run", d(2026, 3, 4), ReviewRating::Exceeding),
            // Other goal's failure must not interfere
            review("read", d(2026, 3, 5), ReviewRating::Struggling),
        ];
        assert_eq!(consecutive_successes(&reviews, &GoalId::from("run")), 2);
        assert_eq!(consecutive_successes(&reviews, &GoalId::from("read")), 0);
        assert_eq!(consecutive_successes(&reviews, &GoalId::from("absent")), 0);
    }
}
