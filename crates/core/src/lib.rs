//! Stride core data models.
//!
//! This crate defines the entities shared across the goal tracking
//! system: goals, reviews, patterns, obstacles, and user preferences.

#![warn(missing_docs)]

// Core identities
mod id;

// Tracked entities
mod goal;
mod review;
mod pattern;
mod obstacle;

// User-level data
mod preferences;
mod session;

// Re-exports
pub use id::{GoalId, ReviewId, ObstacleId, PatternId};

pub use goal::{Goal, GoalType, GoalFrequency, GoalStatus, GoalsData};
pub use review::{Review, ReviewRating, ReviewsData};
pub use pattern::{Pattern, PatternType, PatternsData};
pub use obstacle::{Obstacle, ObstaclesData};
pub use preferences::{UserPreferences, Locale};
pub use session::SessionEntry;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

/// Calendar date type (review dates, check-in dates)
pub type Date = chrono::NaiveDate;
