//! Stride engine - goal lifecycle, unlock graph, and adaptive scheduling.
//!
//! The engine owns the non-trivial policy of the system: how check-in
//! intervals react to review ratings, how maturity grows with sustained
//! success, when locked goals become available, and how period progress
//! and streaks are accounted. Storage, message formatting, and reminder
//! registration are collaborators, not part of this crate.
//!
//! Every operation takes an explicit reference instant (`now`); the engine
//! never reads the wall clock itself.

#![warn(missing_docs)]

mod error;
mod service;

pub mod scheduling;

// Operation groups on [`GoalService`]
mod goals;
mod unlock;
mod milestones;
mod reviews;
mod obstacles;

pub use error::{EngineError, Result};
pub use service::{EngineConfig, GoalService};

pub use goals::{CreateGoalInput, GoalFilter, GoalUpdate};
pub use milestones::Achievement;
pub use reviews::{PeriodSummary, ReviewInput, ReviewOutcome};
pub use unlock::can_unlock;
