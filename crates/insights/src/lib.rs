//! Stride insights - advisory projections over goal and review history.
//!
//! Everything here is read-side: analyzers consume a snapshot of goals and
//! reviews and produce advisory text or suggestions. Nothing feeds back
//! into the lifecycle, unlock, or scheduling core.

#![warn(missing_docs)]

pub mod patterns;
pub mod predictions;
pub mod suggestions;
pub mod coaching;

pub use patterns::{analyze_patterns, stored_patterns};
pub use predictions::{predict_risks, goal_risk, RiskLevel, RiskPrediction};
pub use suggestions::{analyze_targets, goal_target_suggestion, TargetDirection, TargetSuggestion};
pub use coaching::generate_coaching;
