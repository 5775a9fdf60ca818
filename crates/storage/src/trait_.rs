//! Storage trait abstraction.

use async_trait::async_trait;
use stride_core::{
    GoalsData, ObstaclesData, PatternsData, ReviewsData, SessionEntry, UserPreferences,
};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for Stride data.
///
/// Every collection belongs to exactly one user and is loaded and persisted
/// as a whole; there is no row-level contract. Missing data loads as an
/// empty collection, never as an error.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Goals ===

    /// Load a user's whole goal collection.
    async fn load_goals(&self, user: &str) -> Result<GoalsData>;

    /// Persist a user's whole goal collection.
    async fn save_goals(&mut self, user: &str, data: &GoalsData) -> Result<()>;

    // === Reviews ===

    /// Load a user's whole review history.
    async fn load_reviews(&self, user: &str) -> Result<ReviewsData>;

    /// Persist a user's whole review history.
    async fn save_reviews(&mut self, user: &str, data: &ReviewsData) -> Result<()>;

    // === Patterns ===

    /// Load a user's stored patterns.
    async fn load_patterns(&self, user: &str) -> Result<PatternsData>;

    /// Persist a user's stored patterns.
    async fn save_patterns(&mut self, user: &str, data: &PatternsData) -> Result<()>;

    // === Obstacles ===

    /// Load a user's captured obstacles.
    async fn load_obstacles(&self, user: &str) -> Result<ObstaclesData>;

    /// Persist a user's captured obstacles.
    async fn save_obstacles(&mut self, user: &str, data: &ObstaclesData) -> Result<()>;

    // === Preferences ===

    /// Load a user's preferences, falling back to defaults.
    async fn load_preferences(&self, user: &str) -> Result<UserPreferences>;

    /// Persist a user's preferences.
    async fn save_preferences(&mut self, user: &str, prefs: &UserPreferences) -> Result<()>;

    // === Session log ===

    /// Append one audit entry to the user's session log.
    ///
    /// The log is write-only from the engine's point of view.
    async fn append_session_entry(&mut self, user: &str, entry: &SessionEntry) -> Result<()>;
}
