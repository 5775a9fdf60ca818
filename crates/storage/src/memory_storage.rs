//! In-memory storage implementation.
//!
//! Backs the engine in tests and embedded scenarios where nothing should
//! touch the filesystem. Session entries are retained so tests can assert
//! on the audit trail.

use std::collections::HashMap;

use async_trait::async_trait;
use stride_core::{
    GoalsData, ObstaclesData, PatternsData, ReviewsData, SessionEntry, UserPreferences,
};

use super::{Result, Storage};

/// HashMap-backed storage, keyed by user id.
#[derive(Default)]
pub struct MemoryStorage {
    goals: HashMap<String, GoalsData>,
    reviews: HashMap<String, ReviewsData>,
    patterns: HashMap<String, PatternsData>,
    obstacles: HashMap<String, ObstaclesData>,
    preferences: HashMap<String, UserPreferences>,
    sessions: HashMap<String, Vec<SessionEntry>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All session entries recorded for a user, in append order.
    pub fn session_entries(&self, user: &str) -> &[SessionEntry] {
        self.sessions.get(user).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load_goals(&self, user: &str) -> Result<GoalsData> {
        Ok(self
            .goals
            .get(user)
            .cloned()
            .unwrap_or_else(|| GoalsData::empty(chrono::Utc::now())))
    }

    async fn save_goals(&mut self, user: &str, data: &GoalsData) -> Result<()> {
        self.goals.insert(user.to_string(), data.clone());
        Ok(())
    }

    async fn load_reviews(&self, user: &str) -> Result<ReviewsData> {
        Ok(self
            .reviews
            .get(user)
            .cloned()
            .unwrap_or_else(|| ReviewsData::empty(chrono::Utc::now())))
    }

    async fn save_reviews(&mut self, user: &str, data: &ReviewsData) -> Result<()> {
        self.reviews.insert(user.to_string(), data.clone());
        Ok(())
    }

    async fn load_patterns(&self, user: &str) -> Result<PatternsData> {
        Ok(self
            .patterns
            .get(user)
            .cloned()
            .unwrap_or_else(|| PatternsData::empty(chrono::Utc::now())))
    }

    async fn save_patterns(&mut self, user: &str, data: &PatternsData) -> Result<()> {
        self.patterns.insert(user.to_string(), data.clone());
        Ok(())
    }

    async fn load_obstacles(&self, user: &str) -> Result<ObstaclesData> {
        Ok(self
            .obstacles
            .get(user)
            .cloned()
            .unwrap_or_else(|| ObstaclesData::empty(chrono::Utc::now())))
    }

    async fn save_obstacles(&mut self, user: &str, data: &ObstaclesData) -> Result<()> {
        self.obstacles.insert(user.to_string(), data.clone());
        Ok(())
    }

    async fn load_preferences(&self, user: &str) -> Result<UserPreferences> {
        Ok(self.preferences.get(user).cloned().unwrap_or_default())
    }

    async fn save_preferences(&mut self, user: &str, prefs: &UserPreferences) -> Result<()> {
        self.preferences.insert(user.to_string(), prefs.clone());
        Ok(())
    }

    async fn append_session_entry(&mut self, user: &str, entry: &SessionEntry) -> Result<()> {
        self.sessions
            .entry(user.to_string())
            .or_default()
            .push(entry.clone());
        Ok(())
    }
}
