//! JSON file storage implementation.
//!
//! Stores each user's collections as whole JSON documents under
//! `<root>/users/<user>/`, with daily session logs appended as
//! line-delimited JSON under `sessions/`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use stride_core::{
    GoalsData, ObstaclesData, PatternsData, ReviewsData, SessionEntry, UserPreferences,
};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{paths, Result, Storage, StorageError};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`. Directories are created lazily on
    /// first write, so pointing at a fresh path is fine.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The root data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn load_goals(&self, user: &str) -> Result<GoalsData> {
        read_json_or(&paths::goals_file(&self.root, user), || {
            GoalsData::empty(chrono::Utc::now())
        })
        .await
    }

    async fn save_goals(&mut self, user: &str, data: &GoalsData) -> Result<()> {
        write_json(&paths::goals_file(&self.root, user), data).await
    }

    async fn load_reviews(&self, user: &str) -> Result<ReviewsData> {
        read_json_or(&paths::reviews_file(&self.root, user), || {
            ReviewsData::empty(chrono::Utc::now())
        })
        .await
    }

    async fn save_reviews(&mut self, user: &str, data: &ReviewsData) -> Result<()> {
        write_json(&paths::reviews_file(&self.root, user), data).await
    }

    async fn load_patterns(&self, user: &str) -> Result<PatternsData> {
        read_json_or(&paths::patterns_file(&self.root, user), || {
            PatternsData::empty(chrono::Utc::now())
        })
        .await
    }

    async fn save_patterns(&mut self, user: &str, data: &PatternsData) -> Result<()> {
        write_json(&paths::patterns_file(&self.root, user), data).await
    }

    async fn load_obstacles(&self, user: &str) -> Result<ObstaclesData> {
        read_json_or(&paths::obstacles_file(&self.root, user), || {
            ObstaclesData::empty(chrono::Utc::now())
        })
        .await
    }

    async fn save_obstacles(&mut self, user: &str, data: &ObstaclesData) -> Result<()> {
        write_json(&paths::obstacles_file(&self.root, user), data).await
    }

    async fn load_preferences(&self, user: &str) -> Result<UserPreferences> {
        read_json_or(&paths::preferences_file(&self.root, user), UserPreferences::default).await
    }

    async fn save_preferences(&mut self, user: &str, prefs: &UserPreferences) -> Result<()> {
        write_json(&paths::preferences_file(&self.root, user), prefs).await
    }

    async fn append_session_entry(&mut self, user: &str, entry: &SessionEntry) -> Result<()> {
        let date = entry.ts.date_naive().to_string();
        let path = paths::session_log_file(&self.root, user, &date);
        ensure_parent(&path).await?;

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}

async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}

async fn read_json_or<T, F>(path: &Path, default: F) -> Result<T>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce() -> T,
{
    match fs::read_to_string(path).await {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{} not found, loading default", path.display());
            Ok(default())
        }
        Err(e) => Err(StorageError::Io(e)),
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    ensure_parent(path).await?;
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json.as_bytes()).await?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}
