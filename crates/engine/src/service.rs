//! Goal service - the entry point for all engine operations.

use stride_core::SessionEntry;
use stride_storage::Storage;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base check-in cadence in days assigned to new goals.
    pub default_check_in_interval: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_check_in_interval: 7,
        }
    }
}

/// Service over a user's goal and review collections.
///
/// Each operation loads the user's state whole, mutates it in memory, and
/// writes it back as one unit. The outer system is expected to serialize
/// operations per user; the service holds no locks of its own.
pub struct GoalService<S: Storage> {
    pub(crate) storage: S,
    pub(crate) config: EngineConfig,
}

impl<S: Storage> GoalService<S> {
    /// Create a service with default configuration.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: EngineConfig::default(),
        }
    }

    /// Override the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Borrow the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Borrow the underlying storage mutably.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Append an audit entry, logging instead of failing.
    ///
    /// The session log is fire-and-forget: a failed append must not fail
    /// the operation that already persisted its state.
    pub(crate) async fn audit(&mut self, user: &str, entry: SessionEntry) {
        if let Err(e) = self.storage.append_session_entry(user, &entry).await {
            tracing::warn!("failed to append session entry: {}", e);
        }
    }
}
