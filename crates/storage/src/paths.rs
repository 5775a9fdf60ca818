//! Path layout for the per-user data directory.

use std::path::{Path, PathBuf};

/// Expand a leading `~/` to the user's home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Root directory for one user's data.
pub fn user_data_dir(root: &Path, user: &str) -> PathBuf {
    root.join("users").join(user)
}

/// Path of the user's goal collection file.
pub fn goals_file(root: &Path, user: &str) -> PathBuf {
    user_data_dir(root, user).join("goals.json")
}

/// Path of the user's review history file.
pub fn reviews_file(root: &Path, user: &str) -> PathBuf {
    user_data_dir(root, user).join("reviews.json")
}

/// Path of the user's preferences file.
pub fn preferences_file(root: &Path, user: &str) -> PathBuf {
    user_data_dir(root, user).join("preferences.json")
}

/// Path of the user's stored patterns file.
pub fn patterns_file(root: &Path, user: &str) -> PathBuf {
    user_data_dir(root, user).join("insights").join("patterns.json")
}

/// Path of the user's obstacles file.
pub fn obstacles_file(root: &Path, user: &str) -> PathBuf {
    user_data_dir(root, user).join("obstacles").join("obstacles.json")
}

/// Path of the user's session log for one calendar date.
pub fn session_log_file(root: &Path, user: &str, date: &str) -> PathBuf {
    user_data_dir(root, user)
        .join("sessions")
        .join(format!("{date}.jsonl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_keyed_by_user() {
        let root = Path::new("/data");
        assert_eq!(
            goals_file(root, "alice"),
            PathBuf::from("/data/users/alice/goals.json")
        );
        assert_eq!(
            patterns_file(root, "alice"),
            PathBuf::from("/data/users/alice/insights/patterns.json")
        );
        assert_eq!(
            session_log_file(root, "alice", "2026-08-28"),
            PathBuf::from("/data/users/alice/sessions/2026-08-28.jsonl")
        );
    }

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(expand_path("/tmp/stride"), PathBuf::from("/tmp/stride"));
    }
}
