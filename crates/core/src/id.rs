//! Unique identifiers for Stride entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a Goal.
///
/// Goal ids are human-readable slugs derived from the goal title, with
/// child goals namespaced under their parent (`parent/child-slug`). They
/// are stable once created and unique within a user's goal collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    /// Derive an id from a title and optional parent path.
    ///
    /// The title is lowercased, non-alphanumeric runs collapse to a single
    /// dash, and the slug is capped at 30 characters.
    pub fn derive(title: &str, parent: Option<&GoalId>) -> Self {
        static NON_ALNUM: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        let non_alnum =
            NON_ALNUM.get_or_init(|| regex::Regex::new("[^a-z0-9]+").expect("static pattern"));
        let slug = non_alnum
            .replace_all(&title.to_lowercase(), "-")
            .trim_matches('-')
            .chars()
            .take(30)
            .collect::<String>();

        match parent {
            Some(parent) => Self(format!("{}/{}", parent.0, slug)),
            None => Self(slug),
        }
    }

    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for GoalId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GoalId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a Review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(Ulid);

impl ReviewId {
    /// Generate a new ReviewId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for an Obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObstacleId(Ulid);

impl ObstacleId {
    /// Generate a new ObstacleId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ObstacleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ObstacleId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a detected Pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternId(Ulid);

impl PatternId {
    /// Generate a new PatternId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for PatternId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_title() {
        let id = GoalId::derive("Run 5k Three Times a Week!", None);
        assert_eq!(id.as_str(), "run-5k-three-times-a-week");
    }

    #[test]
    fn slug_under_parent() {
        let parent = GoalId::from("get-fit");
        let id = GoalId::derive("Morning Run", Some(&parent));
        assert_eq!(id.as_str(), "get-fit/morning-run");
    }

    #[test]
    fn slug_is_capped_at_30_chars() {
        let id = GoalId::derive(
            "a very long goal title that goes on and on and on",
            None,
        );
        assert!(id.as_str().len() <= 30);
    }
}
