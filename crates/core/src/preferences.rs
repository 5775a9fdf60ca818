//! User preferences.

use serde::{Deserialize, Serialize};

/// Per-user settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Preferred message locale
    pub locale: Locale,

    /// IANA timezone name
    pub timezone: String,

    /// Preferred reminder time ("HH:MM")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            timezone: "UTC".to_string(),
            reminder_time: None,
            name: None,
        }
    }
}

/// Supported message locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Spanish
    Es,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}
