//! User configuration: tracker location and table row styles.
//!
//! Loaded from `<config dir>/revq/config.toml`; every field defaults, so a
//! missing file or a partial one is fine. Styles are typed fields, not
//! free-form strings, so a typo fails at parse time instead of silently
//! rendering unstyled rows.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub table: TableConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL issue keys are appended to, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://st.example-team.ru".to_string()
}

/// Terminal styling for one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStyle {
    Plain,
    Red,
    Bold,
    Dim,
}

impl RowStyle {
    /// Wrap `text` in the ANSI escape for this style.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        match self {
            Self::Plain => text.to_string(),
            Self::Red => format!("\x1b[31m{text}\x1b[0m"),
            Self::Bold => format!("\x1b[1m{text}\x1b[0m"),
            Self::Dim => format!("\x1b[2m{text}\x1b[0m"),
        }
    }
}

/// Which style each row condition gets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Deadline already missed.
    #[serde(default = "default_missed")]
    pub missed: RowStyle,
    /// Deadline falls on the current date.
    #[serde(default = "default_due_today")]
    pub due_today: RowStyle,
    /// Ticket is on the side of the user.
    #[serde(default = "default_waiting")]
    pub waiting: RowStyle,
    /// Ticket marked as the last one processed.
    #[serde(default = "default_processed")]
    pub processed: RowStyle,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            missed: default_missed(),
            due_today: default_due_today(),
            waiting: default_waiting(),
            processed: default_processed(),
        }
    }
}

const fn default_missed() -> RowStyle {
    RowStyle::Red
}

const fn default_due_today() -> RowStyle {
    RowStyle::Bold
}

const fn default_waiting() -> RowStyle {
    RowStyle::Dim
}

const fn default_processed() -> RowStyle {
    RowStyle::Dim
}

/// Load the user config, defaulting when the file doesn't exist.
///
/// # Errors
///
/// Fails when the file exists but can't be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("revq/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
