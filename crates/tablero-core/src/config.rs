//! Configuration for tablero
//!
//! Stored in .tablero/config.toml, found by walking up from the current
//! directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::id::generate_id;

/// Directory holding the config file
pub const TABLERO_DIR: &str = ".tablero";
/// Config file name
pub const CONFIG_FILE: &str = "config.toml";

/// tablero configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Local user identity
    pub user: UserConfig,

    /// Content-feed settings
    pub feed: FeedConfig,

    /// Display settings
    pub display: DisplayConfig,
}

/// Local user identity
///
/// Stands in for a signed-in identity when no provider is wired up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Opaque user id; generated on init
    pub id: String,

    /// Display name
    pub name: Option<String>,

    /// Avatar URL
    pub avatar: Option<String>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: generate_id(),
            name: None,
            avatar: None,
        }
    }
}

/// Content-feed configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed base URL; when unset the demo board is used instead
    pub url: Option<String>,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colors in output
    pub colors: bool,

    /// Date format for display
    pub date_format: String,

    /// Maximum name length before truncation
    pub max_name_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            date_format: "%Y-%m-%d %H:%M".to_string(),
            max_name_length: 60,
        }
    }
}

impl Config {
    /// Load config from a TOML file; defaults when the file is absent
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("invalid config: {}", e)))?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Find the config file by walking up from `start`
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(TABLERO_DIR).join(CONFIG_FILE);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Generate a default config file with comments
    pub fn default_with_comments(user_id: &str) -> String {
        format!(
            r#"# tablero configuration

[user]
# Opaque user id; everything you author on the board is attributed to it
id = "{user_id}"

# Display name
# name = "Anika Visser"

# Avatar URL
# avatar = "/assets/avatars/avatar-anika-visser.png"

[feed]
# Content-feed base URL; when unset the demo board is used
# url = "https://devo-casa-de-mi-padre.onrender.com"

[display]
# Use colors in output
colors = true

# Date format for display (strftime format)
date_format = "%Y-%m-%d %H:%M"

# Maximum name length before truncation
max_name_length = 60
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let config = Config::load(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(config.feed.url.is_none());
        assert!(config.display.colors);
        assert!(!config.user.id.is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TABLERO_DIR).join(CONFIG_FILE);

        let mut config = Config::default();
        config.user.name = Some("Anika".into());
        config.feed.url = Some("https://feed.example".into());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.user.id, config.user.id);
        assert_eq!(loaded.user.name.as_deref(), Some("Anika"));
        assert_eq!(loaded.feed.url.as_deref(), Some("https://feed.example"));
    }

    #[test]
    fn test_find_from_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TABLERO_DIR).join(CONFIG_FILE);
        Config::default().save(&path).unwrap();

        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::find_from(&nested), Some(path));
    }

    #[test]
    fn test_commented_template_parses() {
        let text = Config::default_with_comments("user-1");
        let config: Config = toml::from_str(&text).unwrap();
        assert_eq!(config.user.id, "user-1");
        assert!(config.feed.url.is_none());
    }
}
