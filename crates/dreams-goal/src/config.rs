// config.rs - Tracker configuration.
//
// TrackerConfig decides where the goal blob is stored and what defaults new
// goals get. `for_root()` produces the standard `.dreams/` layout; an
// optional `.dreams/config.toml` overrides individual fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::goal::{ColorTheme, UnknownColor, PLACEHOLDER_ICON};
use crate::persistence::DEFAULT_STORAGE_KEY;

/// Name of the per-root state directory.
pub const DATA_DIR_NAME: &str = ".dreams";

/// Name of the optional config file inside the state directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration for a tracker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Directory holding the stored blob (one file per storage key).
    pub data_dir: PathBuf,

    /// Key the goal list is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Icon given to goals created without one.
    #[serde(default = "default_icon")]
    pub default_icon: String,

    /// Color preselected for new goals.
    #[serde(default)]
    pub default_color: ColorTheme,

    /// JSONL activity log; disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_log: Option<PathBuf>,
}

/// Fields accepted in config.toml. Everything is optional; unset fields
/// keep the `for_root` value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    storage_key: Option<String>,
    default_icon: Option<String>,
    /// Parsed strictly: only the eight swatches are accepted here.
    default_color: Option<String>,
    activity_log: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_icon() -> String {
    PLACEHOLDER_ICON.to_string()
}

impl TrackerConfig {
    /// Standard layout under `<root>/.dreams/`.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        Self {
            data_dir: root.as_ref().join(DATA_DIR_NAME),
            storage_key: default_storage_key(),
            default_icon: default_icon(),
            default_color: ColorTheme::default(),
            activity_log: None,
        }
    }

    /// Path of the config file for `root`.
    pub fn config_path(root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(DATA_DIR_NAME).join(CONFIG_FILE_NAME)
    }

    /// Load `<root>/.dreams/config.toml` over the standard layout.
    ///
    /// Relative paths in the file resolve against `root`. A missing file
    /// yields the defaults; a malformed one is an error.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let root = root.as_ref();
        let mut config = Self::for_root(root);
        let path = Self::config_path(root);
        if !path.exists() {
            return Ok(config);
        }

        let content = fs::read_to_string(&path).map_err(|source| TrackerError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| TrackerError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        if let Some(dir) = file.data_dir {
            config.data_dir = root.join(dir);
        }
        if let Some(key) = file.storage_key {
            config.storage_key = key;
        }
        if let Some(icon) = file.default_icon {
            config.default_icon = icon;
        }
        if let Some(color) = file.default_color {
            let parsed: Result<ColorTheme, UnknownColor> = color.parse();
            config.default_color = parsed.map_err(|e| TrackerError::Config {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }
        config.activity_log = file.activity_log.map(|p| root.join(p));

        tracing::debug!(path = %path.display(), "loaded tracker config");
        Ok(config)
    }

    /// Like [`load`](Self::load), but falls back to defaults on any error.
    pub fn load_or_default(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::load(root).unwrap_or_else(|e| {
            tracing::warn!("ignoring config: {}", e);
            Self::for_root(root)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn for_root_uses_standard_layout() {
        let config = TrackerConfig::for_root("/tmp/project");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/project/.dreams"));
        assert_eq!(config.storage_key, "dreams-tracker-data");
        assert_eq!(config.default_icon, "🎯");
        assert_eq!(config.default_color, ColorTheme::Pink);
        assert!(config.activity_log.is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = TrackerConfig::load(dir.path()).unwrap();
        assert_eq!(config, TrackerConfig::for_root(dir.path()));
    }

    #[test]
    fn file_overrides_selected_fields() {
        let dir = tempdir().unwrap();
        let path = TrackerConfig::config_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "storage_key = \"work\"\ndefault_color = \"indigo\"\nactivity_log = \"activity.jsonl\"\n",
        )
        .unwrap();

        let config = TrackerConfig::load(dir.path()).unwrap();
        assert_eq!(config.storage_key, "work");
        assert_eq!(config.default_color, ColorTheme::Indigo);
        assert_eq!(config.default_icon, "🎯");
        assert_eq!(config.activity_log, Some(dir.path().join("activity.jsonl")));
    }

    #[test]
    fn malformed_file_is_an_error_but_load_or_default_recovers() {
        let dir = tempdir().unwrap();
        let path = TrackerConfig::config_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "default_color = \"teal\"\n").unwrap();

        assert!(matches!(
            TrackerConfig::load(dir.path()),
            Err(TrackerError::Config { .. })
        ));
        assert_eq!(
            TrackerConfig::load_or_default(dir.path()),
            TrackerConfig::for_root(dir.path())
        );
    }
}
