use pagecraft_common::FileSystem;
use pagecraft_document::{ThemeSettings, Viewport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::EditorError;
use crate::history::HistoryConfig;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Seeds element ids, so two projects never mint the same ids
    #[serde(default = "default_project_key")]
    pub project_key: String,

    #[serde(default)]
    pub default_viewport: Viewport,

    /// Built-in theme preset the session starts with
    #[serde(default = "default_theme_preset")]
    pub theme_preset: String,

    #[serde(default)]
    pub history: HistoryConfig,

    /// Directory holding the file-backed project store
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
}

fn default_project_key() -> String {
    "pagecraft".to_string()
}

fn default_theme_preset() -> String {
    "default".to_string()
}

fn default_storage_dir() -> String {
    ".pagecraft".to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load<F: FileSystem>(fs: &F, cwd: &Path) -> Result<Self, EditorError> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if fs.exists(&config_path) {
            let content = fs.read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            config.validate()?;
            debug!(path = %config_path.display(), "Loaded editor config");
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }

    fn validate(&self) -> Result<(), EditorError> {
        if self.project_key.trim().is_empty() {
            return Err(EditorError::Config("projectKey must not be empty".to_string()));
        }
        if ThemeSettings::preset(&self.theme_preset).is_none() {
            return Err(EditorConfig::unknown_preset(&self.theme_preset));
        }
        Ok(())
    }

    fn unknown_preset(preset: &str) -> EditorError {
        EditorError::Config(format!(
            "unknown themePreset `{preset}`, expected one of {}",
            ThemeSettings::PRESETS.join(", ")
        ))
    }

    /// Theme named by `themePreset`
    pub fn theme(&self) -> Result<ThemeSettings, EditorError> {
        ThemeSettings::preset(&self.theme_preset)
            .ok_or_else(|| EditorConfig::unknown_preset(&self.theme_preset))
    }

    /// Absolute path to the storage directory
    pub fn get_storage_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.storage_dir)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            project_key: default_project_key(),
            default_viewport: Viewport::default(),
            theme_preset: default_theme_preset(),
            history: HistoryConfig::default(),
            storage_dir: default_storage_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_common::MockFileSystem;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "projectKey": "landing-page",
            "defaultViewport": "tablet",
            "themePreset": "dark",
            "history": { "maxEntries": 50 },
            "storageDir": "data"
        }"#;

        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.project_key, "landing-page");
        assert_eq!(config.default_viewport, Viewport::Medium);
        assert_eq!(config.theme_preset, "dark");
        assert_eq!(config.history.max_entries, 50);
        assert_eq!(config.get_storage_dir(Path::new("/site")), PathBuf::from("/site/data"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let fs = MockFileSystem::new();
        let config = EditorConfig::load(&fs, Path::new("/site")).unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.default_viewport, Viewport::Wide);
        assert_eq!(config.history.max_entries, 0);
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let mut fs = MockFileSystem::new();
        fs.add_file(
            PathBuf::from("/site").join(DEFAULT_CONFIG_NAME),
            r#"{ "themePreset": "neon" }"#,
        );
        assert!(matches!(
            EditorConfig::load(&fs, Path::new("/site")),
            Err(EditorError::Config(_))
        ));
    }
}
