use crate::model::LauncherItem;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_TIME_FORMAT: &str = "%H:%M | %d.%m.%Y        TV Launcher";
pub const DEFAULT_TIMEZONE: &str = "Europe/Warsaw";

/// Launcher settings. Keys missing from the file fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub time_format: String,
    /// IANA zone name for the clock, e.g. `Europe/Warsaw`.
    pub timezone: String,
    pub video_folder: PathBuf,
    pub media_player: String,
    pub browser: String,
    pub visible_apps: usize,
    pub visible_movies: usize,
    pub auto_update: bool,
    /// Replaces the built-in streaming platforms when set.
    pub platforms: Option<Vec<LauncherItem>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            video_folder: PathBuf::from("/Wideo"),
            media_player: "vlc --fullscreen".to_string(),
            browser: "xdg-open".to_string(),
            visible_apps: 8,
            visible_movies: 8,
            auto_update: false,
            platforms: None,
        }
    }
}

/// Returns the project directories for this application.
/// Centralized to ensure consistent paths across all modules.
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "tv-launcher", "tv-launcher")
        .context("Could not determine project directories")
}

pub fn config_path() -> Result<PathBuf> {
    let proj_dirs = project_dirs()?;
    let config_dir = proj_dirs.config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    }
    Ok(config_dir.join("config.json"))
}

/// Load launcher configuration from disk
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path()?)
}

/// Reads `path`, writing the defaults there first if it does not exist yet.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let config = AppConfig::default();
        save_config_to(path, &config)?;
        info!("Wrote default config to {}", path.display());
        return Ok(config);
    }

    let content = fs::read_to_string(path).context("Failed to read config file")?;
    serde_json::from_str(&content).context("Failed to parse config file")
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content).context("Failed to write config file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = load_config_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"visible_movies": 4, "browser": "firefox --kiosk"}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.visible_movies, 4);
        assert_eq!(config.browser, "firefox --kiosk");
        assert_eq!(config.visible_apps, 8);
        assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
        assert!(config.platforms.is_none());
    }

    #[test]
    fn test_platform_override_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"platforms": [{"name": "Twitch", "action": {"kind": "url", "value": "https://www.twitch.tv"}}]}"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(
            config.platforms,
            Some(vec![LauncherItem::url("Twitch", "https://www.twitch.tv")])
        );
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_roundtrip_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            video_folder: PathBuf::from("/srv/movies"),
            auto_update: true,
            ..AppConfig::default()
        };

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }
}
