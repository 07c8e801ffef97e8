use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_BACKEND_URL, DEFAULT_BOUNDARIES_URL};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_boundaries_url() -> String {
    DEFAULT_BOUNDARIES_URL.to_string()
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Base URL of the marker API backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// URL of the country boundary GeoJSON dataset
    #[serde(default = "default_boundaries_url")]
    pub boundaries_url: String,

    /// Local GeoJSON file used instead of `boundaries_url` when set
    #[serde(default)]
    pub boundaries_file: Option<PathBuf>,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            boundaries_url: default_boundaries_url(),
            boundaries_file: None,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
        }
    }
}

/// Load configuration from disk, falling back to defaults on any error
fn load_config() -> AppConfig {
    let config_path = crate::paths::config_file();

    let data = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    data
                }
                Err(e) => {
                    warn!("Failed to parse config file, using defaults: {}", e);
                    AppConfigData::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file, using defaults: {}", e);
                AppConfigData::default()
            }
        }
    } else {
        info!("No config file found, using defaults");
        AppConfigData::default()
    };

    AppConfig { data, config_path }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(mut config: ResMut<AppConfig>) {
    let loaded = load_config();
    config.data = loaded.data;
    config.config_path = loaded.config_path;
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert_eq!(data.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(data.boundaries_url, DEFAULT_BOUNDARIES_URL);
        assert!(data.boundaries_file.is_none());
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            backend_url: "http://example.com:4000".to_string(),
            boundaries_url: "http://example.com/boundaries.geojson".to_string(),
            boundaries_file: Some(PathBuf::from("/data/boundaries.geojson")),
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.backend_url, data.backend_url);
        assert_eq!(parsed.boundaries_url, data.boundaries_url);
        assert_eq!(parsed.boundaries_file, data.boundaries_file);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        // Older config files may not carry every field
        let json = r#"{ "backend_url": "http://localhost:9000" }"#;
        let parsed: AppConfigData = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.backend_url, "http://localhost:9000");
        assert_eq!(parsed.boundaries_url, DEFAULT_BOUNDARIES_URL);
        assert!(parsed.boundaries_file.is_none());
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let parsed: AppConfigData = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(parsed.boundaries_url, DEFAULT_BOUNDARIES_URL);
    }
}
