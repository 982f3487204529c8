use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_TYPED_MARKER_KIND;
use crate::editor::AbandonedDragPolicy;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Editor configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfigData {
    /// Save the editor state after every committed change
    pub autosave: bool,

    /// Where the editor state is stored; `None` uses the platform default
    pub state_file: Option<PathBuf>,

    /// `type` property given to features drawn with the typed marker tool
    pub typed_marker_kind: String,

    /// What happens to a drag that ends without a pointer release
    pub abandoned_drag: AbandonedDragPolicy,
}

impl Default for EditorConfigData {
    fn default() -> Self {
        Self {
            autosave: true,
            state_file: None,
            typed_marker_kind: DEFAULT_TYPED_MARKER_KIND.to_string(),
            abandoned_drag: AbandonedDragPolicy::default(),
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct EditorConfig {
    /// The persisted configuration data
    pub data: EditorConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            data: EditorConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

impl EditorConfig {
    /// The state file in effect: the configured override, else the platform default.
    pub fn state_path(&self) -> PathBuf {
        self.data
            .state_file
            .clone()
            .unwrap_or_else(crate::paths::state_file)
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to turn autosave on or off
#[derive(Message)]
pub struct SetAutosaveRequest {
    pub enabled: bool,
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: EditorConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from `path`
fn load_config(path: &Path) -> LoadConfigResult {
    if !path.exists() {
        info!("No config file found, using defaults");
        return LoadConfigResult {
            data: EditorConfigData::default(),
            reset_reason: None,
        };
    }

    match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(data) => {
                info!("Loaded config from {:?}", path);
                LoadConfigResult {
                    data,
                    reset_reason: None,
                }
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                LoadConfigResult {
                    data: EditorConfigData::default(),
                    reset_reason: Some(format!("Configuration file was corrupted: {}", e)),
                }
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            LoadConfigResult {
                data: EditorConfigData::default(),
                reset_reason: Some(format!("Could not read configuration file: {}", e)),
            }
        }
    }
}

/// Save configuration to disk
fn save_config(config: &EditorConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<EditorConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    if let Err(e) = crate::paths::ensure_directories() {
        warn!("Failed to create application directories: {}", e);
    }

    let result = load_config(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<EditorConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

fn set_autosave_system(
    mut events: MessageReader<SetAutosaveRequest>,
    mut config: ResMut<EditorConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.autosave != event.enabled {
            config.data.autosave = event.enabled;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
            info!("Autosave {}", if event.enabled { "enabled" } else { "disabled" });
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetAutosaveRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_autosave_system.run_if(on_message::<SetAutosaveRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_config_data_default() {
        let data = EditorConfigData::default();
        assert!(data.autosave);
        assert!(data.state_file.is_none());
        assert_eq!(data.typed_marker_kind, "cat");
        assert_eq!(data.abandoned_drag, AbandonedDragPolicy::Commit);
    }

    #[test]
    fn test_editor_config_data_serialization() {
        let data = EditorConfigData {
            autosave: false,
            state_file: Some(PathBuf::from("/path/to/state.json")),
            typed_marker_kind: "dog".to_string(),
            abandoned_drag: AbandonedDragPolicy::Discard,
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: EditorConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, data);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: EditorConfigData = serde_json::from_str(r#"{"autosave": false}"#).unwrap();
        assert!(!parsed.autosave);
        assert_eq!(parsed.typed_marker_kind, DEFAULT_TYPED_MARKER_KIND);
    }

    #[test]
    fn test_state_path_prefers_override() {
        let mut config = EditorConfig::default();
        assert_eq!(config.state_path(), crate::paths::state_file());

        config.data.state_file = Some(PathBuf::from("elsewhere.json"));
        assert_eq!(config.state_path(), PathBuf::from("elsewhere.json"));
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("config.json"));
        assert_eq!(result.data, EditorConfigData::default());
        assert!(result.reset_reason.is_none());
    }

    #[test]
    fn test_load_corrupt_config_resets_with_reason() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = load_config(&path);

        assert_eq!(result.data, EditorConfigData::default());
        assert!(result.reset_reason.unwrap().contains("corrupted"));
    }
}
