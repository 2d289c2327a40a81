use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use crate::file::config::AppConfig;
use crate::states::StartupLatch;
use crate::theory::{preset, BoardConfig};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub start_theme: String,
    pub window: WindowSettings,
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_theme: "default".to_string(),
            window: WindowSettings {
                width: 1280.0,
                height: 720.0,
            },
            board: BoardConfig::default(),
        }
    }
}

pub fn settings_path(config: &AppConfig) -> PathBuf {
    PathBuf::from(&config.saves.directory).join(&config.saves.settings_file)
}

pub fn load_or_create_settings(path: &PathBuf) -> Settings {
    if !path.exists() {
        warn!("Settings file not found at '{}', creating default...", path.display());
        let default = Settings::default();
        let yaml = serde_yaml::to_string(&default).expect("Failed to serialize default settings");
        fs::write(path, yaml).expect("Failed to write default settings file");
        return default;
    }

    let content = fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to read settings file at '{}'", path.display()));

    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse settings YAML: {e}"))
}

/// Write the current settings back, so the board options restore on the
/// next launch. A failed write is only worth a warning at runtime.
pub fn save_settings(path: &PathBuf, settings: &Settings) {
    match serde_yaml::to_string(settings) {
        Ok(yaml) => {
            if let Err(e) = fs::write(path, yaml) {
                warn!("Failed to write settings file at '{}': {e}", path.display());
            }
        }
        Err(e) => warn!("Failed to serialize settings: {e}"),
    }
}

fn change_window(
    mut windows: Query<&mut Window>,
    settings: &Settings,
    config: &AppConfig,
) {
    if let Ok(mut window) = windows.single_mut() {
        window.title = config.window.title.clone();
        window.resolution.set(settings.window.width, settings.window.height);
    } else {
        warn!("Primary window not available to apply settings");
    }
}

pub fn setup_settings(mut commands: Commands, windows: Query<&mut Window>, config: Res<AppConfig>, mut latch: ResMut<StartupLatch>,) {
    let path = settings_path(&config);

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).expect("Failed to create save directory");
        }
    }

    let settings = load_or_create_settings(&path);

    // An instrument name that is not a tuning preset must never silently
    // fall back to some default board.
    if let Err(e) = preset(&settings.board.instrument) {
        panic!("Invalid settings at '{}': {e}", path.display());
    }

    change_window(windows, &settings, &config);
    commands.insert_resource(settings);
    latch.settings_loaded = true;
}
