use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::models::PlaybackSettings;

const SETTINGS_FILE: &str = "playback_settings.json";

pub fn get_settings_file_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILE)
}

pub fn load_playback_settings() -> PlaybackSettings {
    load_playback_settings_from(&get_settings_file_path())
}

pub fn load_playback_settings_from(file_path: &Path) -> PlaybackSettings {
    if !file_path.exists() {
        info!("No existing playback settings found, using defaults");
        return PlaybackSettings::default();
    }

    match fs::read_to_string(file_path) {
        Ok(content) => match serde_json::from_str::<PlaybackSettings>(&content) {
            Ok(mut settings) => {
                // Hand-edited files may carry an out-of-range speed
                settings.set_playback_speed(settings.playback_speed);
                info!(server = %settings.server_url, speed = settings.playback_speed, "Loaded playback settings");
                settings
            }
            Err(e) => {
                warn!("Error parsing playback settings JSON: {}. Using defaults.", e);
                PlaybackSettings::default()
            }
        },
        Err(e) => {
            warn!("Error reading playback settings file: {}. Using defaults.", e);
            PlaybackSettings::default()
        }
    }
}

pub fn save_playback_settings(settings: &PlaybackSettings) -> io::Result<()> {
    save_playback_settings_to(&get_settings_file_path(), settings)
}

pub fn save_playback_settings_to(file_path: &Path, settings: &PlaybackSettings) -> io::Result<()> {
    let json_content = serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("JSON serialization error: {}", e)))?;

    let mut file = fs::File::create(file_path)?;
    file.write_all(json_content.as_bytes())?;
    file.flush()?;

    info!(server = %settings.server_url, speed = settings.playback_speed, "Saved playback settings");
    Ok(())
}

pub fn auto_save_playback_settings(settings: &PlaybackSettings) {
    if let Err(e) = save_playback_settings(settings) {
        warn!("Failed to auto-save playback settings: {}", e);
    }
}
