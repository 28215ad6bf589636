use super::{settings_path, Settings, SettingsError};
use std::path::Path;
use tracing::{debug, warn};

/// Load settings from `~/.metatag/config.toml`.
///
/// Returns `Ok(Settings::default())` if the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError`] if the file exists but cannot be read or parsed.
pub fn load_settings() -> Result<Settings, SettingsError> {
    let Some(path) = settings_path() else {
        warn!("Could not determine home directory; using default settings");
        return Ok(Settings::default());
    };
    load_settings_from(&path)
}

/// Load settings from an explicit path, with the same fallback as
/// [`load_settings`].
///
/// # Errors
///
/// Returns [`SettingsError`] if the file exists but cannot be read or parsed.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        debug!("Settings not found at {}; using defaults", path.display());
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    debug!("Loaded settings from {}", path.display());
    Ok(settings)
}
