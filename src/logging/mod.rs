mod init;
pub use init::{init_logging, parse_level, parse_rotation};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;

/// Log filename used when logging to files.
pub const LOG_FILENAME: &str = "metatag.log";

/// Configuration for the logging system.
pub struct LogConfig {
    /// Rolling log files are written here when set; stderr is always used.
    pub log_dir: Option<PathBuf>,
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}

impl LogConfig {
    /// Build from the `[logging]` settings table.
    #[must_use]
    pub fn from_settings(settings: &crate::settings::LoggingSettings) -> Self {
        Self {
            log_dir: settings.dir.clone(),
            log_level: parse_level(&settings.level),
            json_format: settings.json,
            rotation: parse_rotation(&settings.rotation),
        }
    }
}
