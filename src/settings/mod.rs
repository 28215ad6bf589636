mod loader;
pub use loader::{load_settings, load_settings_from};
use crate::catalog::EntityTypeInfo;
use crate::token::TokenContext;
use crate::utils::get_metatag_path;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

fn default_level() -> String {
    "info".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

/// Where tag sets are persisted (`[store]` table).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreSettings {
    /// Directory of `<id>.yaml` files. Defaults to `~/.metatag/defaults`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreSettings {
    /// The configured directory, or the default under the home directory.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            get_metatag_path(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
                .join("defaults")
        })
    }
}

/// Site-wide values exposed as `site:*` tokens (`[site]` table).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SiteSettings {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub slogan: Option<String>,
}

impl SiteSettings {
    /// `site:name`, `site:url` and `site:slogan`, each only when set.
    ///
    /// Blank values are left out so a reference to them stays literal
    /// instead of rendering as nothing.
    #[must_use]
    pub fn tokens(&self) -> TokenContext {
        let mut tokens = TokenContext::new();
        let values = [
            ("site:name", Some(self.name.as_str())),
            ("site:url", Some(self.url.as_str())),
            ("site:slogan", self.slogan.as_deref()),
        ];
        for (name, value) in values {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                tokens.insert(name, value);
            }
        }
        tokens
    }
}

/// `[logging]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_rotation")]
    pub rotation: String,
    /// Also write rolling log files here when set.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            rotation: default_rotation(),
            dir: None,
        }
    }
}

/// Top-level settings, deserialized from `~/.metatag/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Entity types and bundles of the site, used for labels and for
    /// listing what overrides can still be created.
    #[serde(default)]
    pub entity_types: Vec<EntityTypeInfo>,
}

/// Resolve the canonical path for the settings file.
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| get_metatag_path(&h).join("config.toml"))
}
