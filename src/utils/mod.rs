use std::path::{Path, PathBuf};

/// The name of the per-user metatag folder
pub const METATAG_FOLDER: &str = ".metatag";

/// File extension used for stored tag sets
pub const TAG_SET_EXTENSION: &str = "yaml";

/// Get the path to the `.metatag` folder under `base`
#[must_use]
pub fn get_metatag_path(base: &Path) -> PathBuf {
    base.join(METATAG_FOLDER)
}

/// Get the file path of a stored tag set inside a store directory
#[must_use]
pub fn tag_set_file_path(store_dir: &Path, id: &str) -> PathBuf {
    store_dir.join(format!("{id}.{TAG_SET_EXTENSION}"))
}

/// Get current timestamp in ISO 8601 format
#[must_use]
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}
