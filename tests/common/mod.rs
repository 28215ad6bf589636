//! Common test utilities

use metatag_defaults::{DefaultsManager, TokenContext, YamlStore};
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Manager over a YAML store rooted at `dir`
pub fn yaml_manager(dir: &Path) -> DefaultsManager<YamlStore> {
    DefaultsManager::new(YamlStore::new(dir.join("defaults")))
}

/// Manager with the module baselines installed
pub async fn installed_manager(dir: &Path) -> DefaultsManager<YamlStore> {
    let manager = yaml_manager(dir);
    manager.install().await.expect("Failed to install baselines");
    manager
}

/// Site tokens shared by the rendering tests
#[allow(dead_code)] // Test utility for integration tests
pub fn site_tokens() -> TokenContext {
    TokenContext::new()
        .with("site:name", "Acme")
        .with("site:url", "https://acme.test/")
}
