use super::{DefaultsStore, StoreError};
use crate::tag_set::{parse_identifier, TagSet};
use crate::utils::{tag_set_file_path, TAG_SET_EXTENSION};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{debug, error, warn};

/// Directory-backed store: one `<id>.yaml` file per tag set.
#[derive(Debug, Clone)]
pub struct YamlStore {
    dir: PathBuf,
}

impl YamlStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map an identifier to its file, refusing anything that is not a
    /// well-formed identifier so ids can never escape the store directory.
    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        if parse_identifier(id).is_none() {
            return Err(StoreError::InvalidIdentifier(id.to_string()));
        }
        Ok(tag_set_file_path(&self.dir, id))
    }

    /// Identifier encoded in a directory entry's file name, if it is a
    /// stored tag set.
    fn entry_id(path: &Path) -> Option<String> {
        if path.extension()?.to_str()? != TAG_SET_EXTENSION {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        parse_identifier(stem).map(|_| stem.to_string())
    }

    /// Read one file for `load_all`. Unreadable or malformed files are
    /// logged and skipped.
    async fn load_entry(path: &Path, id: &str) -> Option<TagSet> {
        let content = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) => {
                error!(id = %id, error = %e, "Failed to read tag set, skipping");
                return None;
            }
        };
        match serde_yaml::from_str::<TagSet>(&content) {
            Ok(tag_set) if tag_set.id == id => Some(tag_set),
            Ok(tag_set) => {
                warn!(
                    id = %id,
                    stored_id = %tag_set.id,
                    "Tag set id does not match its file name, skipping"
                );
                None
            }
            Err(e) => {
                error!(id = %id, error = %e, "Malformed tag set, skipping");
                None
            }
        }
    }
}

#[async_trait]
impl DefaultsStore for YamlStore {
    async fn get(&self, id: &str) -> Result<Option<TagSet>, StoreError> {
        let path = self.path_for(id)?;
        let content = match fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let tag_set: TagSet = serde_yaml::from_str(&content)?;
        if tag_set.id != id {
            return Err(StoreError::IdMismatch {
                id: id.to_string(),
                stored_id: tag_set.id,
            });
        }
        Ok(Some(tag_set))
    }

    async fn save(&self, tag_set: &TagSet) -> Result<(), StoreError> {
        let path = self.path_for(&tag_set.id)?;
        let dir = self.dir.clone();
        let target = path.clone();
        let owned = tag_set.clone();

        // The file is either fully replaced or left untouched.
        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            std::fs::create_dir_all(&dir)?;
            let mut temp_file = NamedTempFile::new_in(&dir)?;
            serde_yaml::to_writer(&mut temp_file, &owned)?;
            temp_file.flush()?;
            temp_file.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::IoError(std::io::Error::other(e)))??;

        debug!(id = %tag_set.id, path = %path.display(), "Wrote tag set");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(id) = Self::entry_id(&entry.path()) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn load_all(&self) -> Result<BTreeMap<String, TagSet>, StoreError> {
        let mut sets = BTreeMap::new();
        for id in self.list_all().await? {
            let path = tag_set_file_path(&self.dir, &id);
            if let Some(tag_set) = Self::load_entry(&path, &id).await {
                sets.insert(id, tag_set);
            }
        }
        Ok(sets)
    }
}
