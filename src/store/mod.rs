//! Keyed storage of tag sets.
//!
//! [`DefaultsStore`] is the read/write seam the rest of the crate talks to.
//! [`TagSetLookup`] is the synchronous read-only view the merger works on,
//! so resolution stays a pure function over a snapshot.

mod memory;
mod yaml;

pub use memory::MemoryStore;
pub use yaml::YamlStore;

use crate::tag_set::TagSet;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid tag set identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Tag set file '{id}' holds id '{stored_id}'")]
    IdMismatch { id: String, stored_id: String },
}

/// Read/write access to stored tag sets, keyed by identifier.
///
/// Implementations provide atomic single-writer semantics per identifier;
/// callers do no locking of their own.
#[async_trait]
pub trait DefaultsStore: Send + Sync {
    /// Load one tag set. A missing identifier is `Ok(None)`.
    async fn get(&self, id: &str) -> Result<Option<TagSet>, StoreError>;

    /// Insert or replace the tag set stored under `tag_set.id`.
    async fn save(&self, tag_set: &TagSet) -> Result<(), StoreError>;

    /// Remove a tag set. Returns whether anything was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// All stored identifiers, sorted.
    async fn list_all(&self) -> Result<Vec<String>, StoreError>;

    /// Load the given identifiers, silently skipping missing ones.
    async fn get_many(&self, ids: &[String]) -> Result<BTreeMap<String, TagSet>, StoreError> {
        let mut found = BTreeMap::new();
        for id in ids {
            if let Some(tag_set) = self.get(id).await? {
                found.insert(id.clone(), tag_set);
            }
        }
        Ok(found)
    }

    /// Load every stored tag set.
    async fn load_all(&self) -> Result<BTreeMap<String, TagSet>, StoreError> {
        let ids = self.list_all().await?;
        self.get_many(&ids).await
    }
}

/// Synchronous, read-only lookup of tag sets by identifier.
pub trait TagSetLookup {
    fn tag_set(&self, id: &str) -> Option<&TagSet>;
}

impl TagSetLookup for BTreeMap<String, TagSet> {
    fn tag_set(&self, id: &str) -> Option<&TagSet> {
        self.get(id)
    }
}

impl<S: std::hash::BuildHasher> TagSetLookup for HashMap<String, TagSet, S> {
    fn tag_set(&self, id: &str) -> Option<&TagSet> {
        self.get(id)
    }
}
