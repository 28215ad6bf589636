use super::{DefaultsStore, StoreError};
use crate::tag_set::TagSet;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory store, used for tests and for embedding callers that manage
/// persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sets: RwLock<BTreeMap<String, TagSet>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `sets`, keyed by their own ids.
    pub fn with_sets<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = TagSet>,
    {
        let sets = sets
            .into_iter()
            .map(|tag_set| (tag_set.id.clone(), tag_set))
            .collect();
        Self {
            sets: RwLock::new(sets),
        }
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> BTreeMap<String, TagSet> {
        self.sets.read().await.clone()
    }
}

#[async_trait]
impl DefaultsStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<TagSet>, StoreError> {
        Ok(self.sets.read().await.get(id).cloned())
    }

    async fn save(&self, tag_set: &TagSet) -> Result<(), StoreError> {
        self.sets
            .write()
            .await
            .insert(tag_set.id.clone(), tag_set.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.sets.write().await.remove(id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.sets.read().await.keys().cloned().collect())
    }

    async fn load_all(&self) -> Result<BTreeMap<String, TagSet>, StoreError> {
        Ok(self.snapshot().await)
    }
}
