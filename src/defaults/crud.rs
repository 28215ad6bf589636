//! Tag set CRUD operations.

use super::{DefaultsError, DefaultsManager, PolicyViolation};
use crate::catalog::{is_supported_entity_type, label_for};
use crate::protected::is_protected;
use crate::store::DefaultsStore;
use crate::tag_set::{normalize_tags, parse_identifier, IdentifierKind, TagSet, TagValue};
use crate::utils::now_iso;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Options for creating a tag set
#[derive(Debug, Clone, Default)]
pub struct CreateTagSetOptions {
    pub id: String,
    /// Derived from the known entity types when absent.
    pub label: Option<String>,
    pub tags: BTreeMap<String, TagValue>,
}

impl<S: DefaultsStore> DefaultsManager<S> {
    /// Seed every baseline that is not stored yet.
    ///
    /// Existing sets are left untouched, so running this twice is harmless.
    /// Returns the identifiers that were created.
    pub async fn install(&self) -> Result<Vec<String>, DefaultsError> {
        let mut created = Vec::new();
        for baseline in self.registry.baselines() {
            if self.store.get(&baseline.id).await?.is_some() {
                debug!(id = %baseline.id, "Tag set already installed");
                continue;
            }
            let mut tag_set = baseline.clone();
            tag_set.changed = Some(now_iso());
            self.store.save(&tag_set).await?;
            created.push(tag_set.id);
        }

        self.invalidate(created.iter().map(String::as_str));
        info!(count = created.len(), "Installed default tag sets");
        Ok(created)
    }

    /// Load a stored tag set.
    pub async fn get(&self, id: &str) -> Result<TagSet, DefaultsError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DefaultsError::NotFound(id.to_string()))
    }

    /// Create a new tag set
    pub async fn create(&self, options: CreateTagSetOptions) -> Result<TagSet, DefaultsError> {
        let id = options.id;
        let kind =
            parse_identifier(&id).ok_or_else(|| DefaultsError::InvalidIdentifier(id.clone()))?;

        if let IdentifierKind::EntityType(entity_type) | IdentifierKind::Bundle { entity_type, .. } =
            &kind
        {
            if !is_supported_entity_type(entity_type) {
                return Err(DefaultsError::UnsupportedEntityType(entity_type.clone()));
            }
        }

        if self.store.get(&id).await?.is_some() {
            return Err(DefaultsError::AlreadyExists(id));
        }

        let label = options
            .label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| label_for(&id, &self.entity_types));
        let mut tag_set = TagSet::new(id, label);
        tag_set.protected = is_protected(&tag_set.id);
        tag_set.tags = options.tags;
        normalize_tags(&mut tag_set)?;
        tag_set.changed = Some(now_iso());

        self.store.save(&tag_set).await?;
        self.invalidate([tag_set.id.as_str()]);

        info!("Created tag set: {}", tag_set.id);
        Ok(tag_set)
    }

    /// Replace an existing tag set.
    ///
    /// The protected flag always follows the identifier, whatever the
    /// caller passed in.
    pub async fn save(&self, mut tag_set: TagSet) -> Result<TagSet, DefaultsError> {
        if parse_identifier(&tag_set.id).is_none() {
            return Err(DefaultsError::InvalidIdentifier(tag_set.id));
        }
        if self.store.get(&tag_set.id).await?.is_none() {
            return Err(DefaultsError::NotFound(tag_set.id));
        }

        tag_set.protected = is_protected(&tag_set.id);
        normalize_tags(&mut tag_set)?;
        tag_set.changed = Some(now_iso());

        self.store.save(&tag_set).await?;
        self.invalidate([tag_set.id.as_str()]);

        info!("Updated tag set: {}", tag_set.id);
        Ok(tag_set)
    }

    /// Overwrite individual tags of a stored set.
    ///
    /// An empty value is stored as-is: it stays in the set but no longer
    /// shadows the inherited one.
    pub async fn set_tags(
        &self,
        id: &str,
        updates: BTreeMap<String, TagValue>,
    ) -> Result<TagSet, DefaultsError> {
        let mut tag_set = self.get(id).await?;
        tag_set.tags.extend(updates);
        self.save(tag_set).await
    }

    /// Delete a tag set. Protected sets are refused.
    pub async fn delete(&self, id: &str) -> Result<(), DefaultsError> {
        if is_protected(id) {
            return Err(PolicyViolation::DeleteProtected(id.to_string()).into());
        }
        if !self.store.delete(id).await? {
            return Err(DefaultsError::NotFound(id.to_string()));
        }

        self.invalidate([id]);
        info!("Deleted tag set: {}", id);
        Ok(())
    }

    /// Restore a protected set to its baseline. Other sets are refused.
    pub async fn revert(&self, id: &str) -> Result<TagSet, DefaultsError> {
        let mut tag_set = self.registry.revert_to_baseline(id)?;
        tag_set.changed = Some(now_iso());

        self.store.save(&tag_set).await?;
        self.invalidate([id]);

        info!("Reverted tag set: {}", id);
        Ok(tag_set)
    }
}
