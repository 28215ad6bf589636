use super::{DefaultsError, DefaultsManager};
use crate::protected::{is_protected, PROTECTED_IDS};
use crate::store::DefaultsStore;
use crate::tag_set::{parse_identifier, IdentifierKind, TagSet};
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the administrative listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSetSummary {
    pub id: String,
    pub label: String,
    pub protected: bool,
    /// Set one level up the hierarchy, `None` for `global`.
    pub parent: Option<String>,
}

impl TagSetSummary {
    fn from_tag_set(tag_set: &TagSet) -> Self {
        Self {
            id: tag_set.id.clone(),
            label: tag_set.label.clone(),
            protected: is_protected(&tag_set.id),
            parent: parse_identifier(&tag_set.id).and_then(|kind| kind.parent_id()),
        }
    }

    #[must_use]
    pub fn revertable(&self) -> bool {
        self.protected
    }

    #[must_use]
    pub fn deletable(&self) -> bool {
        !self.protected
    }
}

impl<S: DefaultsStore> DefaultsManager<S> {
    /// All stored identifiers, sorted.
    pub async fn list_all(&self) -> Result<Vec<String>, DefaultsError> {
        Ok(self.store.list_all().await?)
    }

    /// Stored sets grouped for display.
    ///
    /// Protected sets come first in fixed order, then each entity type
    /// followed by its bundle overrides. Overrides whose entity type has no
    /// stored set are listed last.
    pub async fn list_grouped(&self) -> Result<Vec<TagSetSummary>, DefaultsError> {
        let all = self.store.load_all().await?;
        Ok(group(&all))
    }
}

fn group(all: &BTreeMap<String, TagSet>) -> Vec<TagSetSummary> {
    let mut grouped: Vec<TagSetSummary> = PROTECTED_IDS
        .iter()
        .filter_map(|id| all.get(*id))
        .map(TagSetSummary::from_tag_set)
        .collect();

    let mut entity_types: Vec<&TagSet> = Vec::new();
    let mut bundles: BTreeMap<String, Vec<&TagSet>> = BTreeMap::new();
    let mut orphans: Vec<&TagSet> = Vec::new();

    for tag_set in all.values() {
        match parse_identifier(&tag_set.id) {
            Some(IdentifierKind::EntityType(_)) => entity_types.push(tag_set),
            Some(IdentifierKind::Bundle { entity_type, .. }) if all.contains_key(&entity_type) => {
                bundles.entry(entity_type).or_default().push(tag_set);
            }
            Some(IdentifierKind::Global | IdentifierKind::Page(_)) => {}
            Some(IdentifierKind::Bundle { .. }) | None => orphans.push(tag_set),
        }
    }

    // BTreeMap iteration already yields everything in id order.
    for entity_type in entity_types {
        grouped.push(TagSetSummary::from_tag_set(entity_type));
        if let Some(children) = bundles.get(&entity_type.id) {
            grouped.extend(children.iter().copied().map(TagSetSummary::from_tag_set));
        }
    }
    grouped.extend(orphans.into_iter().map(TagSetSummary::from_tag_set));
    grouped
}
