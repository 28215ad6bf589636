//! Per-field merging of a hierarchy chain into one effective tag set.

use crate::hierarchy::HierarchyChain;
use crate::store::TagSetLookup;
use crate::tag_set::TagValue;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The resolved tags for one request. Built fresh per resolution and never
/// stored: any save, delete or revert along the chain makes it stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EffectiveTagSet {
    tags: BTreeMap<String, TagValue>,
    /// Which identifier supplied each tag.
    #[serde(skip)]
    sources: BTreeMap<String, String>,
}

impl EffectiveTagSet {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name)
    }

    /// Rendered value of one tag.
    #[must_use]
    pub fn rendered(&self, name: &str) -> Option<String> {
        self.tags.get(name).map(TagValue::render)
    }

    /// Identifier of the tag set the value of `name` came from.
    #[must_use]
    pub fn source_of(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TagValue)> {
        self.tags.iter()
    }

    /// Flatten into `(name, content)` pairs for output, `title` first and
    /// the rest by name.
    #[must_use]
    pub fn to_meta_pairs(&self) -> Vec<(String, String)> {
        let title = self
            .tags
            .get_key_value("title")
            .map(|(name, value)| (name.clone(), value.render()));
        let rest = self
            .tags
            .iter()
            .filter(|(name, _)| name.as_str() != "title")
            .map(|(name, value)| (name.clone(), value.render()));
        title.into_iter().chain(rest).collect()
    }

    /// Replace every value through `f`, dropping values that come out empty.
    #[must_use]
    pub fn map_values<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&TagValue) -> TagValue,
    {
        let mut mapped = Self::default();
        for (name, value) in &self.tags {
            let value = f(value);
            if value.is_empty() {
                continue;
            }
            if let Some(source) = self.sources.get(name) {
                mapped.sources.insert(name.clone(), source.clone());
            }
            mapped.tags.insert(name.clone(), value);
        }
        mapped
    }
}

/// Merge the tag sets of `chain` into one effective set.
///
/// For every tag name defined anywhere along the chain, the value comes
/// from the most specific tag set holding a non-empty value for it. An empty
/// value never shadows a less specific one, and a tag that is empty at every
/// level is left out. Identifiers with no stored tag set, `global` included,
/// are skipped.
#[must_use]
pub fn merge<L>(chain: &HierarchyChain, lookup: &L) -> EffectiveTagSet
where
    L: TagSetLookup + ?Sized,
{
    let mut effective = EffectiveTagSet::default();

    // Walking most specific first, a tag is only ever filled once.
    for id in chain {
        let Some(tag_set) = lookup.tag_set(id) else {
            debug!(id = %id, "No tag set at this level, skipping");
            continue;
        };
        for (name, value) in &tag_set.tags {
            if value.is_empty() || effective.tags.contains_key(name) {
                continue;
            }
            effective.tags.insert(name.clone(), value.clone());
            effective.sources.insert(name.clone(), id.clone());
        }
    }

    effective
}
