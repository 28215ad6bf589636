//! Entity types known to the site, and what defaults can be created for them.

use crate::tag_set::{bundle_identifier, parse_identifier, IdentifierKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Entity types that never get their own metatag defaults: they have no
/// canonical page of their own.
pub const UNSUPPORTED_ENTITY_TYPES: [&str; 4] =
    ["block_content", "comment", "menu_link_content", "shortcut"];

#[must_use]
pub fn is_supported_entity_type(entity_type: &str) -> bool {
    !UNSUPPORTED_ENTITY_TYPES.contains(&entity_type)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleInfo {
    pub id: String,
    pub label: String,
}

/// An entity type and its bundles. Types without bundles have an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeInfo {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub bundles: Vec<BundleInfo>,
}

impl EntityTypeInfo {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            bundles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bundle(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.bundles.push(BundleInfo {
            id: id.into(),
            label: label.into(),
        });
        self
    }

    fn bundle(&self, id: &str) -> Option<&BundleInfo> {
        self.bundles.iter().find(|bundle| bundle.id == id)
    }
}

/// Identifiers an administrator may create defaults for.
///
/// Each supported entity type offers `<type>__<bundle>` for every bundle, or
/// just `<type>` when it has no bundles. Identifiers already in `existing`
/// are left out.
#[must_use]
pub fn available_identifiers(types: &[EntityTypeInfo], existing: &BTreeSet<String>) -> Vec<String> {
    let mut available: Vec<String> = types
        .iter()
        .filter(|info| is_supported_entity_type(&info.id))
        .flat_map(|info| {
            if info.bundles.is_empty() {
                vec![info.id.clone()]
            } else {
                info.bundles
                    .iter()
                    .map(|bundle| bundle_identifier(&info.id, &bundle.id))
                    .collect()
            }
        })
        .filter(|id| !existing.contains(id))
        .collect();
    available.sort();
    available.dedup();
    available
}

/// Human-readable label for an identifier, e.g. `Content: Article`.
///
/// Falls back to the identifier itself for unknown types or bundles.
#[must_use]
pub fn label_for(id: &str, types: &[EntityTypeInfo]) -> String {
    let find_type = |entity_type: &str| types.iter().find(|info| info.id == entity_type);
    match parse_identifier(id) {
        Some(IdentifierKind::Global) => "Global".to_string(),
        Some(IdentifierKind::Page(page)) => page.label().to_string(),
        Some(IdentifierKind::EntityType(entity_type)) => {
            find_type(&entity_type).map_or_else(|| id.to_string(), |info| info.label.clone())
        }
        Some(IdentifierKind::Bundle {
            entity_type,
            bundle,
        }) => find_type(&entity_type)
            .and_then(|info| {
                info.bundle(&bundle)
                    .map(|bundle| format!("{}: {}", info.label, bundle.label))
            })
            .unwrap_or_else(|| id.to_string()),
        None => id.to_string(),
    }
}
