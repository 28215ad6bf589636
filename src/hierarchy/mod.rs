//! Which tag sets apply to a page, most specific first.
//!
//! The chain lists every candidate identifier whether or not a tag set
//! exists for it; the merger skips missing ones. Deleting an override
//! therefore needs no cleanup: the next resolution simply finds nothing at
//! that level and falls through.

use crate::tag_set::{bundle_identifier, parse_identifier, IdentifierKind, SpecialPage, GLOBAL_ID};
use serde::Serialize;
use std::fmt;

/// What is being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// A page not backed by an entity.
    Page(SpecialPage),
    /// An entity page. `bundle` is `None` for entity types without bundles.
    Entity {
        entity_type: String,
        bundle: Option<String>,
    },
}

impl RenderTarget {
    pub fn entity(entity_type: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self::Entity {
            entity_type: entity_type.into(),
            bundle: Some(bundle.into()),
        }
    }

    pub fn entity_type(entity_type: impl Into<String>) -> Self {
        Self::Entity {
            entity_type: entity_type.into(),
            bundle: None,
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "page:{page}"),
            Self::Entity {
                entity_type,
                bundle: Some(bundle),
            } => write!(f, "{entity_type}:{bundle}"),
            Self::Entity {
                entity_type,
                bundle: None,
            } => f.write_str(entity_type),
        }
    }
}

/// Ordered identifiers to consult, most specific first.
///
/// Never empty, never repeats an identifier, and always ends with `global`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyChain(Vec<String>);

impl HierarchyChain {
    fn from_candidates<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut ids: Vec<String> = Vec::new();
        for id in candidates {
            if id != GLOBAL_ID && !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids.push(GLOBAL_ID.to_string());
        Self(ids)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a chain holds at least `global`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|candidate| candidate == id)
    }
}

impl<'a> IntoIterator for &'a HierarchyChain {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compute the chain of identifiers for a render target.
///
/// * special page: `[<page>, global]`
/// * entity with bundle: `[<type>__<bundle>, <type>, global]`
/// * entity without bundle (or a blank one): `[<type>, global]`
/// * entity type that is not a valid type name: `[global]`
#[must_use]
pub fn resolve(target: &RenderTarget) -> HierarchyChain {
    match target {
        RenderTarget::Page(page) => HierarchyChain::from_candidates([page.id().to_string()]),
        RenderTarget::Entity {
            entity_type,
            bundle,
        } => {
            // Empty names and reserved ones ("global", "front", ...) are not
            // entity types; such targets only get the global defaults.
            if !matches!(
                parse_identifier(entity_type),
                Some(IdentifierKind::EntityType(_))
            ) {
                return HierarchyChain::from_candidates(std::iter::empty::<String>());
            }
            let bundle_id = bundle
                .as_deref()
                .map(str::trim)
                .filter(|bundle| !bundle.is_empty())
                .map(|bundle| bundle_identifier(entity_type, bundle))
                .filter(|id| matches!(parse_identifier(id), Some(IdentifierKind::Bundle { .. })));
            HierarchyChain::from_candidates(bundle_id.into_iter().chain([entity_type.clone()]))
        }
    }
}
