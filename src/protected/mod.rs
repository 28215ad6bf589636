//! Tag sets that may be reverted but never deleted.

mod baseline;

pub use baseline::module_baselines;

use crate::tag_set::{SpecialPage, TagSet, GLOBAL_ID};
use std::collections::HashMap;
use thiserror::Error;

/// Identifiers that are always present and cannot be deleted.
pub const PROTECTED_IDS: [&str; 4] = [
    GLOBAL_ID,
    SpecialPage::Front.id(),
    SpecialPage::AccessDenied.id(),
    SpecialPage::NotFound.id(),
];

/// Fixed membership check.
#[must_use]
pub fn is_protected(id: &str) -> bool {
    PROTECTED_IDS.contains(&id)
}

/// An operation refused by policy rather than failed by the system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("'{0}' is protected and cannot be deleted; revert it instead")]
    DeleteProtected(String),

    #[error("'{0}' is not protected and cannot be reverted; delete it instead")]
    RevertUnprotected(String),
}

/// Module-supplied baselines, keyed by identifier.
#[derive(Debug, Clone)]
pub struct ProtectedSetRegistry {
    baselines: HashMap<String, TagSet>,
}

impl ProtectedSetRegistry {
    /// Registry holding the baselines shipped with the module.
    #[must_use]
    pub fn new() -> Self {
        Self::with_baselines(module_baselines())
    }

    /// Registry with custom baselines. The protected flag of each baseline
    /// is forced to match [`is_protected`].
    pub fn with_baselines<I>(baselines: I) -> Self
    where
        I: IntoIterator<Item = TagSet>,
    {
        let baselines = baselines
            .into_iter()
            .map(|mut tag_set| {
                tag_set.protected = is_protected(&tag_set.id);
                (tag_set.id.clone(), tag_set)
            })
            .collect();
        Self { baselines }
    }

    /// The baseline for `id`, if the module ships one.
    #[must_use]
    pub fn baseline(&self, id: &str) -> Option<&TagSet> {
        self.baselines.get(id)
    }

    /// All baselines in install order: protected sets first, then by id.
    #[must_use]
    pub fn baselines(&self) -> Vec<&TagSet> {
        let mut all: Vec<&TagSet> = self.baselines.values().collect();
        all.sort_by_key(|tag_set| {
            let rank = PROTECTED_IDS
                .iter()
                .position(|id| *id == tag_set.id)
                .unwrap_or(PROTECTED_IDS.len());
            (rank, tag_set.id.clone())
        });
        all
    }

    /// A fresh copy of the baseline for a protected identifier.
    ///
    /// Only protected sets have revert semantics. A protected id without a
    /// shipped baseline reverts to an empty set carrying just its label.
    pub fn revert_to_baseline(&self, id: &str) -> Result<TagSet, PolicyViolation> {
        if !is_protected(id) {
            return Err(PolicyViolation::RevertUnprotected(id.to_string()));
        }
        Ok(self.baselines.get(id).cloned().unwrap_or_else(|| {
            let label = id
                .parse::<SpecialPage>()
                .map_or("Global", SpecialPage::label);
            TagSet::new(id, label).protected()
        }))
    }
}

impl Default for ProtectedSetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
