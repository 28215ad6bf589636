//! The defaults service: stored tag sets, their protection rules, and
//! resolution of the effective tags for a page.

mod crud;
mod error;
mod listing;
mod render;

pub use crud::CreateTagSetOptions;
pub use crate::protected::PolicyViolation;
pub use error::DefaultsError;
pub use listing::TagSetSummary;

use crate::catalog::EntityTypeInfo;
use crate::invalidation::{cache_tag, InvalidationSink, NoopSink};
use crate::protected::ProtectedSetRegistry;
use crate::store::DefaultsStore;
use std::sync::Arc;

/// Owns a store and applies the rules around it: protected sets, identifier
/// validation, tag normalization and cache invalidation.
pub struct DefaultsManager<S> {
    store: S,
    registry: ProtectedSetRegistry,
    sink: Arc<dyn InvalidationSink>,
    entity_types: Vec<EntityTypeInfo>,
}

impl<S: DefaultsStore> DefaultsManager<S> {
    /// Manager with the module baselines and no invalidation listener.
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: ProtectedSetRegistry::new(),
            sink: Arc::new(NoopSink),
            entity_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn InvalidationSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: ProtectedSetRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Entity types used for labels of new overrides.
    #[must_use]
    pub fn with_entity_types(mut self, entity_types: Vec<EntityTypeInfo>) -> Self {
        self.entity_types = entity_types;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &ProtectedSetRegistry {
        &self.registry
    }

    pub fn entity_types(&self) -> &[EntityTypeInfo] {
        &self.entity_types
    }

    fn invalidate<'a, I>(&self, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tags: Vec<String> = ids.into_iter().map(cache_tag).collect();
        if !tags.is_empty() {
            self.sink.invalidate(&tags);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "defaults_tests_1.rs"]
mod defaults_tests_1;
#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "defaults_tests_2.rs"]
mod defaults_tests_2;
