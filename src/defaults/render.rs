use super::DefaultsManager;
use crate::hierarchy::{resolve, RenderTarget};
use crate::merge::{merge, EffectiveTagSet};
use crate::store::DefaultsStore;
use crate::token::{expand, TokenSource};
use std::collections::BTreeMap;
use tracing::{debug, error};

impl<S: DefaultsStore> DefaultsManager<S> {
    /// Effective tags for a page, before token replacement.
    ///
    /// Never fails: a level that cannot be loaded is logged and treated as
    /// missing, so a broken override falls back to its parents.
    pub async fn resolve(&self, target: &RenderTarget) -> EffectiveTagSet {
        let chain = resolve(target);
        debug!(page = %target, chain = ?chain.ids(), "Resolving tag sets");

        let mut levels = BTreeMap::new();
        for id in &chain {
            match self.store.get(id).await {
                Ok(Some(tag_set)) => {
                    levels.insert(id.clone(), tag_set);
                }
                Ok(None) => {}
                Err(e) => {
                    error!(id = %id, error = %e, "Failed to load tag set, skipping level");
                }
            }
        }

        merge(&chain, &levels)
    }

    /// Effective tags for a page with tokens replaced from `tokens`.
    pub async fn render<T>(&self, target: &RenderTarget, tokens: &T) -> EffectiveTagSet
    where
        T: TokenSource + ?Sized,
    {
        let effective = self.resolve(target).await;
        expand(&effective, tokens)
    }
}
