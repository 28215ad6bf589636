use super::*;
use crate::hierarchy::RenderTarget;
use crate::store::{MemoryStore, StoreError};
use crate::tag_set::{SpecialPage, TagSet, TagValue};
use crate::token::TokenContext;
use async_trait::async_trait;

fn site() -> TokenContext {
    TokenContext::new()
        .with("site:name", "Acme")
        .with("site:url", "https://acme.test/")
}

fn store_with(sets: Vec<TagSet>) -> DefaultsManager<MemoryStore> {
    DefaultsManager::new(MemoryStore::with_sets(sets))
}

// ─── Resolve ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_resolve_bundle_falls_through_empty_values() {
    let manager = store_with(vec![
        TagSet::new("global", "Global")
            .protected()
            .with_tag("title", "G"),
        TagSet::new("node", "Content").with_tag("title", ""),
        TagSet::new("node__article", "Article").with_tag("description", "A"),
    ]);

    let effective = manager
        .resolve(&RenderTarget::entity("node", "article"))
        .await;
    assert_eq!(effective.rendered("title").as_deref(), Some("G"));
    assert_eq!(effective.source_of("title"), Some("global"));
    assert_eq!(effective.rendered("description").as_deref(), Some("A"));
    assert_eq!(effective.source_of("description"), Some("node__article"));
    assert_eq!(effective.len(), 2);
}

#[tokio::test]
async fn test_resolve_special_page_skips_entity_levels() {
    let manager = store_with(vec![
        TagSet::new("global", "Global").with_tag("title", "G"),
        TagSet::new("node", "Content").with_tag("description", "N"),
        TagSet::new("404", "404 page not found").with_tag("title", "Missing"),
    ]);

    let effective = manager
        .resolve(&RenderTarget::Page(SpecialPage::NotFound))
        .await;
    assert_eq!(effective.rendered("title").as_deref(), Some("Missing"));
    assert!(!effective.contains("description"));
}

#[tokio::test]
async fn test_resolve_without_global() {
    let manager = store_with(vec![TagSet::new("node", "Content").with_tag("title", "N")]);
    let effective = manager
        .resolve(&RenderTarget::entity("node", "page"))
        .await;
    assert_eq!(effective.rendered("title").as_deref(), Some("N"));

    let empty = store_with(Vec::new())
        .resolve(&RenderTarget::Page(SpecialPage::Front))
        .await;
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_resolve_after_override_deleted() {
    let manager = store_with(vec![
        TagSet::new("node", "Content").with_tag("title", "N"),
        TagSet::new("node__article", "Article").with_tag("title", "A"),
    ]);
    let target = RenderTarget::entity("node", "article");
    assert_eq!(
        manager.resolve(&target).await.rendered("title").as_deref(),
        Some("A")
    );

    manager.delete("node__article").await.unwrap();
    assert_eq!(
        manager.resolve(&target).await.rendered("title").as_deref(),
        Some("N")
    );
    assert_eq!(
        manager.resolve(&target).await,
        manager.resolve(&RenderTarget::entity("node", "page")).await
    );
}

/// Fails to load one identifier, delegates everything else.
struct BrokenLevel {
    inner: MemoryStore,
    broken: &'static str,
}

#[async_trait]
impl DefaultsStore for BrokenLevel {
    async fn get(&self, id: &str) -> Result<Option<TagSet>, StoreError> {
        if id == self.broken {
            return Err(StoreError::InvalidIdentifier(id.to_string()));
        }
        self.inner.get(id).await
    }

    async fn save(&self, tag_set: &TagSet) -> Result<(), StoreError> {
        self.inner.save(tag_set).await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.inner.delete(id).await
    }

    async fn list_all(&self) -> Result<Vec<String>, StoreError> {
        self.inner.list_all().await
    }
}

#[tokio::test]
async fn test_resolve_skips_unreadable_level() {
    let manager = DefaultsManager::new(BrokenLevel {
        inner: MemoryStore::with_sets([
            TagSet::new("global", "Global").with_tag("title", "G"),
            TagSet::new("node__article", "Article").with_tag("title", "A"),
        ]),
        broken: "node__article",
    });
    let effective = manager
        .resolve(&RenderTarget::entity("node", "article"))
        .await;
    assert_eq!(effective.rendered("title").as_deref(), Some("G"));
}

// ─── Render ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_render_expands_tokens() {
    let manager = DefaultsManager::new(MemoryStore::new());
    manager.install().await.unwrap();
    manager
        .create(CreateTagSetOptions {
            id: "node__article".to_string(),
            label: None,
            tags: [(
                "description".to_string(),
                TagValue::from("[site:name] desc"),
            )]
            .into_iter()
            .collect(),
        })
        .await
        .unwrap();

    let tokens = site()
        .with("node:title", "Hello")
        .with("node:url", "https://acme.test/hello");
    let effective = manager
        .render(&RenderTarget::entity("node", "article"), &tokens)
        .await;

    assert_eq!(
        effective.to_meta_pairs(),
        vec![
            ("title".to_string(), "Hello | Acme".to_string()),
            (
                "canonical_url".to_string(),
                "https://acme.test/hello".to_string()
            ),
            ("description".to_string(), "Acme desc".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_render_drops_tags_emptied_by_tokens() {
    let manager = store_with(vec![
        TagSet::new("global", "Global").with_tag("description", "[node:summary]")
    ]);
    let tokens = site().with("node:summary", "");
    let effective = manager
        .render(&RenderTarget::entity("node", "page"), &tokens)
        .await;
    assert!(!effective.contains("description"));
}

#[tokio::test]
async fn test_render_front_page_after_install() {
    let manager = DefaultsManager::new(MemoryStore::new());
    manager.install().await.unwrap();
    let effective = manager
        .render(&RenderTarget::Page(SpecialPage::Front), &site())
        .await;
    assert_eq!(effective.rendered("title").as_deref(), Some("Acme"));
    assert_eq!(
        effective.rendered("canonical_url").as_deref(),
        Some("https://acme.test/")
    );
}

// ─── Listing ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_grouped_after_install() {
    let manager = DefaultsManager::new(MemoryStore::new());
    manager.install().await.unwrap();
    manager
        .create(CreateTagSetOptions {
            id: "node__article".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let grouped = manager.list_grouped().await.unwrap();
    let ids: Vec<&str> = grouped.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "global",
            "front",
            "403",
            "404",
            "node",
            "node__article",
            "taxonomy_term",
            "user"
        ]
    );
    assert!(grouped[0].revertable());
    assert!(grouped[5].deletable());

    let all = manager.list_all().await.unwrap();
    assert_eq!(all.len(), 8);
    assert!(all.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn test_list_grouped_ignores_stale_protected_flags() {
    let manager = store_with(vec![
        TagSet::new("global", "Global"),
        TagSet::new("node__article", "Article").protected(),
    ]);
    let grouped = manager.list_grouped().await.unwrap();
    let global = grouped.iter().find(|s| s.id == "global").unwrap();
    let article = grouped.iter().find(|s| s.id == "node__article").unwrap();
    assert!(!global.deletable());
    assert!(article.deletable());
    assert!(!article.revertable());
}
