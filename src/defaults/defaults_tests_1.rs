use super::*;
use crate::catalog::EntityTypeInfo;
use crate::store::MemoryStore;
use crate::tag_set::{TagSet, TagValue};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingSink {
    seen: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }
}

impl InvalidationSink for RecordingSink {
    fn invalidate(&self, tags: &[String]) {
        self.seen.lock().unwrap().extend(tags.iter().cloned());
    }
}

fn manager() -> (DefaultsManager<MemoryStore>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let manager = DefaultsManager::new(MemoryStore::new())
        .with_sink(sink.clone())
        .with_entity_types(vec![EntityTypeInfo::new("node", "Content")
            .with_bundle("article", "Article")
            .with_bundle("page", "Basic page")]);
    (manager, sink)
}

fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, TagValue> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), TagValue::from(*value)))
        .collect()
}

// ─── Install ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_install_seeds_baselines() {
    let (manager, sink) = manager();
    let created = manager.install().await.unwrap();
    assert_eq!(
        created,
        vec!["global", "front", "403", "404", "node", "taxonomy_term", "user"]
    );

    let global = manager.get("global").await.unwrap();
    assert!(global.protected);
    assert!(global.changed.is_some());
    assert!(!manager.get("node").await.unwrap().protected);

    let invalidated = sink.take();
    assert_eq!(invalidated.len(), 7);
    assert!(invalidated.contains(&"config:metatag.metatag_defaults.global".to_string()));
}

#[tokio::test]
async fn test_install_keeps_existing_sets() {
    let (manager, sink) = manager();
    manager.install().await.unwrap();
    manager
        .set_tags("global", tags(&[("title", "Custom")]))
        .await
        .unwrap();
    sink.take();

    let created = manager.install().await.unwrap();
    assert!(created.is_empty());
    assert!(sink.take().is_empty());
    assert_eq!(
        manager.get("global").await.unwrap().get("title"),
        Some(&TagValue::from("Custom"))
    );
}

// ─── Create ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_bundle_override() {
    let (manager, sink) = manager();
    let created = manager
        .create(CreateTagSetOptions {
            id: "node__article".to_string(),
            label: None,
            tags: tags(&[("description", "Article desc")]),
        })
        .await
        .unwrap();

    assert_eq!(created.label, "Content: Article");
    assert!(!created.protected);
    assert!(created.changed.is_some());
    assert_eq!(manager.get("node__article").await.unwrap(), created);
    assert_eq!(
        sink.take(),
        vec!["config:metatag.metatag_defaults.node__article"]
    );
}

#[tokio::test]
async fn test_create_uses_given_label() {
    let (manager, _) = manager();
    let created = manager
        .create(CreateTagSetOptions {
            id: "taxonomy_term__tags".to_string(),
            label: Some("Tags".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.label, "Tags");
}

#[tokio::test]
async fn test_create_rejects_existing() {
    let (manager, _) = manager();
    manager.install().await.unwrap();
    let err = manager
        .create(CreateTagSetOptions {
            id: "node".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DefaultsError::AlreadyExists(ref id) if id == "node"));
}

#[tokio::test]
async fn test_create_rejects_bad_identifiers() {
    let (manager, _) = manager();
    for id in ["", "Node", "node__", "__article", "node__article__extra", "../etc"] {
        let err = manager
            .create(CreateTagSetOptions {
                id: id.to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err, DefaultsError::InvalidIdentifier(_)),
            "{id:?} should be rejected, got {err}"
        );
    }
}

#[tokio::test]
async fn test_create_rejects_unsupported_entity_types() {
    let (manager, _) = manager();
    let err = manager
        .create(CreateTagSetOptions {
            id: "comment__comment".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DefaultsError::UnsupportedEntityType(ref t) if t == "comment"));
}

#[tokio::test]
async fn test_create_normalizes_robots() {
    let (manager, _) = manager();
    let created = manager
        .create(CreateTagSetOptions {
            id: "node__page".to_string(),
            label: None,
            tags: tags(&[("robots", "nofollow, noindex")]),
        })
        .await
        .unwrap();
    assert_eq!(
        created.get("robots"),
        Some(&TagValue::list(["noindex", "nofollow"]))
    );
}

#[tokio::test]
async fn test_create_rejects_invalid_tags() {
    let (manager, _) = manager();
    let err = manager
        .create(CreateTagSetOptions {
            id: "node__page".to_string(),
            label: None,
            tags: tags(&[("robots", "sometimes")]),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DefaultsError::InvalidTag { ref tag, .. } if tag == "robots"));
    assert!(manager.get("node__page").await.is_err());
}

// ─── Save ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_save_requires_existing_set() {
    let (manager, _) = manager();
    let err = manager
        .save(TagSet::new("node__article", "Article"))
        .await
        .unwrap_err();
    assert!(matches!(err, DefaultsError::NotFound(_)));
}

#[tokio::test]
async fn test_save_forces_protected_flag() {
    let (manager, sink) = manager();
    manager.install().await.unwrap();
    sink.take();

    let mut global = manager.get("global").await.unwrap();
    global.protected = false;
    global.set("description", "Site wide");
    let saved = manager.save(global).await.unwrap();
    assert!(saved.protected);
    assert_eq!(sink.take(), vec!["config:metatag.metatag_defaults.global"]);

    let mut node = manager.get("node").await.unwrap();
    node.protected = true;
    assert!(!manager.save(node).await.unwrap().protected);
}

#[tokio::test]
async fn test_set_tags_keeps_empty_values() {
    let (manager, _) = manager();
    manager.install().await.unwrap();
    let updated = manager
        .set_tags("node", tags(&[("description", "")]))
        .await
        .unwrap();
    assert_eq!(updated.get("description"), Some(&TagValue::from("")));
}

// ─── Delete / Revert ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_protected_is_policy_violation() {
    let (manager, sink) = manager();
    manager.install().await.unwrap();
    sink.take();

    for id in ["global", "front", "403", "404"] {
        let err = manager.delete(id).await.unwrap_err();
        assert!(err.is_policy_violation());
        assert!(matches!(
            err,
            DefaultsError::Policy(PolicyViolation::DeleteProtected(_))
        ));
        assert!(manager.get(id).await.is_ok());
    }
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn test_delete_override() {
    let (manager, sink) = manager();
    manager
        .create(CreateTagSetOptions {
            id: "node__article".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    sink.take();

    manager.delete("node__article").await.unwrap();
    assert!(matches!(
        manager.get("node__article").await.unwrap_err(),
        DefaultsError::NotFound(_)
    ));
    assert_eq!(
        sink.take(),
        vec!["config:metatag.metatag_defaults.node__article"]
    );

    let err = manager.delete("node__article").await.unwrap_err();
    assert!(matches!(err, DefaultsError::NotFound(_)));
}

#[tokio::test]
async fn test_revert_restores_baseline() {
    let (manager, sink) = manager();
    manager.install().await.unwrap();
    manager
        .set_tags("front", tags(&[("title", "Welcome"), ("description", "Hi")]))
        .await
        .unwrap();
    sink.take();

    let reverted = manager.revert("front").await.unwrap();
    assert_eq!(reverted.get("title"), Some(&TagValue::from("[site:name]")));
    assert!(reverted.get("description").is_none());
    assert_eq!(manager.get("front").await.unwrap().tags, reverted.tags);
    assert_eq!(sink.take(), vec!["config:metatag.metatag_defaults.front"]);
}

#[tokio::test]
async fn test_revert_recreates_missing_protected_set() {
    let (manager, _) = manager();
    let reverted = manager.revert("404").await.unwrap();
    assert!(reverted.protected);
    assert_eq!(manager.get("404").await.unwrap().label, "404 page not found");
}

#[tokio::test]
async fn test_revert_unprotected_is_policy_violation() {
    let (manager, _) = manager();
    manager.install().await.unwrap();
    let err = manager.revert("node").await.unwrap_err();
    assert!(matches!(
        err,
        DefaultsError::Policy(PolicyViolation::RevertUnprotected(ref id)) if id == "node"
    ));
}
