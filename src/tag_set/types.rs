use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single metatag value.
///
/// Most tags hold plain text. Structured tags such as `robots` hold a list of
/// flags, written as a YAML sequence and rendered comma-separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    List(Vec<String>),
}

impl TagValue {
    /// Shorthand for a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Shorthand for a list value.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// A value is empty when it carries nothing worth rendering: blank text,
    /// or a list whose items are all blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }

    /// Render the value as it appears in a `<meta>` content attribute.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(items) => items
                .iter()
                .filter(|item| !item.trim().is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Apply `f` to the text, or to every list item.
    #[must_use]
    pub fn map_text<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        match self {
            Self::Text(text) => Self::Text(f(text)),
            Self::List(items) => Self::List(items.iter().map(|item| f(item)).collect()),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A named set of metatag defaults, stored under a hierarchical identifier
/// such as `global`, `node` or `node__article`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSet {
    pub id: String,
    pub label: String,
    /// Protected sets can only be reverted, never deleted.
    #[serde(default)]
    pub protected: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, TagValue>,
    /// RFC 3339 timestamp of the last save. Omitted for module baselines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<String>,
}

impl TagSet {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            protected: false,
            tags: BTreeMap::new(),
            changed: None,
        }
    }

    #[must_use]
    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name)
    }

    /// Set a tag. An empty value is kept: it records that this level has no
    /// opinion and lets less specific levels show through.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<TagValue>) {
        self.tags.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<TagValue> {
        self.tags.remove(name)
    }

    /// Whether this set overrides a single bundle (`<entity-type>__<bundle>`).
    #[must_use]
    pub fn is_bundle_override(&self) -> bool {
        self.id.contains(super::identifier::BUNDLE_SEPARATOR)
    }
}
