use super::robots::{normalize_directives, ROBOTS_TAG};
use super::types::{TagSet, TagValue};
use regex::Regex;
use std::sync::LazyLock;

/// Tag names: lowercase, starting with a letter, e.g. `title`, `og_image`,
/// `twitter_cards:type`.
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static TAG_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_:.-]*$").expect("TAG_NAME_REGEX is a valid regex literal")
});

/// A tag that failed validation, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTag {
    pub tag: String,
    pub reason: String,
}

/// Validate tag names and normalize structured values in place.
///
/// `robots` given as comma-separated text is split into a list; robots
/// lists are checked against the known directives and put in canonical order.
pub fn normalize_tags(tag_set: &mut TagSet) -> Result<(), InvalidTag> {
    for name in tag_set.tags.keys() {
        if !TAG_NAME_REGEX.is_match(name) {
            return Err(InvalidTag {
                tag: name.clone(),
                reason: "tag names must be lowercase and start with a letter".to_string(),
            });
        }
    }

    if let Some(value) = tag_set.tags.get_mut(ROBOTS_TAG) {
        let normalized = match value {
            TagValue::Text(text) => normalize_directives(text.split(',')),
            TagValue::List(items) => normalize_directives(items.iter().map(String::as_str)),
        }
        .map_err(|reason| InvalidTag {
            tag: ROBOTS_TAG.to_string(),
            reason,
        })?;
        *value = TagValue::List(normalized);
    }

    Ok(())
}
