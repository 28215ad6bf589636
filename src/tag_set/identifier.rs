use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Separator between entity type and bundle in override identifiers.
pub const BUNDLE_SEPARATOR: &str = "__";

/// Identifier of the site-wide defaults.
pub const GLOBAL_ID: &str = "global";

/// One side of an identifier: lowercase words joined by single underscores.
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").expect("SEGMENT_REGEX is a valid regex literal")
});

/// Pages that are not backed by an entity but have their own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialPage {
    #[serde(rename = "front")]
    Front,
    #[serde(rename = "403")]
    AccessDenied,
    #[serde(rename = "404")]
    NotFound,
}

impl SpecialPage {
    pub const ALL: [Self; 3] = [Self::Front, Self::AccessDenied, Self::NotFound];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::AccessDenied => "403",
            Self::NotFound => "404",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "Front page",
            Self::AccessDenied => "403 access denied",
            Self::NotFound => "404 page not found",
        }
    }
}

impl fmt::Display for SpecialPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SpecialPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.id() == s)
            .ok_or_else(|| format!("unknown special page '{s}' (expected front, 403 or 404)"))
    }
}

/// What a tag set identifier refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierKind {
    Global,
    Page(SpecialPage),
    EntityType(String),
    Bundle { entity_type: String, bundle: String },
}

impl IdentifierKind {
    /// The identifier one level up the hierarchy, `None` for `global`.
    #[must_use]
    pub fn parent_id(&self) -> Option<String> {
        match self {
            Self::Global => None,
            Self::Page(_) | Self::EntityType(_) => Some(GLOBAL_ID.to_string()),
            Self::Bundle { entity_type, .. } => Some(entity_type.clone()),
        }
    }
}

fn is_valid_segment(segment: &str) -> bool {
    SEGMENT_REGEX.is_match(segment)
}

/// Classify an identifier, or `None` if it is malformed.
#[must_use]
pub fn parse_identifier(id: &str) -> Option<IdentifierKind> {
    if id == GLOBAL_ID {
        return Some(IdentifierKind::Global);
    }
    if let Ok(page) = id.parse::<SpecialPage>() {
        return Some(IdentifierKind::Page(page));
    }
    match id.split_once(BUNDLE_SEPARATOR) {
        Some((entity_type, bundle)) => {
            (is_valid_segment(entity_type) && is_valid_segment(bundle)).then(|| {
                IdentifierKind::Bundle {
                    entity_type: entity_type.to_string(),
                    bundle: bundle.to_string(),
                }
            })
        }
        None => is_valid_segment(id).then(|| IdentifierKind::EntityType(id.to_string())),
    }
}

/// Build the override identifier for an entity bundle.
#[must_use]
pub fn bundle_identifier(entity_type: &str, bundle: &str) -> String {
    format!("{entity_type}{BUNDLE_SEPARATOR}{bundle}")
}
