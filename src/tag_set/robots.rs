//! The `robots` tag: an enumerated set of crawler directives.

use std::fmt;
use std::str::FromStr;

/// Name of the robots tag.
pub const ROBOTS_TAG: &str = "robots";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RobotsDirective {
    Index,
    Follow,
    NoIndex,
    NoFollow,
    NoArchive,
    NoSnippet,
    NoOdp,
    NoYdir,
    NoImageIndex,
    NoTranslate,
}

impl RobotsDirective {
    /// All directives in canonical render order.
    pub const ALL: [Self; 10] = [
        Self::Index,
        Self::Follow,
        Self::NoIndex,
        Self::NoFollow,
        Self::NoArchive,
        Self::NoSnippet,
        Self::NoOdp,
        Self::NoYdir,
        Self::NoImageIndex,
        Self::NoTranslate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Follow => "follow",
            Self::NoIndex => "noindex",
            Self::NoFollow => "nofollow",
            Self::NoArchive => "noarchive",
            Self::NoSnippet => "nosnippet",
            Self::NoOdp => "noodp",
            Self::NoYdir => "noydir",
            Self::NoImageIndex => "noimageindex",
            Self::NoTranslate => "notranslate",
        }
    }
}

impl fmt::Display for RobotsDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RobotsDirective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|directive| directive.as_str() == wanted)
            .ok_or_else(|| format!("unknown robots directive '{}'", s.trim()))
    }
}

/// Parse, deduplicate and sort robots flags into canonical order.
/// Blank items are ignored.
pub fn normalize_directives<'a, I>(items: I) -> Result<Vec<String>, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut directives = items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .map(str::parse::<RobotsDirective>)
        .collect::<Result<Vec<_>, _>>()?;
    directives.sort_unstable();
    directives.dedup();
    Ok(directives
        .into_iter()
        .map(|directive| directive.as_str().to_string())
        .collect())
}
