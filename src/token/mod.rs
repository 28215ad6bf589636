//! Placeholder tokens such as `[site:name]` or `[node:title]`, replaced at
//! render time with values from the current request.

use crate::merge::EffectiveTagSet;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::trace;

/// `[type:name]`, where the name may itself hold further `:`-separated
/// parts (`[node:field_image:url]`).
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z0-9_-]+(?::[^\[\]\s:]+)+)\]").expect("TOKEN_REGEX is a valid regex literal")
});

/// Supplies values for tokens. `lookup` receives the token without its
/// brackets, e.g. `site:name`; `None` leaves the token untouched.
pub trait TokenSource {
    fn lookup(&self, token: &str) -> Option<String>;
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn lookup(&self, token: &str) -> Option<String> {
        (**self).lookup(token)
    }
}

/// Map-backed token values for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenContext {
    values: BTreeMap<String, String>,
}

impl TokenContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(token, value);
        self
    }

    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.values.insert(token.into(), value.into());
    }

    /// Add every value of `other`, replacing existing ones.
    pub fn extend(&mut self, other: &Self) {
        self.values
            .extend(other.values.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TokenSource for TokenContext {
    fn lookup(&self, token: &str) -> Option<String> {
        self.values.get(token).cloned()
    }
}

/// Replace every recognized token in `text`. Unknown tokens stay verbatim
/// and replacement values are not scanned again.
pub fn expand_text<S>(text: &str, source: &S) -> String
where
    S: TokenSource + ?Sized,
{
    TOKEN_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            caps.get(1)
                .and_then(|name| source.lookup(name.as_str()))
                .unwrap_or_else(|| {
                    trace!(token = %whole, "Unresolved token left as is");
                    whole.to_string()
                })
        })
        .into_owned()
}

/// Expand tokens in every value of a merged tag set.
///
/// Never fails. Tags whose value is empty after expansion are dropped.
#[must_use]
pub fn expand<S>(effective: &EffectiveTagSet, source: &S) -> EffectiveTagSet
where
    S: TokenSource + ?Sized,
{
    effective.map_values(|value| value.map_text(|text| expand_text(text, source)))
}
