use crate::tag_set::{SpecialPage, TagSet, GLOBAL_ID};

/// Defaults shipped with the module, written on install.
///
/// The protected sets (`global` and the special pages) come first, followed
/// by the entity-type sets for content, taxonomy terms and users.
#[must_use]
pub fn module_baselines() -> Vec<TagSet> {
    vec![
        TagSet::new(GLOBAL_ID, "Global")
            .protected()
            .with_tag("title", "[current-page:title] | [site:name]")
            .with_tag("canonical_url", "[current-page:url]"),
        TagSet::new(SpecialPage::Front.id(), SpecialPage::Front.label())
            .protected()
            .with_tag("title", "[site:name]")
            .with_tag("canonical_url", "[site:url]"),
        TagSet::new(SpecialPage::AccessDenied.id(), SpecialPage::AccessDenied.label())
            .protected()
            .with_tag("canonical_url", "[site:url]"),
        TagSet::new(SpecialPage::NotFound.id(), SpecialPage::NotFound.label())
            .protected()
            .with_tag("title", "Page not found | [site:name]")
            .with_tag("canonical_url", "[site:url]"),
        TagSet::new("node", "Content")
            .with_tag("title", "[node:title] | [site:name]")
            .with_tag("description", "[node:summary]")
            .with_tag("canonical_url", "[node:url]"),
        TagSet::new("taxonomy_term", "Taxonomy term")
            .with_tag("title", "[term:name] | [site:name]")
            .with_tag("description", "[term:description]")
            .with_tag("canonical_url", "[term:url]"),
        TagSet::new("user", "User")
            .with_tag("title", "[user:display-name] | [site:name]")
            .with_tag("description", "[site:name]")
            .with_tag("canonical_url", "[user:url]"),
    ]
}
