//! Tag sets: named metatag values stored under hierarchical identifiers.

mod identifier;
mod robots;
mod types;
mod validation;

pub use identifier::{
    bundle_identifier, parse_identifier, IdentifierKind, SpecialPage, BUNDLE_SEPARATOR, GLOBAL_ID,
};
pub use robots::{normalize_directives, RobotsDirective, ROBOTS_TAG};
pub use types::{TagSet, TagValue};
pub use validation::{normalize_tags, InvalidTag};
