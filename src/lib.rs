//! Layered HTML metatag defaults.
//!
//! Tag sets are stored per identifier (`global`, `front`, `node`,
//! `node__article`, ...). Rendering a page walks the applicable identifiers
//! from most to least specific and takes, per tag, the first non-empty
//! value, then replaces `[type:name]` tokens.

// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing
    )
)]

pub mod catalog;
pub mod defaults;
pub mod hierarchy;
pub mod invalidation;
pub mod logging;
pub mod merge;
pub mod protected;
pub mod settings;
pub mod store;
pub mod tag_set;
pub mod token;
pub mod utils;

// Re-export commonly used types
pub use catalog::{available_identifiers, label_for, EntityTypeInfo};
pub use defaults::{
    CreateTagSetOptions, DefaultsError, DefaultsManager, PolicyViolation, TagSetSummary,
};
pub use hierarchy::{HierarchyChain, RenderTarget};
pub use invalidation::{cache_tag, ChannelSink, InvalidationSink, NoopSink};
pub use merge::{merge, EffectiveTagSet};
pub use protected::{is_protected, ProtectedSetRegistry, PROTECTED_IDS};
pub use settings::{load_settings, load_settings_from, Settings, SettingsError};
pub use store::{DefaultsStore, MemoryStore, StoreError, YamlStore};
pub use tag_set::{SpecialPage, TagSet, TagValue};
pub use token::{expand, TokenContext, TokenSource};
