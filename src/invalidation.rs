//! Cache invalidation signals emitted when stored tag sets change.
//!
//! Resolved tag sets must not outlive a change to any set in their chain.
//! Every save, delete, revert and install write reports the affected cache
//! tags here; whoever caches rendered pages listens and drops them.

use tokio::sync::broadcast;
use tracing::debug;

/// Cache tag prefix for stored tag sets.
pub const CACHE_TAG_PREFIX: &str = "config:metatag.metatag_defaults.";

/// Cache tag of one stored tag set.
#[must_use]
pub fn cache_tag(id: &str) -> String {
    format!("{CACHE_TAG_PREFIX}{id}")
}

/// Receives cache tags to invalidate.
pub trait InvalidationSink: Send + Sync {
    fn invalidate(&self, tags: &[String]);
}

/// Drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl InvalidationSink for NoopSink {
    fn invalidate(&self, _tags: &[String]) {}
}

/// Fans signals out to any number of subscribers over a broadcast channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: broadcast::Sender<Vec<String>>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<String>> {
        self.sender.subscribe()
    }
}

impl InvalidationSink for ChannelSink {
    fn invalidate(&self, tags: &[String]) {
        // Sending only fails when nobody is subscribed.
        if self.sender.send(tags.to_vec()).is_err() {
            debug!(count = tags.len(), "No invalidation subscribers");
        }
    }
}
