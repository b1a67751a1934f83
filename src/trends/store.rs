//! Channel catalog storage.

use std::sync::Arc;

use dashmap::DashMap;

use crate::trends::types::Channel;

/// Storage seam for the channel catalog.
///
/// Implementations must be safe to share between request handlers.
pub trait ChannelRepository: Send + Sync {
    fn get(&self, id: &str) -> Option<Channel>;

    /// Case-insensitive match on the channel title, ignoring surrounding whitespace.
    fn find_by_title(&self, title: &str) -> Option<Channel>;

    /// Match on the channel handle, with or without the leading `@`.
    fn find_by_handle(&self, handle: &str) -> Option<Channel>;

    /// Insert or replace a channel. Returns true if it replaced an existing one.
    fn upsert(&self, channel: Channel) -> bool;

    fn count(&self) -> usize;
}

/// Thread-safe in-memory catalog.
#[derive(Clone, Default)]
pub struct InMemoryChannelRepository {
    inner: Arc<DashMap<String, Channel>>,
}

impl InMemoryChannelRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, predicate: impl Fn(&Channel) -> bool) -> Option<Channel> {
        self.inner
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }
}

fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_lowercase()
}

impl ChannelRepository for InMemoryChannelRepository {
    fn get(&self, id: &str) -> Option<Channel> {
        self.inner.get(id).map(|r| r.value().clone())
    }

    fn find_by_title(&self, title: &str) -> Option<Channel> {
        let wanted = title.trim().to_lowercase();
        self.find(|c| c.title.trim().to_lowercase() == wanted)
    }

    fn find_by_handle(&self, handle: &str) -> Option<Channel> {
        let wanted = normalize_handle(handle);
        if wanted.is_empty() {
            return None;
        }
        self.find(|c| {
            c.custom_url
                .as_deref()
                .is_some_and(|url| normalize_handle(url) == wanted)
        })
    }

    fn upsert(&self, channel: Channel) -> bool {
        self.inner.insert(channel.id.clone(), channel).is_some()
    }

    fn count(&self) -> usize {
        self.inner.len()
    }
}
