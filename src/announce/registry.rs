//! Sent-announcement registry.
//!
//! Maps the ids of messages this bot has posted back to the context they
//! were rendered with, so a reply to one of them can be recognized as an
//! edit request and re-rendered with the same author attribution. The
//! registry is process-local; announcements posted before a restart can
//! still be edited through the author-check fallback in the handler.

use std::collections::HashMap;
use std::sync::Mutex;

use serenity::model::id::{ChannelId, GuildId, MessageId};
use serenity::model::Timestamp;

/// Render context of one posted announcement.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub channel: ChannelId,
    pub guild: GuildId,
    /// Display name the announcement was attributed to.
    pub author_name: String,
    /// Avatar URL used for the embed author line.
    pub author_icon: Option<String>,
    /// Creation timestamp of the original post, preserved across edits.
    pub created: Timestamp,
}

/// Lookup table from sent message id to its render context.
#[derive(Debug, Default)]
pub struct PostRegistry {
    posts: Mutex<HashMap<MessageId, PostRecord>>,
}

impl PostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: MessageId, record: PostRecord) {
        self.posts
            .lock()
            .expect("post registry lock poisoned")
            .insert(id, record);
    }

    pub fn get(&self, id: MessageId) -> Option<PostRecord> {
        self.posts
            .lock()
            .expect("post registry lock poisoned")
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.posts
            .lock()
            .expect("post registry lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
