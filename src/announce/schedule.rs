//! Pending-announcement bookkeeping.
//!
//! Delayed posts are held in memory only. The table exists so every
//! pending announcement has an explicit identity and lifecycle instead of
//! living as an anonymous sleeping task; a restart during the delay window
//! still loses the post, which is an accepted limitation and is logged as
//! such when scheduling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Local};
use serenity::model::id::ChannelId;

/// One announcement waiting for its delay to elapse.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    pub channel: ChannelId,
    pub channel_name: String,
    pub fire_at: DateTime<Local>,
}

/// Table of announcements whose delay has not elapsed yet, keyed by a
/// generated announcement id.
#[derive(Debug, Default)]
pub struct ScheduleTable {
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, PendingEntry>>,
}

impl ScheduleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pending announcement; returns its id and fire time.
    pub fn register(
        &self,
        channel: ChannelId,
        channel_name: &str,
        delay: Duration,
    ) -> (u64, DateTime<Local>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let fire_at = Local::now()
            + chrono::Duration::from_std(delay).unwrap_or_else(|_| chrono::Duration::zero());

        let entry = PendingEntry {
            channel,
            channel_name: channel_name.to_string(),
            fire_at,
        };
        self.entries
            .lock()
            .expect("schedule table lock poisoned")
            .insert(id, entry);

        (id, fire_at)
    }

    /// Remove an entry once its delay has elapsed (or its task failed).
    pub fn complete(&self, id: u64) -> Option<PendingEntry> {
        self.entries
            .lock()
            .expect("schedule table lock poisoned")
            .remove(&id)
    }

    /// Number of announcements still waiting.
    pub fn pending(&self) -> usize {
        self.entries
            .lock()
            .expect("schedule table lock poisoned")
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_complete() {
        let table = ScheduleTable::new();
        assert_eq!(table.pending(), 0);

        let (id, _) = table.register(ChannelId::new(10), "general", Duration::from_secs(60));
        assert_eq!(table.pending(), 1);

        let entry = table.complete(id).unwrap();
        assert_eq!(entry.channel, ChannelId::new(10));
        assert_eq!(entry.channel_name, "general");
        assert_eq!(table.pending(), 0);

        // Completing twice is a no-op.
        assert!(table.complete(id).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let table = ScheduleTable::new();
        let (a, _) = table.register(ChannelId::new(10), "a", Duration::from_secs(1));
        let (b, _) = table.register(ChannelId::new(10), "a", Duration::from_secs(1));
        assert_ne!(a, b);
        assert_eq!(table.pending(), 2);
    }

    #[test]
    fn test_fire_time_reflects_delay() {
        let table = ScheduleTable::new();
        let before = Local::now();
        let (_, fire_at) = table.register(ChannelId::new(10), "a", Duration::from_secs(3600));
        assert!(fire_at >= before + chrono::Duration::seconds(3599));
    }
}
