//! Announcement drafts, scheduling, and sent-post bookkeeping.

pub mod draft;
pub mod registry;
pub mod schedule;

pub use draft::{Button, Draft};
pub use registry::{PostRecord, PostRegistry};
pub use schedule::ScheduleTable;
