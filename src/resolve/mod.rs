//! Fuzzy name resolution against a per-invocation name snapshot.

pub mod index;
pub mod matcher;

pub use index::{MentionResolution, NameIndex};
pub use matcher::{MatchRule, Resolved};
