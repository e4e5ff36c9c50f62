//! Discord connection, event handling, and announcement rendering.

pub mod handler;
pub mod render;
pub mod usage;

pub use handler::AnnounceHandler;
