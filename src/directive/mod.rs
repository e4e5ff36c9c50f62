//! The `key: value` directive grammar for announcement messages.

pub mod color;
pub mod duration;
pub mod parser;

pub use parser::{DirectiveKey, DirectiveParser, DirectiveSet, ParsedMessage};
