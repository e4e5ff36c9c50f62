//! Directive line parsing.
//!
//! Announcement messages are free-form text with `key: value` lines mixed
//! in. The parser pulls out the recognized keys and leaves everything else
//! as the announcement body. Validation of the values happens later, when
//! the draft is built; this layer only separates text from directives.

use std::collections::HashMap;

use fancy_regex::Regex;

/// The fixed set of recognized directive keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKey {
    Channel,
    Color,
    Mention,
    Everyone,
    Button,
    Poll,
    Schedule,
    Preview,
}

impl DirectiveKey {
    /// Look up a key by its (lower-cased) name. Unknown names are not
    /// directives and stay in the body.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "channel" => Some(Self::Channel),
            "color" => Some(Self::Color),
            "mention" => Some(Self::Mention),
            "everyone" => Some(Self::Everyone),
            "button" => Some(Self::Button),
            "poll" => Some(Self::Poll),
            "schedule" => Some(Self::Schedule),
            "preview" => Some(Self::Preview),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Color => "color",
            Self::Mention => "mention",
            Self::Everyone => "everyone",
            Self::Button => "button",
            Self::Poll => "poll",
            Self::Schedule => "schedule",
            Self::Preview => "preview",
        }
    }
}

/// Raw directive values keyed by directive name.
///
/// Repeating a key overwrites the earlier value: the last occurrence in
/// the message wins. That is deliberate, so a correction typed at the
/// bottom of a long draft takes effect.
#[derive(Debug, Clone, Default)]
pub struct DirectiveSet {
    values: HashMap<DirectiveKey, String>,
}

impl DirectiveSet {
    pub fn get(&self, key: DirectiveKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Interpret a directive as a boolean flag (`true` switches it on,
    /// anything else leaves it off).
    pub fn flag(&self, key: DirectiveKey) -> bool {
        self.get(key).map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
    }

    pub fn insert(&mut self, key: DirectiveKey, value: String) {
        self.values.insert(key, value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of parsing one incoming message.
#[derive(Debug, Clone)]
pub struct ParsedMessage {
    /// Non-directive lines, in original order, with outer blank lines trimmed.
    pub body: String,
    /// Recognized directives.
    pub directives: DirectiveSet,
}

/// Splits message text into body and directives.
#[derive(Debug)]
pub struct DirectiveParser {
    /// Pattern for a candidate `name: value` line.
    line_pattern: Regex,
}

impl Default for DirectiveParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveParser {
    pub fn new() -> Self {
        Self {
            line_pattern: Regex::new(r"^\s*([A-Za-z]+)\s*:\s*(.*)$").unwrap(),
        }
    }

    /// Parse message text into `(body, directives)`.
    ///
    /// Directive lines may appear anywhere in the message, not just at the
    /// top. Lines that look like `key: value` but use an unrecognized key
    /// are kept as body text.
    pub fn parse(&self, text: &str) -> ParsedMessage {
        let mut directives = DirectiveSet::default();
        let mut body_lines: Vec<&str> = Vec::new();

        for line in text.lines() {
            let captures = self.line_pattern.captures(line).ok().flatten();
            let key = captures.as_ref().and_then(|caps| {
                DirectiveKey::from_name(&caps[1].to_lowercase())
            });

            match (captures, key) {
                (Some(caps), Some(key)) => {
                    directives.insert(key, caps[2].trim().to_string());
                }
                _ => body_lines.push(line),
            }
        }

        // Trim leading/trailing blank lines, keep interior ones.
        while body_lines.first().is_some_and(|l| l.trim().is_empty()) {
            body_lines.remove(0);
        }
        while body_lines.last().is_some_and(|l| l.trim().is_empty()) {
            body_lines.pop();
        }

        ParsedMessage {
            body: body_lines.join("\n"),
            directives,
        }
    }
}
