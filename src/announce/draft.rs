//! Announcement draft construction.
//!
//! A draft is the fully resolved, immutable description of one
//! announcement: target channel, color, mentions, button, poll flag and
//! delay. Building one is where all directive validation happens; the
//! parser upstream stays policy-free.

use std::time::Duration;

use serenity::model::id::{ChannelId, GuildId, RoleId};

use crate::common::error::{DraftError, DraftResult};
use crate::directive::color::{self, DEFAULT_COLOR};
use crate::directive::duration;
use crate::directive::{DirectiveKey, ParsedMessage};
use crate::resolve::NameIndex;

/// A link button attached to an announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub url: String,
}

/// A resolved, ready-to-render announcement.
#[derive(Debug, Clone)]
pub struct Draft {
    pub body: String,
    pub channel: ChannelId,
    pub channel_name: String,
    pub guild: GuildId,
    pub color: u32,
    /// Roles to ping, in query order, duplicates removed.
    pub mention_roles: Vec<RoleId>,
    pub everyone: bool,
    pub button: Option<Button>,
    pub poll: bool,
    pub delay: Duration,
    pub preview: bool,
}

impl Draft {
    /// Build a draft from a parsed message and a name snapshot.
    ///
    /// `channel` is the only mandatory directive. Every other directive is
    /// validated if present; the first failure aborts the build, so the
    /// sender gets one concrete problem to fix at a time.
    pub fn build(parsed: &ParsedMessage, index: &NameIndex) -> DraftResult<Draft> {
        let directives = &parsed.directives;

        let channel_query = directives
            .get(DirectiveKey::Channel)
            .filter(|q| !q.is_empty())
            .ok_or(DraftError::MissingChannel)?;

        let channel = index.resolve_channel(channel_query).ok_or_else(|| {
            DraftError::ChannelNotFound {
                query: channel_query.to_string(),
            }
        })?;

        let color = match directives.get(DirectiveKey::Color) {
            Some(value) => color::parse_color(value)?,
            None => DEFAULT_COLOR,
        };

        let delay = match directives.get(DirectiveKey::Schedule) {
            Some(value) => duration::parse_delay(value)?,
            None => Duration::ZERO,
        };

        let button = match directives.get(DirectiveKey::Button) {
            Some(value) => Some(parse_button(value)?),
            None => None,
        };

        let mention_roles = match directives.get(DirectiveKey::Mention) {
            Some(queries) => {
                let outcome = index.resolve_mentions(channel.guild, queries);
                if !outcome.unresolved.is_empty() {
                    return Err(DraftError::RolesNotFound {
                        queries: outcome.unresolved,
                    });
                }
                outcome.roles
            }
            None => Vec::new(),
        };

        Ok(Draft {
            body: parsed.body.clone(),
            channel: channel.id,
            channel_name: channel.name.clone(),
            guild: channel.guild,
            color,
            mention_roles,
            everyone: directives.flag(DirectiveKey::Everyone),
            button,
            poll: directives.flag(DirectiveKey::Poll),
            delay,
            preview: directives.flag(DirectiveKey::Preview),
        })
    }
}

/// Parse a `button:` value of the form `Label | URL`.
///
/// Exactly one `|` separator is required, and the URL must carry an http
/// or https scheme. A bad URL is rejected rather than passed through; a
/// link button pointing nowhere is not worth posting.
pub fn parse_button(spec: &str) -> DraftResult<Button> {
    let parts: Vec<&str> = spec.split('|').collect();
    if parts.len() != 2 {
        return Err(DraftError::BadButton {
            spec: spec.to_string(),
        });
    }

    let label = parts[0].trim();
    let url = parts[1].trim();
    if label.is_empty() || url.is_empty() {
        return Err(DraftError::BadButton {
            spec: spec.to_string(),
        });
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(DraftError::BadButtonUrl {
            url: url.to_string(),
        });
    }

    Ok(Button {
        label: label.to_string(),
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DirectiveParser;
    use crate::resolve::index::{ChannelEntry, RoleEntry};

    fn make_index() -> NameIndex {
        let guild = GuildId::new(1);
        NameIndex {
            channels: vec![
                ChannelEntry {
                    name: "general-chat".to_string(),
                    id: ChannelId::new(10),
                    guild,
                },
                ChannelEntry {
                    name: "random".to_string(),
                    id: ChannelId::new(11),
                    guild,
                },
            ],
            roles: vec![
                RoleEntry {
                    name: "Gamers".to_string(),
                    id: RoleId::new(20),
                    guild,
                },
                RoleEntry {
                    name: "Updates".to_string(),
                    id: RoleId::new(21),
                    guild,
                },
            ],
        }
    }

    fn build(text: &str) -> DraftResult<Draft> {
        let parsed = DirectiveParser::new().parse(text);
        Draft::build(&parsed, &make_index())
    }

    #[test]
    fn test_full_scenario() {
        let draft = build("channel: general\ncolor: red\nHello team").unwrap();

        assert_eq!(draft.channel, ChannelId::new(10));
        assert_eq!(draft.channel_name, "general-chat");
        assert_eq!(draft.color, 0xFF0000);
        assert_eq!(draft.body, "Hello team");
        assert_eq!(draft.delay, Duration::ZERO);
        assert!(!draft.preview);
    }

    #[test]
    fn test_missing_channel_is_hard_failure() {
        let err = build("color: red\nHello").unwrap_err();
        assert_eq!(err, DraftError::MissingChannel);
    }

    #[test]
    fn test_unknown_channel_reports_query() {
        let err = build("channel: archive\nHello").unwrap_err();
        assert_eq!(
            err,
            DraftError::ChannelNotFound {
                query: "archive".to_string()
            }
        );
    }

    #[test]
    fn test_mentions_resolved_in_order() {
        let draft = build("channel: general\nmention: updates, gamers\nHello").unwrap();
        assert_eq!(
            draft.mention_roles,
            vec![RoleId::new(21), RoleId::new(20)]
        );
    }

    #[test]
    fn test_unresolved_mentions_halt_with_list() {
        let err = build("channel: general\nmention: gamers, ghosts\nHello").unwrap_err();
        assert_eq!(
            err,
            DraftError::RolesNotFound {
                queries: vec!["ghosts".to_string()]
            }
        );
    }

    #[test]
    fn test_schedule_round_trip() {
        let draft = build("channel: general\nschedule: 1h 30m\nHello").unwrap();
        assert_eq!(draft.delay, Duration::from_secs(5400));

        let draft = build("channel: general\nschedule: 45m\nHello").unwrap();
        assert_eq!(draft.delay, Duration::from_secs(2700));
    }

    #[test]
    fn test_flags() {
        let draft =
            build("channel: general\npoll: true\neveryone: true\npreview: true\nHello").unwrap();
        assert!(draft.poll);
        assert!(draft.everyone);
        assert!(draft.preview);
    }

    #[test]
    fn test_button_happy_path() {
        let draft = build("channel: general\nbutton: Website | https://example.com\nHi").unwrap();
        assert_eq!(
            draft.button,
            Some(Button {
                label: "Website".to_string(),
                url: "https://example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_button_separator_count() {
        assert!(matches!(
            parse_button("just a label"),
            Err(DraftError::BadButton { .. })
        ));
        assert!(matches!(
            parse_button("a | b | c"),
            Err(DraftError::BadButton { .. })
        ));
    }

    #[test]
    fn test_button_url_policy_rejects_non_http() {
        // Pinned policy: malformed URLs are rejected, not passed through.
        let err = parse_button("Vote|notaurl").unwrap_err();
        assert_eq!(
            err,
            DraftError::BadButtonUrl {
                url: "notaurl".to_string()
            }
        );
    }

    #[test]
    fn test_color_error_names_value() {
        let err = build("channel: general\ncolor: sparkly\nHello").unwrap_err();
        assert!(err.to_string().contains("sparkly"));
    }

    #[test]
    fn test_bad_schedule_rejected() {
        let err = build("channel: general\nschedule: whenever\nHello").unwrap_err();
        assert!(matches!(err, DraftError::BadDuration { .. }));
    }
}
