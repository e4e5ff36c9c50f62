//! Per-invocation snapshot of channel and role names.
//!
//! The index is built from the serenity cache each time a message is
//! handled and thrown away afterwards; nothing here holds live guild
//! state. Resolution works on the snapshot only, which keeps it pure and
//! testable without a gateway connection.

use serenity::cache::Cache;
use serenity::model::channel::ChannelType;
use serenity::model::id::{ChannelId, GuildId, RoleId};

use crate::resolve::matcher;

/// A text channel the bot can post to.
#[derive(Debug, Clone)]
pub struct ChannelEntry {
    pub name: String,
    pub id: ChannelId,
    pub guild: GuildId,
}

/// A mentionable role.
#[derive(Debug, Clone)]
pub struct RoleEntry {
    pub name: String,
    pub id: RoleId,
    pub guild: GuildId,
}

/// Read-only name snapshot consumed by draft building.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    pub channels: Vec<ChannelEntry>,
    pub roles: Vec<RoleEntry>,
}

/// Outcome of resolving a comma-separated `mention:` value.
#[derive(Debug, Clone, Default)]
pub struct MentionResolution {
    /// Resolved role ids, in query order, duplicates removed.
    pub roles: Vec<RoleId>,
    /// Query tokens that did not resolve to any role.
    pub unresolved: Vec<String>,
}

impl NameIndex {
    /// Snapshot every cached guild's text channels and roles.
    pub fn from_cache(cache: &Cache) -> Self {
        let mut index = NameIndex::default();

        for guild_id in cache.guilds() {
            let Some(guild) = cache.guild(guild_id) else {
                continue;
            };

            for channel in guild.channels.values() {
                if channel.kind == ChannelType::Text || channel.kind == ChannelType::News {
                    index.channels.push(ChannelEntry {
                        name: channel.name.clone(),
                        id: channel.id,
                        guild: guild_id,
                    });
                }
            }

            for (role_id, role) in &guild.roles {
                if role.name != "@everyone" {
                    index.roles.push(RoleEntry {
                        name: role.name.clone(),
                        id: *role_id,
                        guild: guild_id,
                    });
                }
            }
        }

        index
    }

    /// Resolve a channel query against all known channels.
    pub fn resolve_channel(&self, query: &str) -> Option<&ChannelEntry> {
        let names: Vec<&str> = self.channels.iter().map(|c| c.name.as_str()).collect();
        matcher::resolve(query, &names).map(|r| &self.channels[r.index])
    }

    /// Resolve a comma-separated role query list within one guild.
    ///
    /// Each token is resolved independently; failures are collected, not
    /// dropped, so the caller can warn about every one of them.
    pub fn resolve_mentions(&self, guild: GuildId, queries: &str) -> MentionResolution {
        let guild_roles: Vec<&RoleEntry> =
            self.roles.iter().filter(|r| r.guild == guild).collect();
        let names: Vec<&str> = guild_roles.iter().map(|r| r.name.as_str()).collect();

        let mut outcome = MentionResolution::default();

        for token in queries.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            match matcher::resolve(token, &names) {
                Some(resolved) => {
                    let id = guild_roles[resolved.index].id;
                    if !outcome.roles.contains(&id) {
                        outcome.roles.push(id);
                    }
                }
                None => outcome.unresolved.push(token.to_string()),
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_index() -> NameIndex {
        let guild = GuildId::new(1);
        let other = GuildId::new(2);
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
                RoleEntry {
                    name: "Gamers".to_string(),
                    id: RoleId::new(30),
                    guild: other,
                },
            ],
        }
    }

    #[test]
    fn test_resolve_channel_fuzzy() {
        let index = make_index();
        let entry = index.resolve_channel("general").unwrap();
        assert_eq!(entry.id, ChannelId::new(10));

        assert!(index.resolve_channel("announcements").is_none());
    }

    #[test]
    fn test_resolve_mentions_scoped_to_guild() {
        let index = make_index();
        let outcome = index.resolve_mentions(GuildId::new(1), "gamers, updates");

        assert_eq!(outcome.roles, vec![RoleId::new(20), RoleId::new(21)]);
        assert!(outcome.unresolved.is_empty());
    }

    #[test]
    fn test_unresolved_tokens_reported_individually() {
        let index = make_index();
        let outcome = index.resolve_mentions(GuildId::new(1), "gamers, nosuchrole, alsomissing");

        assert_eq!(outcome.roles, vec![RoleId::new(20)]);
        assert_eq!(
            outcome.unresolved,
            vec!["nosuchrole".to_string(), "alsomissing".to_string()]
        );
    }

    #[test]
    fn test_duplicate_mentions_removed() {
        let index = make_index();
        let outcome = index.resolve_mentions(GuildId::new(1), "gamers, Gamers, gamers");

        assert_eq!(outcome.roles, vec![RoleId::new(20)]);
    }

    #[test]
    fn test_empty_tokens_skipped() {
        let index = make_index();
        let outcome = index.resolve_mentions(GuildId::new(1), "gamers, , ");

        assert_eq!(outcome.roles.len(), 1);
        assert!(outcome.unresolved.is_empty());
    }
}
