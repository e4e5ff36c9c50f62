//! Configuration type definitions.

use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    pub announce: Option<AnnounceConfig>,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub token: String,
    /// Only DMs from this user are treated as announcement requests.
    pub owner: u64,
}

/// Announcement rendering settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnounceConfig {
    /// Footer text placed on every announcement embed.
    pub footer: Option<String>,
    /// Whether to DM the owner a usage guide on startup.
    pub send_usage_guide: Option<bool>,
}

impl Config {
    /// Footer text, falling back to the stock footer.
    pub fn footer(&self) -> &str {
        self.announce
            .as_ref()
            .and_then(|a| a.footer.as_deref())
            .unwrap_or("Herald Announcement")
    }

    /// Whether the startup usage guide DM is enabled (default: yes).
    pub fn send_usage_guide(&self) -> bool {
        self.announce
            .as_ref()
            .and_then(|a| a.send_usage_guide)
            .unwrap_or(true)
    }
}
