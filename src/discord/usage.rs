//! Startup usage guide sent to the owner.

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::id::UserId;
use serenity::prelude::*;

/// Build the usage-guide embed listing every directive key.
pub fn usage_embed() -> CreateEmbed {
    CreateEmbed::new()
        .title("📢 Herald")
        .colour(0x3498DB)
        .description("I am ready! Send me a DM to make an announcement.")
        .field(
            "🔑 Directive keys",
            "`channel: name` - Fuzzy search for the target channel (required)\n\
             `color: red/0x2ecc71` - Set embed color\n\
             `mention: role, role` - Ping roles by name\n\
             `everyone: true` - Ping @everyone\n\
             `preview: true` - See it before sending (shows target and delay)\n\
             `poll: true` - Add vote reactions\n\
             `schedule: 1h 30m` - Delayed posting (s/m/h/d)\n\
             `button: Label | URL` - Add a link button\n\n\
             Reply to a posted announcement to edit it in place.",
            false,
        )
        .field(
            "📝 Example",
            "channel: general\n\
             color: blue\n\
             mention: Gamers, Updates\n\
             button: Website | https://example.com\n\
             poll: true\n\
             Big news coming soon!",
            false,
        )
}

/// DM the usage guide to the configured owner.
pub async fn send_usage_guide(ctx: &Context, owner: u64) -> serenity::Result<()> {
    let dm = UserId::new(owner).create_dm_channel(&ctx.http).await?;
    dm.id
        .send_message(&ctx.http, CreateMessage::new().embed(usage_embed()))
        .await?;
    Ok(())
}
