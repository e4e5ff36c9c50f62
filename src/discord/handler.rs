//! Discord event handling.
//!
//! DMs from the owner become new announcements; replies to previously
//! posted announcements (in the delivery channel) become in-place edits.
//! Every failure on either path is reported back to the sender; nothing
//! here is fatal to the process.

use std::sync::Arc;

use serenity::async_trait;
use serenity::builder::{CreateAttachment, CreateMessage};
use serenity::http::Http;
use serenity::model::channel::{Message, ReactionType};
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{debug, error, info, warn};

use crate::announce::draft::parse_button;
use crate::announce::{Draft, PostRecord, PostRegistry, ScheduleTable};
use crate::config::Config;
use crate::directive::color::{self, DEFAULT_COLOR};
use crate::directive::duration::format_delay;
use crate::directive::{DirectiveKey, DirectiveParser};
use crate::discord::render::{self, RenderContext};
use crate::discord::usage;
use crate::resolve::NameIndex;

const POLL_YES: &str = "✅";
const POLL_NO: &str = "❌";

/// Discord event handler.
pub struct AnnounceHandler {
    config: Config,
    parser: DirectiveParser,
    schedule: Arc<ScheduleTable>,
    registry: Arc<PostRegistry>,
}

impl AnnounceHandler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parser: DirectiveParser::new(),
            schedule: Arc::new(ScheduleTable::new()),
            registry: Arc::new(PostRegistry::new()),
        }
    }

    /// Handle a DM from the owner: parse, resolve, then preview, schedule
    /// or post.
    async fn handle_announcement(&self, ctx: &Context, msg: &Message) -> anyhow::Result<()> {
        let parsed = self.parser.parse(&msg.content);
        let index = NameIndex::from_cache(&ctx.cache);

        let draft = match Draft::build(&parsed, &index) {
            Ok(draft) => draft,
            Err(e) => {
                msg.channel_id.say(&ctx.http, format!("❌ {}", e)).await?;
                return Ok(());
            }
        };

        let render = RenderContext {
            author_name: msg
                .author
                .global_name
                .clone()
                .unwrap_or_else(|| msg.author.name.clone()),
            author_icon: Some(msg.author.face()),
            footer: self.config.footer().to_string(),
        };

        // Re-upload attachments onto the announcement.
        let mut files = Vec::new();
        for attachment in &msg.attachments {
            match CreateAttachment::url(&ctx.http, &attachment.url).await {
                Ok(file) => files.push(file),
                Err(e) => {
                    msg.channel_id
                        .say(
                            &ctx.http,
                            format!(
                                "❌ Could not fetch attachment `{}`: {}",
                                attachment.filename, e
                            ),
                        )
                        .await?;
                    return Ok(());
                }
            }
        }

        if draft.preview {
            return self
                .send_preview(ctx, msg, &draft, &render, parsed.directives.get(DirectiveKey::Mention), files)
                .await;
        }

        if !draft.delay.is_zero() {
            return self.schedule_post(ctx, msg, draft, render, files).await;
        }

        match deliver(&ctx.http, &render, &draft, files, &self.registry).await {
            Ok(_) => {
                info!("Posted announcement to #{}", draft.channel_name);
                msg.channel_id
                    .say(&ctx.http, format!("✅ Sent to #{}!", draft.channel_name))
                    .await?;
            }
            Err(e) => {
                error!("Failed to post to #{}: {}", draft.channel_name, e);
                msg.channel_id
                    .say(
                        &ctx.http,
                        format!("❌ Could not post to #{}: {}", draft.channel_name, e),
                    )
                    .await?;
            }
        }

        Ok(())
    }

    /// Render the draft back to the sender without delivering anything.
    async fn send_preview(
        &self,
        ctx: &Context,
        msg: &Message,
        draft: &Draft,
        render: &RenderContext,
        mention_query: Option<&str>,
        files: Vec<CreateAttachment>,
    ) -> anyhow::Result<()> {
        let when = if draft.delay.is_zero() {
            "immediately".to_string()
        } else {
            format!("after {}", format_delay(draft.delay))
        };
        let header = format!(
            "👀 **Preview** for #{} (would post {}):",
            draft.channel_name, when
        );

        let (embed_text, outside) = render::split_body(&draft.body);
        let preview = CreateMessage::new()
            .content(header)
            .embed(render::build_embed(
                render,
                &embed_text,
                draft.color,
                serenity::model::Timestamp::now(),
            ))
            .components(render::build_components(draft.button.as_ref()));
        msg.channel_id.send_message(&ctx.http, preview).await?;

        let pings = render::mention_content(&outside, &draft.mention_roles, draft.everyone);
        let mut notes = Vec::new();
        if !pings.is_empty() {
            notes.push(pings);
        }
        if let Some(query) = mention_query {
            notes.push(format!("(Mentions: {})", query));
        }
        if !notes.is_empty() {
            msg.channel_id.say(&ctx.http, notes.join("\n")).await?;
        }

        if !files.is_empty() {
            let note = CreateMessage::new()
                .content("*(Attachments included in preview)*")
                .add_files(files);
            msg.channel_id.send_message(&ctx.http, note).await?;
        }

        Ok(())
    }

    /// Park the draft in the schedule table and spawn its delivery task.
    ///
    /// The draft only lives in this process; if the bot restarts before
    /// the delay elapses the announcement is gone. The acknowledgement
    /// says so rather than hiding it.
    async fn schedule_post(
        &self,
        ctx: &Context,
        msg: &Message,
        draft: Draft,
        render: RenderContext,
        files: Vec<CreateAttachment>,
    ) -> anyhow::Result<()> {
        let (id, fire_at) = self
            .schedule
            .register(draft.channel, &draft.channel_name, draft.delay);

        msg.channel_id
            .say(
                &ctx.http,
                format!(
                    "⏳ Scheduled for #{} in {} (at {}). Pending posts are lost if I restart.",
                    draft.channel_name,
                    format_delay(draft.delay),
                    fire_at.format("%H:%M:%S"),
                ),
            )
            .await?;
        info!(
            "Scheduled announcement {} for #{} at {} ({} pending)",
            id,
            draft.channel_name,
            fire_at.format("%H:%M:%S"),
            self.schedule.pending()
        );

        let http = ctx.http.clone();
        let schedule = self.schedule.clone();
        let registry = self.registry.clone();
        let reply_to = msg.channel_id;

        tokio::spawn(async move {
            tokio::time::sleep(draft.delay).await;
            schedule.complete(id);

            match deliver(&http, &render, &draft, files, &registry).await {
                Ok(_) => {
                    info!("Posted scheduled announcement {} to #{}", id, draft.channel_name);
                    let confirmation = format!("✅ Sent to #{}!", draft.channel_name);
                    if let Err(e) = reply_to.say(&http, confirmation).await {
                        warn!("Could not confirm scheduled post {}: {}", id, e);
                    }
                }
                Err(e) => {
                    error!("Scheduled announcement {} failed: {}", id, e);
                    let report =
                        format!("❌ Could not post to #{}: {}", draft.channel_name, e);
                    if let Err(e) = reply_to.say(&http, report).await {
                        warn!("Could not report failure of scheduled post {}: {}", id, e);
                    }
                }
            }
        });

        Ok(())
    }

    /// Handle a reply to one of our announcements: re-parse the reply body
    /// and replace the original rendered content in place.
    ///
    /// `channel`, `mention`, `schedule` and `preview` directives make no
    /// sense for an edit and are ignored.
    async fn handle_edit(&self, ctx: &Context, msg: &Message) -> anyhow::Result<()> {
        let Some(target_id) = msg.message_reference.as_ref().and_then(|r| r.message_id) else {
            return Ok(());
        };
        let Some(guild_id) = msg.guild_id else {
            return Ok(());
        };
        let me = ctx.cache.current_user().id;

        let original = match msg.channel_id.message(&ctx.http, target_id).await {
            Ok(original) => original,
            Err(e) => {
                debug!("Could not fetch replied-to message {}: {}", target_id, e);
                return Ok(());
            }
        };

        // Prefer the registry; fall back to authorship for posts made
        // before the last restart.
        let record = match self.registry.get(target_id) {
            Some(record) => record,
            None if original.author.id == me => {
                let (author_name, author_icon) = original
                    .embeds
                    .first()
                    .and_then(|e| e.author.as_ref())
                    .map(|a| (a.name.clone(), a.icon_url.clone()))
                    .unwrap_or_else(|| (original.author.name.clone(), None));
                PostRecord {
                    channel: msg.channel_id,
                    guild: guild_id,
                    author_name,
                    author_icon,
                    created: original.timestamp,
                }
            }
            None => return Ok(()),
        };

        let parsed = self.parser.parse(&msg.content);

        let color = match parsed.directives.get(DirectiveKey::Color) {
            Some(value) => match color::parse_color(value) {
                Ok(color) => color,
                Err(e) => {
                    msg.channel_id.say(&ctx.http, format!("❌ {}", e)).await?;
                    return Ok(());
                }
            },
            None => DEFAULT_COLOR,
        };

        let button = match parsed.directives.get(DirectiveKey::Button) {
            Some(value) => match parse_button(value) {
                Ok(button) => Some(button),
                Err(e) => {
                    msg.channel_id.say(&ctx.http, format!("❌ {}", e)).await?;
                    return Ok(());
                }
            },
            None => None,
        };

        let render = RenderContext {
            author_name: record.author_name.clone(),
            author_icon: record.author_icon.clone(),
            footer: self.config.footer().to_string(),
        };
        let edit = render::build_edit(
            &render,
            &parsed.body,
            color,
            button.as_ref(),
            parsed.directives.flag(DirectiveKey::Everyone),
            record.created,
        );

        match record.channel.edit_message(&ctx.http, target_id, edit).await {
            Ok(_) => {
                info!("Edited announcement {} in place", target_id);
                // Keep the channel clean: the edit request has served its purpose.
                if let Err(e) = msg.delete(&ctx.http).await {
                    debug!("Could not delete edit request: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to edit announcement {}: {}", target_id, e);
                msg.channel_id
                    .say(&ctx.http, format!("❌ Could not edit that announcement: {}", e))
                    .await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl EventHandler for AnnounceHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        if msg.author.id == ctx.cache.current_user().id {
            return;
        }
        // Announcements are an owner-only feature.
        if msg.author.id.get() != self.config.discord.owner {
            return;
        }

        let result = if msg.guild_id.is_none() {
            self.handle_announcement(&ctx, &msg).await
        } else if msg.message_reference.is_some() {
            self.handle_edit(&ctx, &msg).await
        } else {
            Ok(())
        };

        if let Err(e) = result {
            error!("Failed to handle message from owner: {:#}", e);
            let _ = msg
                .channel_id
                .say(&ctx.http, format!("❌ Something went wrong: {}", e))
                .await;
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Discord bot connected as {}", ready.user.name);

        if self.config.send_usage_guide() {
            if let Err(e) = usage::send_usage_guide(&ctx, self.config.discord.owner).await {
                warn!("Could not DM the usage guide to the owner (are DMs open?): {}", e);
            }
        }
    }
}

/// Render and send a draft, add poll reactions, and record the post for
/// later edits. Used by both the immediate and the scheduled path.
async fn deliver(
    http: &Arc<Http>,
    render: &RenderContext,
    draft: &Draft,
    files: Vec<CreateAttachment>,
    registry: &PostRegistry,
) -> serenity::Result<Message> {
    let message = render::build_message(render, draft).add_files(files);
    let sent = draft.channel.send_message(http, message).await?;

    if draft.poll {
        sent.react(http, ReactionType::Unicode(POLL_YES.to_string()))
            .await?;
        sent.react(http, ReactionType::Unicode(POLL_NO.to_string()))
            .await?;
    }

    registry.insert(
        sent.id,
        PostRecord {
            channel: draft.channel,
            guild: draft.guild,
            author_name: render.author_name.clone(),
            author_icon: render.author_icon.clone(),
            created: sent.timestamp,
        },
    );

    Ok(sent)
}
