//! Announcement rendering.
//!
//! Turns a draft into serenity message builders: the embed carrying the
//! body, the plain-text content line carrying the pings, and the optional
//! link-button row. The string-level helpers are kept free of serenity
//! state so they can be tested directly.

use serenity::builder::{
    CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateMessage, EditMessage,
};
use serenity::model::id::RoleId;
use serenity::model::{Colour, Timestamp};

use crate::announce::{Button, Draft};

/// Author attribution and footer carried onto every rendered embed.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub author_name: String,
    pub author_icon: Option<String>,
    pub footer: String,
}

/// Replace `:shortcode:` sequences with their Unicode emoji.
///
/// Unknown shortcodes are left untouched.
pub fn resolve_emojis(message: &str) -> String {
    let mut result = String::with_capacity(message.len());
    let mut chars = message.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != ':' {
            result.push(ch);
            continue;
        }

        let mut shortcode = String::new();
        let mut closed = false;
        while let Some(&next) = chars.peek() {
            if next == ':' {
                chars.next();
                closed = true;
                break;
            } else if next.is_alphanumeric() || matches!(next, '_' | '-' | '+') {
                shortcode.push(next);
                chars.next();
            } else {
                break;
            }
        }

        match (closed, emojis::get_by_shortcode(&shortcode.to_lowercase())) {
            (true, Some(emoji)) => result.push_str(emoji.as_str()),
            (true, None) => {
                result.push(':');
                result.push_str(&shortcode);
                result.push(':');
            }
            (false, _) => {
                result.push(':');
                result.push_str(&shortcode);
            }
        }
    }

    result
}

/// Split a body into embed text and lines that must stay outside the
/// embed. Discord only fires `@everyone`/`@here` pings from plain message
/// content, so lines carrying them are lifted out.
pub fn split_body(body: &str) -> (String, Vec<String>) {
    let mut embed_lines: Vec<&str> = Vec::new();
    let mut outside: Vec<String> = Vec::new();

    for line in body.lines() {
        if line.contains("@everyone") || line.contains("@here") {
            outside.push(line.to_string());
        } else {
            embed_lines.push(line);
        }
    }

    (embed_lines.join("\n"), outside)
}

/// Assemble the plain-text content line: lifted body lines, role pings,
/// and the spoilered everyone ping.
pub fn mention_content(outside: &[String], roles: &[RoleId], everyone: bool) -> String {
    let mut lines: Vec<String> = outside.to_vec();

    if !roles.is_empty() {
        let pings: Vec<String> = roles.iter().map(|r| format!("<@&{}>", r)).collect();
        lines.push(pings.join(" "));
    }
    if everyone {
        lines.push("||@everyone||".to_string());
    }

    lines.join("\n")
}

/// Build the announcement embed.
pub fn build_embed(
    render: &RenderContext,
    text: &str,
    color: u32,
    timestamp: Timestamp,
) -> CreateEmbed {
    let mut author = CreateEmbedAuthor::new(&render.author_name);
    if let Some(icon) = &render.author_icon {
        author = author.icon_url(icon);
    }

    let mut embed = CreateEmbed::new()
        .colour(Colour::new(color))
        .author(author)
        .footer(CreateEmbedFooter::new(&render.footer))
        .timestamp(timestamp);

    if !text.is_empty() {
        embed = embed.description(resolve_emojis(text));
    }

    embed
}

/// Build the link-button row, if a button was configured.
pub fn build_components(button: Option<&Button>) -> Vec<CreateActionRow> {
    match button {
        Some(button) => vec![CreateActionRow::Buttons(vec![
            CreateButton::new_link(&button.url).label(&button.label),
        ])],
        None => Vec::new(),
    }
}

/// Build the full message for a new announcement post.
pub fn build_message(render: &RenderContext, draft: &Draft) -> CreateMessage {
    let (embed_text, outside) = split_body(&draft.body);
    let content = mention_content(&outside, &draft.mention_roles, draft.everyone);

    let mut message = CreateMessage::new()
        .embed(build_embed(render, &embed_text, draft.color, Timestamp::now()))
        .components(build_components(draft.button.as_ref()));

    if !content.is_empty() {
        message = message.content(content);
    }

    message
}

/// Build the in-place replacement for an edited announcement.
///
/// Content is always set, so stale pings from the original post are
/// cleared; the original creation timestamp is preserved.
pub fn build_edit(
    render: &RenderContext,
    body: &str,
    color: u32,
    button: Option<&Button>,
    everyone: bool,
    created: Timestamp,
) -> EditMessage {
    let (embed_text, outside) = split_body(body);
    let content = mention_content(&outside, &[], everyone);

    EditMessage::new()
        .content(content)
        .embed(build_embed(render, &embed_text, color, created))
        .components(build_components(button))
}
