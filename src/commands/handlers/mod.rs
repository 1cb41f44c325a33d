//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 3.0.0: ScheduleHandler (scadd, sclist, scedit, scsitu) and ReminderSettingsHandler (screm)
//! - 1.0.0: Initial extraction from monolithic command_handler.rs

pub mod reminders;
pub mod schedule;

use anyhow::Result;
use serenity::builder::{CreateComponents, CreateEmbed};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use super::handler::SlashCommandHandler;
use crate::core::truncate_for_message;

/// Create all registered command handlers
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(schedule::ScheduleHandler),
        Arc::new(reminders::ReminderSettingsHandler),
    ]
}

/// Acknowledge now, answer later; backend calls can exceed Discord's 3s window
pub(crate) async fn defer(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    ephemeral: bool,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                .interaction_response_data(|data| data.ephemeral(ephemeral))
        })
        .await?;
    Ok(())
}

pub(crate) async fn followup_text(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: impl AsRef<str>,
    ephemeral: bool,
) -> Result<()> {
    let content = truncate_for_message(content.as_ref());
    command
        .create_followup_message(&serenity_ctx.http, |message| {
            message.content(content).ephemeral(ephemeral)
        })
        .await?;
    Ok(())
}

pub(crate) async fn followup_embed(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    embed: CreateEmbed,
    components: Option<CreateComponents>,
    ephemeral: bool,
) -> Result<()> {
    command
        .create_followup_message(&serenity_ctx.http, |message| {
            message.add_embed(embed).ephemeral(ephemeral);
            if let Some(components) = components {
                message.set_components(components);
            }
            message
        })
        .await?;
    Ok(())
}
