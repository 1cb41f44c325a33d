//! Reminder settings command handler
//!
//! Handles: screm
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::id::ChannelId;
use serenity::model::mention::Mentionable;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use super::{defer, followup_embed, followup_text};
use crate::backend::NotificationSettings;
use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{get_channel_option, get_integer_option};
use crate::core::embeds::{error_message, COLOR_INFO};
use crate::features::reminders::ConfigureError;

/// Handler for `/screm`
pub struct ReminderSettingsHandler;

#[async_trait]
impl SlashCommandHandler for ReminderSettingsHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["screm"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        defer(serenity_ctx, command, true).await?;

        let days = get_integer_option(&command.data.options, "days").unwrap_or_default();
        let channel_id = get_channel_option(&command.data.options, "channel")
            .map(|id| id.to_string())
            .unwrap_or_default();

        match ctx.scheduler.configure(days, &channel_id).await {
            Ok(settings) => {
                info!(
                    "[{request_id}] Reminders set to {} day(s) before, channel {}",
                    settings.notification_days, settings.channel_id
                );
                followup_embed(serenity_ctx, command, settings_embed(&settings), None, false).await
            }
            Err(e) => {
                warn!("[{request_id}] Reminder settings rejected: {e}");
                followup_text(serenity_ctx, command, configure_error_message(&e), true).await
            }
        }
    }
}

/// Validation failures read as plain messages; backend failures carry the error
fn configure_error_message(err: &ConfigureError) -> String {
    match err {
        ConfigureError::Backend(e) => error_message("設定の保存に失敗しました。", e),
        other => format!("❌ {other}"),
    }
}

fn settings_embed(settings: &NotificationSettings) -> CreateEmbed {
    let channel = settings
        .channel_id_u64()
        .map(|id| ChannelId(id).mention().to_string())
        .unwrap_or_else(|| format!("`{}`", settings.channel_id));

    let mut embed = CreateEmbed::default();
    embed
        .title("🔔 リマインダー設定完了")
        .description("提出期限前の通知設定を保存しました。Botは毎日自動でチェックします。")
        .color(COLOR_INFO)
        .field("通知日数", format!("`{}日前`", settings.notification_days), true)
        .field("通知先チャンネル", channel, true)
        .footer(|f| f.text("設定はスプレッドシートに保存され、再起動後も引き継がれます。"));
    embed
}
