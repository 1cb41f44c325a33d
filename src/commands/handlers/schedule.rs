//! Schedule command handlers
//!
//! Handles: scadd, sclist, scedit, scsitu
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add scsitu status picker
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use super::{defer, followup_embed, followup_text};
use crate::backend::{
    ActionError, AddedSchedule, NewSchedule, ScheduleBackend, ScheduleField, ScheduleRecord,
    SubmissionStatus,
};
use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{get_integer_option, get_string_option};
use crate::core::embeds::{
    error_message, schedule_list_embed, status_or_blank, COLOR_SUCCESS, COLOR_WARNING,
};
use crate::core::truncate_for_embed;
use crate::message_components::MessageComponentHandler;

/// Handler for schedule management commands
pub struct ScheduleHandler;

#[async_trait]
impl SlashCommandHandler for ScheduleHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["scadd", "sclist", "scedit", "scsitu"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "scadd" => self.handle_add(&ctx, serenity_ctx, command, request_id).await,
            "sclist" => self.handle_list(&ctx, serenity_ctx, command, request_id).await,
            "scedit" => self.handle_edit(&ctx, serenity_ctx, command, request_id).await,
            "scsitu" => self.handle_status(&ctx, serenity_ctx, command, request_id).await,
            _ => Ok(()),
        }
    }
}

impl ScheduleHandler {
    /// Handle /scadd - append a schedule row
    async fn handle_add(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        defer(serenity_ctx, command, true).await?;

        let options = &command.data.options;
        let schedule = NewSchedule {
            title: get_string_option(options, "title").unwrap_or_default(),
            shoot_date: get_string_option(options, "shoot_date").unwrap_or_default(),
            due_date: get_string_option(options, "due_date").unwrap_or_default(),
            file_url: get_string_option(options, "file_url").unwrap_or_default(),
            yt_url: get_string_option(options, "yt_url").unwrap_or_default(),
        };

        match ctx.backend.add_schedule(&schedule).await {
            Ok(added) => {
                info!("[{request_id}] Schedule {} added: {}", added.id, schedule.title);
                followup_embed(
                    serenity_ctx,
                    command,
                    added_schedule_embed(&added, &schedule),
                    None,
                    false,
                )
                .await
            }
            Err(e) => {
                warn!("[{request_id}] add failed: {e}");
                followup_text(
                    serenity_ctx,
                    command,
                    error_message("予定の追加に失敗しました。", &e),
                    true,
                )
                .await
            }
        }
    }

    /// Handle /sclist - show every schedule
    async fn handle_list(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        defer(serenity_ctx, command, false).await?;

        match ctx.backend.list_schedules().await {
            Ok(records) if records.is_empty() => {
                debug!("[{request_id}] No schedules registered");
                followup_text(serenity_ctx, command, EMPTY_LIST_MESSAGE, false).await
            }
            Ok(records) => {
                debug!("[{request_id}] Listing {} schedule(s)", records.len());
                followup_embed(serenity_ctx, command, schedule_list_embed(&records), None, false)
                    .await
            }
            Err(e) => {
                warn!("[{request_id}] list failed: {e}");
                followup_text(
                    serenity_ctx,
                    command,
                    error_message("予定一覧の取得に失敗しました。", &e),
                    true,
                )
                .await
            }
        }
    }

    /// Handle /scedit - overwrite one column of one schedule
    async fn handle_edit(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        defer(serenity_ctx, command, true).await?;

        let options = &command.data.options;
        let schedule_id = get_integer_option(options, "schedule_id")
            .ok_or_else(|| anyhow::anyhow!("Missing schedule_id parameter"))?;
        let field_label = get_string_option(options, "field")
            .ok_or_else(|| anyhow::anyhow!("Missing field parameter"))?;
        let new_value = get_string_option(options, "new_value").unwrap_or_default();

        let Some(field) = editable_field(&field_label) else {
            return followup_text(
                serenity_ctx,
                command,
                format!("❌ `{field_label}` は編集できない項目です。"),
                true,
            )
            .await;
        };

        match ctx.backend.edit_value(schedule_id, field, &new_value).await {
            Ok(()) => {
                info!("[{request_id}] Schedule {schedule_id} {field_label} updated");
                followup_text(
                    serenity_ctx,
                    command,
                    edit_success_message(schedule_id, field, &new_value),
                    false,
                )
                .await
            }
            Err(e) => {
                warn!("[{request_id}] edit_value failed for {schedule_id}: {e}");
                followup_text(
                    serenity_ctx,
                    command,
                    error_message("編集に失敗しました。", &e),
                    true,
                )
                .await
            }
        }
    }

    /// Handle /scsitu - offer a status select menu for one schedule
    async fn handle_status(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        defer(serenity_ctx, command, true).await?;

        let schedule_id = get_integer_option(&command.data.options, "schedule_id")
            .ok_or_else(|| anyhow::anyhow!("Missing schedule_id parameter"))?;

        let record = match find_schedule(ctx.backend.as_ref(), schedule_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("[{request_id}] Schedule {schedule_id} not found");
                return followup_text(serenity_ctx, command, not_found_message(schedule_id), true)
                    .await;
            }
            Err(e) => {
                warn!("[{request_id}] list failed: {e}");
                return followup_text(
                    serenity_ctx,
                    command,
                    error_message("予定情報の取得に失敗しました。", &e),
                    true,
                )
                .await;
            }
        };

        let menu = MessageComponentHandler::create_status_select_menu(
            record.id,
            record.status.as_deref(),
        );
        followup_embed(
            serenity_ctx,
            command,
            status_prompt_embed(&record),
            Some(menu),
            true,
        )
        .await
    }
}

const EMPTY_LIST_MESSAGE: &str =
    "📝 現在、登録されている予定はありません。`/scadd`で追加してください。";

/// The record with `schedule_id`, if the backend lists one
pub(crate) async fn find_schedule(
    backend: &dyn ScheduleBackend,
    schedule_id: i64,
) -> Result<Option<ScheduleRecord>, ActionError> {
    let records = backend.list_schedules().await?;
    Ok(records.into_iter().find(|r| r.id == schedule_id))
}

/// Field for a `/scedit` choice; the status column goes through `/scsitu`
fn editable_field(label: &str) -> Option<ScheduleField> {
    ScheduleField::from_sheet_label(label).filter(|f| ScheduleField::EDITABLE.contains(f))
}

fn not_found_message(schedule_id: i64) -> String {
    format!("❌ ID `{schedule_id}` の予定が見つかりませんでした。")
}

fn edit_success_message(schedule_id: i64, field: ScheduleField, value: &str) -> String {
    format!(
        "✅ 編集に成功しました。\nID `{schedule_id}` の **{}** を **{value}** に更新しました。",
        field.sheet_label()
    )
}

fn added_schedule_embed(added: &AddedSchedule, schedule: &NewSchedule) -> CreateEmbed {
    let title = added.title.as_deref().unwrap_or(&schedule.title);
    let mut embed = CreateEmbed::default();
    embed
        .title("✅ 予定の追加に成功しました")
        .description(format!("予定 **{title}** を登録しました。"))
        .color(COLOR_SUCCESS)
        .field("割り当てID", format!("`{}`", added.id), true)
        .field("撮影日", &schedule.shoot_date, true)
        .field(
            "提出状況 (初期値)",
            SubmissionStatus::NotStarted.label(),
            false,
        );
    embed
}

fn status_prompt_embed(record: &ScheduleRecord) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed
        .title(format!("📝 提出状況の変更 (ID: {})", record.id))
        .description(truncate_for_embed(&format!(
            "**予定名:** `{}`\n**現在の状況:** `{}`\n\nプルダウンから新しい提出状況を選択してください。",
            record.title_or_default(),
            status_or_blank(record)
        )))
        .color(COLOR_WARNING);
    embed
}
