//! Message component interactions
//!
//! The status select menu offered by `/scsitu` and its callback.
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Status select menu replaces button handlers
//! - 1.0.0: Initial implementation

use anyhow::Result;
use log::{info, warn};
use serenity::builder::CreateComponents;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::ReactionType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::backend::{status_emoji, SubmissionStatus};
use crate::core::embeds::error_message;
use crate::core::truncate_for_message;
use crate::features::status::{parse_status_select_id, status_select_id, StatusAction};

/// Handler for all message component interactions
pub struct MessageComponentHandler {
    status_action: Arc<dyn StatusAction>,
}

impl MessageComponentHandler {
    pub fn new(status_action: Arc<dyn StatusAction>) -> Self {
        Self { status_action }
    }

    /// Handle all types of component interactions
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        let user_id = interaction.user.id.to_string();

        info!("Processing component interaction: {custom_id} from user: {user_id}");

        if parse_status_select_id(custom_id).is_none() {
            interaction
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message
                                .content("Unknown component interaction.")
                                .ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        }

        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                    .interaction_response_data(|data| data.ephemeral(true))
            })
            .await?;

        let reply = self
            .apply_selection(custom_id, &interaction.data.values)
            .await;

        interaction
            .create_followup_message(&ctx.http, |message| {
                message.content(truncate_for_message(&reply)).ephemeral(true)
            })
            .await?;
        Ok(())
    }

    /// Run the status change for a select menu choice and return the reply text
    pub async fn apply_selection(&self, custom_id: &str, values: &[String]) -> String {
        let Some(schedule_id) = parse_status_select_id(custom_id) else {
            return "❌ 不明な操作です。".to_string();
        };
        let Some(status) = values.first().and_then(|v| SubmissionStatus::from_label(v)) else {
            warn!("Unknown status selection for schedule {schedule_id}: {values:?}");
            return "❌ 不明な提出状況が選択されました。".to_string();
        };

        match self.status_action.apply(schedule_id, status).await {
            Ok(()) => status_changed_message(schedule_id, status),
            Err(e) => {
                warn!("Status change failed for schedule {schedule_id}: {e}");
                error_message("状況の変更に失敗しました。", &e)
            }
        }
    }

    /// Select menu listing every status, with the current one preselected
    pub fn create_status_select_menu(schedule_id: i64, current: Option<&str>) -> CreateComponents {
        let placeholder = format!("現在の状況: {}", current.unwrap_or("未記入"));
        let mut components = CreateComponents::default();
        components.create_action_row(|row| {
            row.create_select_menu(|menu| {
                menu.custom_id(status_select_id(schedule_id))
                    .placeholder(placeholder)
                    .min_values(1)
                    .max_values(1)
                    .options(|options| {
                        for status in SubmissionStatus::ALL {
                            options.create_option(|option| {
                                option
                                    .label(status.label())
                                    .value(status.label())
                                    .emoji(ReactionType::Unicode(status.emoji().to_string()))
                                    .default_selection(current == Some(status.label()))
                            });
                        }
                        options
                    })
            })
        });
        components
    }
}

fn status_changed_message(schedule_id: i64, status: SubmissionStatus) -> String {
    format!(
        "{} ID `{schedule_id}` の提出状況を **{}** に変更しました。",
        status_emoji(Some(status.label())),
        status.label()
    )
}
