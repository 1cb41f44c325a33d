//! Slash command dispatch
//!
//! Routes each application command to its registered handler and tags the
//! whole exchange with a request id.

use anyhow::{anyhow, Result};
use log::{debug, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::commands::handlers::create_all_handlers;
use crate::commands::{CommandContext, CommandRegistry};

#[derive(Clone)]
pub struct CommandHandler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl CommandHandler {
    pub fn new(context: CommandContext) -> Self {
        Self::with_registry(context, CommandRegistry::with_handlers(create_all_handlers()))
    }

    pub fn with_registry(context: CommandContext, registry: CommandRegistry) -> Self {
        Self {
            context: Arc::new(context),
            registry,
        }
    }

    pub fn context(&self) -> &Arc<CommandContext> {
        &self.context
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let user_id = command.user.id.to_string();
        let channel_id = command.channel_id.to_string();
        let guild_id = command
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "DM".to_string());

        info!(
            "[{request_id}] 📥 Slash command received | Command: {} | User: {user_id} | Channel: {channel_id} | Guild: {guild_id}",
            command.data.name
        );

        let handler = self
            .registry
            .get(&command.data.name)
            .ok_or_else(|| anyhow!("No handler registered for /{}", command.data.name))?;

        let started = Instant::now();
        handler
            .handle(Arc::clone(&self.context), ctx, command, request_id)
            .await?;

        debug!(
            "[{request_id}] ✅ /{} completed in {:?}",
            command.data.name,
            started.elapsed()
        );
        Ok(())
    }
}
