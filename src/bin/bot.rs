use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use schedule_bot::backend::{ActionClient, ScheduleBackend};
use schedule_bot::commands::{
    register_global_commands, register_guild_commands, CommandContext, CommandHandler,
};
use schedule_bot::core::Config;
use schedule_bot::features::reminders::{DiscordReminderSink, ReminderScheduler, SettingsCache};
use schedule_bot::message_components::MessageComponentHandler;

struct Handler {
    command_handler: Arc<CommandHandler>,
    component_handler: Arc<MessageComponentHandler>,
    scheduler: Arc<ReminderScheduler>,
    backend: Arc<dyn ScheduleBackend>,
    guild_id: Option<GuildId>,
    started: AtomicBool,
}

impl Handler {
    /// Command registration, settings load and first arm happen once per
    /// process; gateway reconnects deliver `ready` again and must not repeat them.
    async fn on_first_ready(&self, ctx: &Context) {
        let registration = match self.guild_id {
            Some(guild_id) => {
                info!("Development mode: registering commands for guild {guild_id}");
                register_guild_commands(ctx, guild_id).await
            }
            None => register_global_commands(ctx).await,
        };
        if let Err(e) = registration {
            error!("Failed to register slash commands: {e}");
        }

        match self
            .scheduler
            .settings()
            .load(self.backend.as_ref())
            .await
        {
            Some(settings) => info!(
                "🔔 Reminders: {} day(s) before, channel {}",
                settings.notification_days, settings.channel_id
            ),
            None => info!("🔔 Reminders not configured yet; use /screm"),
        }

        self.scheduler.arm_if_idle().await;
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if self.started.swap(true, Ordering::SeqCst) {
            info!("Gateway reconnected; keeping existing reminder timer");
            return;
        }

        self.on_first_ready(&ctx).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .command_handler
                    .handle_slash_command(&ctx, &command)
                    .await
                {
                    error!(
                        "Error handling slash command '{}': {}",
                        command.data.name, e
                    );

                    let error_message =
                        "❌ コマンドの処理中にエラーが発生しました。もう一度お試しください。";

                    // Edit the deferred response, or answer fresh if nothing was deferred
                    if command
                        .edit_original_interaction_response(&ctx.http, |response| {
                            response.content(error_message)
                        })
                        .await
                        .is_err()
                    {
                        let _ = command
                            .create_interaction_response(&ctx.http, |response| {
                                response
                                    .kind(InteractionResponseType::ChannelMessageWithSource)
                                    .interaction_response_data(|message| {
                                        message.content(error_message).ephemeral(true)
                                    })
                            })
                            .await;
                    }
                }
            }
            Interaction::MessageComponent(component) => {
                if let Err(e) = self
                    .component_handler
                    .handle_component_interaction(&ctx, &component)
                    .await
                {
                    error!(
                        "Error handling component interaction '{}': {}",
                        component.data.custom_id, e
                    );

                    let error_message = "❌ 操作の処理中にエラーが発生しました。もう一度お試しください。";

                    if component
                        .create_followup_message(&ctx.http, |message| {
                            message.content(error_message).ephemeral(true)
                        })
                        .await
                        .is_err()
                    {
                        let _ = component
                            .create_interaction_response(&ctx.http, |response| {
                                response
                                    .kind(InteractionResponseType::ChannelMessageWithSource)
                                    .interaction_response_data(|message| {
                                        message.content(error_message).ephemeral(true)
                                    })
                            })
                            .await;
                    }
                }
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting schedule bot...");
    info!(
        "Backend: {} (timeout {}s)",
        config.backend_url, config.backend_timeout_secs
    );

    let backend: Arc<dyn ScheduleBackend> = Arc::new(ActionClient::new(
        config.backend_url.clone(),
        config.backend_secret.clone(),
        config.backend_timeout(),
    ));

    let http = Arc::new(Http::new(&config.discord_token));
    let scheduler = Arc::new(ReminderScheduler::new(
        Arc::clone(&backend),
        Arc::new(SettingsCache::new()),
        Arc::new(DiscordReminderSink::new(http)),
        config.reminder_interval(),
    ));

    let context = CommandContext::new(Arc::clone(&backend), Arc::clone(&scheduler));
    let component_handler = MessageComponentHandler::new(Arc::clone(&context.status_action));
    let command_handler = CommandHandler::new(context);

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);
    if config.discord_guild_id.is_some() && guild_id.is_none() {
        warn!("DISCORD_GUILD_ID is not a valid id; registering commands globally");
    }

    let handler = Handler {
        command_handler: Arc::new(command_handler),
        component_handler: Arc::new(component_handler),
        scheduler,
        backend,
        guild_id,
        started: AtomicBool::new(false),
    };

    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            e
        })?;

    info!("🚀 Connecting to Discord gateway...");
    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(why.into());
    }

    Ok(())
}
