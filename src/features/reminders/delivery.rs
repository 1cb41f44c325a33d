//! Reminder delivery to a Discord channel

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;

use super::digest::ReminderDigest;

/// Where reminder digests go
#[async_trait]
pub trait ReminderSink: Send + Sync {
    /// Resolve `channel_id` and send the digest there once.
    ///
    /// Fails if the channel cannot be resolved or the send is rejected.
    async fn deliver(&self, channel_id: u64, digest: &ReminderDigest) -> Result<()>;
}

/// Sends digests as a single embed message via the Discord HTTP API
pub struct DiscordReminderSink {
    http: Arc<Http>,
}

impl DiscordReminderSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ReminderSink for DiscordReminderSink {
    async fn deliver(&self, channel_id: u64, digest: &ReminderDigest) -> Result<()> {
        let channel = self
            .http
            .get_channel(channel_id)
            .await
            .map_err(|e| anyhow!("target channel {channel_id} not found: {e}"))?;

        debug!(
            "Reminder embed for channel {channel_id}: {} field(s), {} chars",
            digest.fields().len(),
            digest.embed_chars()
        );
        let embed = digest.to_embed();
        channel
            .id()
            .send_message(&self.http, |m| m.set_embed(embed))
            .await
            .map_err(|e| anyhow!("failed to send reminder to channel {channel_id}: {e}"))?;

        info!(
            "Sent reminder for {} schedule(s) to channel {}",
            digest.items.len(),
            ChannelId(channel_id)
        );
        Ok(())
    }
}
