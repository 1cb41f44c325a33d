//! Notification settings cache
//!
//! Holds the reminder configuration for the lifetime of the process. The
//! backend is the durable copy; this cache is what the scheduler reads on
//! every firing. Updates are whole-value swaps behind a lock, never
//! field-by-field.

use log::{info, warn};
use tokio::sync::RwLock;

use crate::backend::{ActionError, NotificationSettings, ScheduleBackend};

#[derive(Default)]
pub struct SettingsCache {
    current: RwLock<Option<NotificationSettings>>,
}

impl SettingsCache {
    /// Empty (unconfigured) cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated cache
    pub fn with_settings(settings: NotificationSettings) -> Self {
        Self {
            current: RwLock::new(Some(settings)),
        }
    }

    /// Load settings from the backend (`settings_load`).
    ///
    /// A successful response replaces the cache wholesale, including with
    /// "nothing stored". A failed call leaves the cache as it was. Neither
    /// case is fatal; an empty cache just keeps the scheduler idle.
    pub async fn load(&self, backend: &dyn ScheduleBackend) -> Option<NotificationSettings> {
        match backend.load_settings().await {
            Ok(Some(settings)) => {
                info!(
                    "Loaded reminder settings: {} day(s) before, channel {}",
                    settings.notification_days, settings.channel_id
                );
                *self.current.write().await = Some(settings.clone());
                Some(settings)
            }
            Ok(None) => {
                info!("No reminder settings stored in backend; reminders stay idle");
                *self.current.write().await = None;
                None
            }
            Err(e) => {
                warn!("Failed to load reminder settings: {e}");
                None
            }
        }
    }

    /// Current settings, `None` when unconfigured
    pub async fn get(&self) -> Option<NotificationSettings> {
        self.current.read().await.clone()
    }

    pub async fn is_configured(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Persist through `settings_save`, then swap the cached value.
    ///
    /// The cache is only touched after the backend confirms the write.
    pub async fn set(
        &self,
        backend: &dyn ScheduleBackend,
        settings: NotificationSettings,
    ) -> Result<(), ActionError> {
        backend.save_settings(&settings).await?;
        info!(
            "Saved reminder settings: {} day(s) before, channel {}",
            settings.notification_days, settings.channel_id
        );
        *self.current.write().await = Some(settings);
        Ok(())
    }
}
