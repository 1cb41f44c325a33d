//! Reminder scheduler
//!
//! A repeating timer (24h by default) anchored to the moment it was last
//! armed. Each tick spawns one firing as its own task, so a slow backend call
//! never delays the next tick. Re-arming aborts the current timer and starts
//! a fresh one from now.

use chrono::{Local, NaiveDate};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

use super::delivery::ReminderSink;
use super::digest::ReminderDigest;
use super::scan::scan;
use super::settings::SettingsCache;
use crate::backend::{ActionError, NotificationSettings, ScheduleBackend};

pub const DEFAULT_REMINDER_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// What a single firing did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FiringOutcome {
    /// No settings cached; nothing was fetched or sent
    Unconfigured,
    /// `list` failed; nothing was sent
    FetchFailed,
    /// Nothing is due within the window
    NothingDue,
    /// The configured channel id is not a valid channel reference
    InvalidChannel,
    /// The channel could not be resolved or the send failed
    DeliveryFailed,
    /// One message was sent covering this many schedules
    Delivered(usize),
}

/// Why a configure request was rejected
#[derive(Debug, Error)]
pub enum ConfigureError {
    #[error("通知日数は1日以上で指定してください。")]
    InvalidDays,

    #[error("通知先チャンネルが指定されていません。")]
    MissingChannel,

    #[error(transparent)]
    Backend(#[from] ActionError),
}

/// The work done on every tick
pub struct ReminderJob {
    backend: Arc<dyn ScheduleBackend>,
    settings: Arc<SettingsCache>,
    sink: Arc<dyn ReminderSink>,
}

impl ReminderJob {
    pub fn new(
        backend: Arc<dyn ScheduleBackend>,
        settings: Arc<SettingsCache>,
        sink: Arc<dyn ReminderSink>,
    ) -> Self {
        Self {
            backend,
            settings,
            sink,
        }
    }

    /// Run one firing against the local calendar date
    pub async fn fire(&self) -> FiringOutcome {
        self.fire_on(Local::now().date_naive()).await
    }

    /// Run one firing as if today were `today`
    pub async fn fire_on(&self, today: NaiveDate) -> FiringOutcome {
        let run_id = Uuid::new_v4();

        let Some(settings) = self.settings.get().await else {
            debug!("[{run_id}] Reminder check skipped: no settings configured");
            return FiringOutcome::Unconfigured;
        };

        debug!(
            "[{run_id}] Reminder check for {today} ({} day window, channel {})",
            settings.notification_days, settings.channel_id
        );

        let records = match self.backend.list_schedules().await {
            Ok(records) => records,
            Err(e) => {
                error!("[{run_id}] Error fetching schedules for reminder check: {e}");
                return FiringOutcome::FetchFailed;
            }
        };

        let items = scan(&records, today, settings.notification_days);
        if items.is_empty() {
            debug!(
                "[{run_id}] No unsubmitted schedules due within {} day(s) ({} checked)",
                settings.notification_days,
                records.len()
            );
            return FiringOutcome::NothingDue;
        }

        let Some(channel_id) = settings.channel_id_u64() else {
            error!(
                "[{run_id}] Reminder channel id '{}' is not a valid channel",
                settings.channel_id
            );
            return FiringOutcome::InvalidChannel;
        };

        let count = items.len();
        let digest = ReminderDigest::new(settings.notification_days, items);
        match self.sink.deliver(channel_id, &digest).await {
            Ok(()) => {
                info!("[{run_id}] Reminder sent for {count} schedule(s)");
                FiringOutcome::Delivered(count)
            }
            Err(e) => {
                error!("[{run_id}] Reminder delivery failed: {e}");
                FiringOutcome::DeliveryFailed
            }
        }
    }
}

struct ArmedTimer {
    handle: JoinHandle<()>,
    armed_at: Instant,
}

/// Owns the reminder timer and the configure sequence
pub struct ReminderScheduler {
    job: Arc<ReminderJob>,
    backend: Arc<dyn ScheduleBackend>,
    settings: Arc<SettingsCache>,
    period: Duration,
    timer: Mutex<Option<ArmedTimer>>,
    // Serialises configure so the cache always matches the last saved value
    configure_lock: Mutex<()>,
}

impl ReminderScheduler {
    pub fn new(
        backend: Arc<dyn ScheduleBackend>,
        settings: Arc<SettingsCache>,
        sink: Arc<dyn ReminderSink>,
        period: Duration,
    ) -> Self {
        let job = Arc::new(ReminderJob::new(
            Arc::clone(&backend),
            Arc::clone(&settings),
            sink,
        ));
        Self {
            job,
            backend,
            settings,
            period,
            timer: Mutex::new(None),
            configure_lock: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &Arc<SettingsCache> {
        &self.settings
    }

    /// Arm the timer, or tear it down and re-arm from now if already running.
    ///
    /// The first firing happens immediately, then once per period.
    pub async fn arm(&self) {
        let mut timer = self.timer.lock().await;
        if let Some(previous) = timer.take() {
            previous.handle.abort();
            info!("Reminder timer re-armed; previous schedule cancelled");
        } else {
            info!(
                "Reminder timer armed (every {} hour(s))",
                self.period.as_secs() / 3600
            );
        }
        *timer = Some(self.spawn_timer());
    }

    /// Arm only when no timer is running. Returns whether a timer was started.
    pub async fn arm_if_idle(&self) -> bool {
        let mut timer = self.timer.lock().await;
        if timer.is_some() {
            return false;
        }
        *timer = Some(self.spawn_timer());
        info!(
            "Reminder timer armed (every {} hour(s))",
            self.period.as_secs() / 3600
        );
        true
    }

    pub async fn is_armed(&self) -> bool {
        self.timer.lock().await.is_some()
    }

    /// When the current timer was armed; its firings are phase-anchored here
    pub async fn armed_at(&self) -> Option<Instant> {
        self.timer.lock().await.as_ref().map(|t| t.armed_at)
    }

    /// Persist new settings, update the cache, then (re)arm the timer.
    ///
    /// Validation happens before anything is written. If the backend rejects
    /// the save, neither the cache nor the timer is touched. Concurrent calls
    /// run one at a time.
    pub async fn configure(
        &self,
        days: i64,
        channel_id: &str,
    ) -> Result<NotificationSettings, ConfigureError> {
        let _guard = self.configure_lock.lock().await;

        let days = u32::try_from(days)
            .ok()
            .filter(|d| *d > 0)
            .ok_or(ConfigureError::InvalidDays)?;
        let settings =
            NotificationSettings::new(days, channel_id).ok_or(ConfigureError::MissingChannel)?;

        if let Err(e) = self
            .settings
            .set(&*self.backend, settings.clone())
            .await
        {
            warn!("Reminder settings not saved: {e}");
            return Err(e.into());
        }

        self.arm().await;
        Ok(settings)
    }

    fn spawn_timer(&self) -> ArmedTimer {
        let job = Arc::clone(&self.job);
        let period = self.period;
        let armed_at = Instant::now();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(armed_at, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let job = Arc::clone(&job);
                tokio::spawn(async move {
                    job.fire().await;
                });
            }
        });

        ArmedTimer { handle, armed_at }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.get_mut().take() {
            timer.handle.abort();
        }
    }
}
