//! In-memory doubles for reminder tests

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use super::delivery::ReminderSink;
use super::digest::ReminderDigest;
use crate::backend::{
    ActionError, AddedSchedule, NewSchedule, NotificationSettings, ScheduleBackend,
    ScheduleField, ScheduleRecord,
};

/// Unsubmitted record due `offset` days after `today`
pub fn record_due_in(id: i64, today: NaiveDate, offset: i64) -> ScheduleRecord {
    ScheduleRecord {
        id,
        title: Some(format!("schedule {id}")),
        shoot_date: Some("2025-09-01".to_string()),
        due_date: Some((today + Duration::days(offset)).format("%Y-%m-%d").to_string()),
        status: Some("未着手".to_string()),
        file_url: None,
        yt_url: None,
    }
}

#[derive(Default)]
pub struct FakeBackend {
    schedules: Vec<ScheduleRecord>,
    stored_settings: Option<NotificationSettings>,
    fail_list: bool,
    fail_settings_load: bool,
    fail_settings_save: bool,
    slow_save: Option<(u32, StdDuration)>,
    list_calls: AtomicUsize,
    saved: Mutex<Vec<NotificationSettings>>,
    edits: Mutex<Vec<(i64, ScheduleField, String)>>,
}

impl FakeBackend {
    pub fn with_schedules(mut self, schedules: Vec<ScheduleRecord>) -> Self {
        self.schedules = schedules;
        self
    }

    pub fn with_stored_settings(mut self, settings: NotificationSettings) -> Self {
        self.stored_settings = Some(settings);
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_settings_load(mut self) -> Self {
        self.fail_settings_load = true;
        self
    }

    pub fn failing_settings_save(mut self) -> Self {
        self.fail_settings_save = true;
        self
    }

    /// Saves of settings with `days` take `delay` before they land
    pub fn with_slow_save(mut self, days: u32, delay: StdDuration) -> Self {
        self.slow_save = Some((days, delay));
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn saved_settings(&self) -> Vec<NotificationSettings> {
        self.saved.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<(i64, ScheduleField, String)> {
        self.edits.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScheduleBackend for FakeBackend {
    async fn load_settings(&self) -> Result<Option<NotificationSettings>, ActionError> {
        if self.fail_settings_load {
            return Err(ActionError::Transport("connection refused".to_string()));
        }
        Ok(self.stored_settings.clone())
    }

    async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), ActionError> {
        if self.fail_settings_save {
            return Err(ActionError::Backend("シートに書き込めませんでした".to_string()));
        }
        if let Some((days, delay)) = self.slow_save {
            if settings.notification_days == days {
                tokio::time::sleep(delay).await;
            }
        }
        self.saved.lock().unwrap().push(settings.clone());
        Ok(())
    }

    async fn list_schedules(&self) -> Result<Vec<ScheduleRecord>, ActionError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(ActionError::Transport("connection reset".to_string()));
        }
        Ok(self.schedules.clone())
    }

    async fn add_schedule(&self, schedule: &NewSchedule) -> Result<AddedSchedule, ActionError> {
        Ok(AddedSchedule {
            id: self.schedules.len() as i64 + 1,
            title: Some(schedule.title.clone()),
        })
    }

    async fn edit_value(
        &self,
        schedule_id: i64,
        field: ScheduleField,
        value: &str,
    ) -> Result<(), ActionError> {
        if !self.schedules.iter().any(|s| s.id == schedule_id) {
            return Err(ActionError::Backend(format!("ID {schedule_id} が見つかりません")));
        }
        self.edits
            .lock()
            .unwrap()
            .push((schedule_id, field, value.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    fail: bool,
    attempts: AtomicUsize,
    deliveries: Mutex<Vec<(u64, ReminderDigest)>>,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn deliveries(&self) -> Vec<(u64, ReminderDigest)> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReminderSink for RecordingSink {
    async fn deliver(&self, channel_id: u64, digest: &ReminderDigest) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("target channel {channel_id} not found"));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((channel_id, digest.clone()));
        Ok(())
    }
}
