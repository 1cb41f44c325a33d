//! # Status Feature
//!
//! Changing a schedule's submission status from the select menu.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0
//! - **Toggleable**: false

use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::backend::{ActionError, ScheduleBackend, ScheduleField, SubmissionStatus};

/// Custom id prefix for the status select menu
pub const STATUS_SELECT_PREFIX: &str = "status_select_";

/// Custom id for the select menu of one schedule
pub fn status_select_id(schedule_id: i64) -> String {
    format!("{STATUS_SELECT_PREFIX}{schedule_id}")
}

/// Schedule id encoded in a status select custom id
pub fn parse_status_select_id(custom_id: &str) -> Option<i64> {
    custom_id
        .strip_prefix(STATUS_SELECT_PREFIX)
        .and_then(|id| id.parse().ok())
}

/// Callback invoked when a user picks a new status
#[async_trait]
pub trait StatusAction: Send + Sync {
    async fn apply(&self, schedule_id: i64, status: SubmissionStatus) -> Result<(), ActionError>;
}

/// Writes the status through `edit_value`
pub struct EditStatusAction {
    backend: Arc<dyn ScheduleBackend>,
}

impl EditStatusAction {
    pub fn new(backend: Arc<dyn ScheduleBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl StatusAction for EditStatusAction {
    async fn apply(&self, schedule_id: i64, status: SubmissionStatus) -> Result<(), ActionError> {
        self.backend
            .edit_value(schedule_id, ScheduleField::Status, status.label())
            .await?;
        info!("Schedule {schedule_id} status changed to {status}");
        Ok(())
    }
}
