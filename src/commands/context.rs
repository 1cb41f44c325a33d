//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Hold the schedule backend, reminder scheduler and status action
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;

use crate::backend::ScheduleBackend;
use crate::features::reminders::ReminderScheduler;
use crate::features::status::{EditStatusAction, StatusAction};

/// Shared context for all command handlers
///
/// Contains the services command handlers need:
/// - the schedule backend for list/add/edit
/// - the reminder scheduler, which owns the settings cache and timer
/// - the action run when a status is picked from the select menu
#[derive(Clone)]
pub struct CommandContext {
    pub backend: Arc<dyn ScheduleBackend>,
    pub scheduler: Arc<ReminderScheduler>,
    pub status_action: Arc<dyn StatusAction>,
}

impl CommandContext {
    /// Context whose status action writes through the same backend
    pub fn new(backend: Arc<dyn ScheduleBackend>, scheduler: Arc<ReminderScheduler>) -> Self {
        let status_action: Arc<dyn StatusAction> =
            Arc::new(EditStatusAction::new(Arc::clone(&backend)));
        Self {
            backend,
            scheduler,
            status_action,
        }
    }
}
