//! # Backend
//!
//! Client for the spreadsheet web app that stores schedules and the
//! reminder settings.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod client;
pub mod models;

pub use client::{ActionClient, ActionError, ScheduleBackend};
pub use models::{
    parse_sheet_date, status_emoji, AddedSchedule, NewSchedule, NotificationSettings,
    ScheduleField, ScheduleRecord, SubmissionStatus,
};
