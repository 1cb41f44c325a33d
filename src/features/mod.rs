//! # Features
//!
//! - **reminders**: daily due-date reminders posted to a configured channel
//! - **status**: submission status changes from the select menu

pub mod reminders;
pub mod status;

pub use reminders::{
    ConfigureError, DiscordReminderSink, FiringOutcome, ReminderDigest, ReminderScheduler,
    ReminderSink, SettingsCache,
};
pub use status::{EditStatusAction, StatusAction};
