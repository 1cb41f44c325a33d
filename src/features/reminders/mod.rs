//! # Reminders Feature
//!
//! Daily due-date reminders posted to a configured channel. Settings are
//! cached in memory and mirrored in the backend.
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 2.0.0: Settings cache with write-through configure, re-armable timer
//! - 1.0.0: Initial daily due-date scan

pub mod delivery;
pub mod digest;
pub mod scan;
pub mod scheduler;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use delivery::{DiscordReminderSink, ReminderSink};
pub use digest::{DigestField, ReminderDigest};
pub use scan::{scan, ReminderItem};
pub use scheduler::{
    ConfigureError, FiringOutcome, ReminderJob, ReminderScheduler, DEFAULT_REMINDER_INTERVAL,
};
pub use settings::SettingsCache;
