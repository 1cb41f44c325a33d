// Core layer - configuration, limits and shared embeds
pub mod core;

// Backend layer - remote action client and data model
pub mod backend;

// Features layer - reminders and status changes
pub mod features;

// UI components
pub mod message_components;

// Application layer
pub mod command_handler;
pub mod commands;

pub use core::Config;

pub use backend::{ActionClient, ActionError, ScheduleBackend};

pub use features::{
    // Reminders
    DiscordReminderSink, ReminderScheduler, ReminderSink, SettingsCache,
    // Status
    EditStatusAction, StatusAction,
};
