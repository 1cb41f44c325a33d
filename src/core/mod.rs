//! # Core Module
//!
//! Configuration, Discord size limits and shared embed builders.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add embeds module with schedule formatting shared by commands and reminders
//! - 1.0.0: Initial creation with config and response modules

pub mod config;
pub mod embeds;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use response::{
    truncate_field_name, truncate_for_embed, truncate_for_field, truncate_for_message, truncate_to,
    EMBED_LIMIT, EMBED_TOTAL_LIMIT, FIELD_NAME_LIMIT, FIELD_VALUE_LIMIT, MAX_EMBED_FIELDS, MESSAGE_LIMIT,
};
