//! Environment-driven bot configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add backend timeout and reminder interval overrides
//! - 1.0.0: Initial Discord and backend settings

use anyhow::{anyhow, Context, Result};
use std::time::Duration;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REMINDER_INTERVAL_HOURS: u64 = 24;
/// One year
const MAX_REMINDER_INTERVAL_HOURS: u64 = 24 * 366;
const SECS_PER_HOUR: u64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub discord_guild_id: Option<String>,
    pub backend_url: String,
    pub backend_secret: String,
    pub backend_timeout_secs: u64,
    pub reminder_interval_hours: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` uses the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("{key} must be set"))
        };
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend_timeout_secs = match optional("BACKEND_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("BACKEND_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_BACKEND_TIMEOUT_SECS,
        };
        if backend_timeout_secs == 0 {
            return Err(anyhow!("BACKEND_TIMEOUT_SECS must be greater than zero"));
        }

        let reminder_interval_hours = match optional("REMINDER_INTERVAL_HOURS") {
            Some(v) => v
                .parse::<u64>()
                .context("REMINDER_INTERVAL_HOURS must be a whole number of hours")?,
            None => DEFAULT_REMINDER_INTERVAL_HOURS,
        };
        if reminder_interval_hours == 0 {
            return Err(anyhow!("REMINDER_INTERVAL_HOURS must be greater than zero"));
        }
        if reminder_interval_hours > MAX_REMINDER_INTERVAL_HOURS
            || reminder_interval_hours.checked_mul(SECS_PER_HOUR).is_none()
        {
            return Err(anyhow!(
                "REMINDER_INTERVAL_HOURS must be at most {MAX_REMINDER_INTERVAL_HOURS}"
            ));
        }

        Ok(Config {
            discord_token: required("DISCORD_TOKEN")?,
            discord_guild_id: optional("DISCORD_GUILD_ID"),
            backend_url: required("BACKEND_URL")?,
            backend_secret: required("BACKEND_SECRET")?,
            backend_timeout_secs,
            reminder_interval_hours,
            log_level: optional("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_hours.saturating_mul(SECS_PER_HOUR))
    }
}
