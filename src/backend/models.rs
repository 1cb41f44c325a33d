//! Schedule records and settings as exchanged with the backend
//!
//! The backend is a spreadsheet web app, so every cell can come back as a
//! string, a number or null. Deserialisation here is deliberately lenient and
//! normalises all of that into `Option<String>`.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Accept RFC 3339 timestamps and slash-separated dates as due dates
//! - 1.0.0: Initial schedule record and notification settings types

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Submission progress of a schedule, stored in the sheet as a Japanese label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionStatus {
    NotStarted,
    VideoUploaded,
    NotesWritten,
    Submitted,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::NotStarted,
        SubmissionStatus::VideoUploaded,
        SubmissionStatus::NotesWritten,
        SubmissionStatus::Submitted,
    ];

    /// Label used by the sheet (and shown to users)
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::NotStarted => "未着手",
            SubmissionStatus::VideoUploaded => "動画UP済み",
            SubmissionStatus::NotesWritten => "メモ記入済み",
            SubmissionStatus::Submitted => "提出済み",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SubmissionStatus::NotStarted => "⚪",
            SubmissionStatus::VideoUploaded => "🎬",
            SubmissionStatus::NotesWritten => "📝",
            SubmissionStatus::Submitted => "✅",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Emoji for an optional raw status label; unknown or unset renders as ❓
pub fn status_emoji(status: Option<&str>) -> &'static str {
    status
        .and_then(SubmissionStatus::from_label)
        .map(|s| s.emoji())
        .unwrap_or("❓")
}

/// Editable sheet columns, addressed by their header label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleField {
    Title,
    ShootDate,
    DueDate,
    FileUrl,
    YtUrl,
    Status,
}

impl ScheduleField {
    /// Fields that `/scedit` may change; status goes through the select menu
    pub const EDITABLE: [ScheduleField; 5] = [
        ScheduleField::Title,
        ScheduleField::ShootDate,
        ScheduleField::DueDate,
        ScheduleField::FileUrl,
        ScheduleField::YtUrl,
    ];

    pub fn sheet_label(&self) -> &'static str {
        match self {
            ScheduleField::Title => "予定名",
            ScheduleField::ShootDate => "撮影日",
            ScheduleField::DueDate => "提出日",
            ScheduleField::FileUrl => "ファイルURL",
            ScheduleField::YtUrl => "YTURL",
            ScheduleField::Status => "提出状況",
        }
    }

    pub fn from_sheet_label(label: &str) -> Option<Self> {
        [
            ScheduleField::Title,
            ScheduleField::ShootDate,
            ScheduleField::DueDate,
            ScheduleField::FileUrl,
            ScheduleField::YtUrl,
            ScheduleField::Status,
        ]
        .into_iter()
        .find(|f| f.sheet_label() == label)
    }
}

/// One row of the schedule sheet
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub shoot_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub yt_url: Option<String>,
}

impl ScheduleRecord {
    pub fn submission_status(&self) -> Option<SubmissionStatus> {
        self.status.as_deref().and_then(SubmissionStatus::from_label)
    }

    pub fn is_submitted(&self) -> bool {
        self.submission_status() == Some(SubmissionStatus::Submitted)
    }

    /// Due date as a calendar date; `None` when unset or unparseable
    pub fn parsed_due_date(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_sheet_date)
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("(無題)")
    }
}

/// Fields for `add`; the backend assigns the id and the initial status
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewSchedule {
    pub title: String,
    pub shoot_date: String,
    pub due_date: String,
    pub file_url: String,
    pub yt_url: String,
}

/// What the backend echoes back after `add`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddedSchedule {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: Option<String>,
}

/// Reminder configuration: threshold in days and the destination channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationSettings {
    #[serde(rename = "NotificationDays")]
    pub notification_days: u32,
    #[serde(rename = "ChannelID")]
    pub channel_id: String,
}

impl NotificationSettings {
    /// Build settings, rejecting a zero threshold or a blank channel
    pub fn new(notification_days: u32, channel_id: impl Into<String>) -> Option<Self> {
        let channel_id = channel_id.into();
        if notification_days == 0 || channel_id.trim().is_empty() {
            return None;
        }
        Some(Self {
            notification_days,
            channel_id,
        })
    }

    /// Parse the `settings` object returned by `settings_load`.
    ///
    /// `NotificationDays` is stored as text in the sheet, so both `"3"` and `3`
    /// are accepted. Anything incomplete yields `None` (unconfigured).
    pub fn from_wire(value: &Value) -> Option<Self> {
        let days = match value.get("NotificationDays")? {
            Value::Number(n) => n.as_u64()?,
            Value::String(s) => s.trim().parse::<u64>().ok()?,
            _ => return None,
        };
        let channel_id = value_as_text(value.get("ChannelID")?)?;
        Self::new(u32::try_from(days).ok()?, channel_id)
    }

    pub fn channel_id_u64(&self) -> Option<u64> {
        self.channel_id.trim().parse().ok()
    }
}

/// Parse a date cell. Unrecognised input is `None`, never an error.
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "None" {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    // Date cells serialised by the web app arrive as UTC timestamps
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

fn value_as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() || text == "None" {
        None
    } else {
        Some(text)
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_text(&value))
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| serde::de::Error::custom(format!("invalid schedule id: {value}")))
}
