//! Schedule embed builders for Discord responses
//!
//! Shared formatting for schedule records, used by the list command and the
//! reminder digest.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::backend::{status_emoji, ScheduleRecord};
use crate::core::{truncate_field_name, truncate_for_field, MAX_EMBED_FIELDS};
use serenity::builder::CreateEmbed;
use serenity::utils::Color;

pub const COLOR_SUCCESS: Color = Color::from_rgb(46, 204, 113);
pub const COLOR_INFO: Color = Color::from_rgb(52, 152, 219);
pub const COLOR_WARNING: Color = Color::from_rgb(230, 126, 34);
pub const COLOR_ALERT: Color = Color::from_rgb(231, 76, 60);

const NONE_LABEL: &str = "なし";
const UNSET_LABEL: &str = "未設定";
const BLANK_STATUS_LABEL: &str = "未記入";

/// `[Link](url)` or なし
pub fn link_or_none(url: Option<&str>) -> String {
    match url {
        Some(u) => format!("[Link]({u})"),
        None => NONE_LABEL.to_string(),
    }
}

/// Status label, or 未記入 when the cell is empty
pub fn status_or_blank(record: &ScheduleRecord) -> &str {
    record.status.as_deref().unwrap_or(BLANK_STATUS_LABEL)
}

/// `⚪ ID \`3\`: title`
pub fn schedule_heading(record: &ScheduleRecord) -> String {
    truncate_field_name(&format!(
        "{} ID `{}`: {}",
        status_emoji(record.status.as_deref()),
        record.id,
        record.title_or_default()
    ))
}

/// Detail block for one schedule in the list view
pub fn schedule_list_details(record: &ScheduleRecord) -> String {
    truncate_for_field(&format!(
        "**撮影日:** `{}`\n**提出期限:** `{}`\n**提出状況:** `{}`\n**ファイル:** {}\n**YouTube:** {}",
        record.shoot_date.as_deref().unwrap_or(UNSET_LABEL),
        record.due_date.as_deref().unwrap_or(UNSET_LABEL),
        status_or_blank(record),
        link_or_none(record.file_url.as_deref()),
        link_or_none(record.yt_url.as_deref()),
    ))
}

/// Embed listing schedules; Discord allows at most 25 fields
pub fn schedule_list_embed(records: &[ScheduleRecord]) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed
        .title("📅 予定・提出管理リスト")
        .description(format!("現在 **{}** 件の予定が登録されています。", records.len()))
        .color(COLOR_INFO);

    for record in records.iter().take(MAX_EMBED_FIELDS) {
        embed.field(schedule_heading(record), schedule_list_details(record), false);
    }

    if records.len() > MAX_EMBED_FIELDS {
        embed.footer(|f| {
            f.text(format!(
                "先頭 {MAX_EMBED_FIELDS} 件を表示しています（全 {} 件）",
                records.len()
            ))
        });
    }

    embed
}

/// User-facing failure text: `❌ {context}\nエラー: \`{error}\``
pub fn error_message(context: &str, error: &dyn std::fmt::Display) -> String {
    format!("❌ {context}\nエラー: `{error}`")
}
