//! Reminder digest
//!
//! The single message sent per firing, independent of how it is delivered.

use serenity::builder::CreateEmbed;

use super::scan::ReminderItem;
use crate::core::embeds::{link_or_none, schedule_heading, status_or_blank, COLOR_ALERT};
use crate::core::{truncate_for_field, EMBED_TOTAL_LIMIT, MAX_EMBED_FIELDS};

/// One embed field of the digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestField {
    pub name: String,
    pub value: String,
}

/// Everything a reminder notification says about the selected schedules
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDigest {
    pub threshold_days: u32,
    pub items: Vec<ReminderItem>,
}

impl ReminderDigest {
    pub fn new(threshold_days: u32, items: Vec<ReminderItem>) -> Self {
        Self {
            threshold_days,
            items,
        }
    }

    pub fn title(&self) -> String {
        format!("🚨 提出期限間近のリマインダー ({}日前)", self.threshold_days)
    }

    pub fn description(&self) -> String {
        format!(
            "提出期限が迫っている、未完了の予定が {} 件あります。",
            self.items.len()
        )
    }

    /// One field per item. When the items don't fit in one embed (by field
    /// count or by total size), the last slot becomes a summary of the ids
    /// left out.
    pub fn fields(&self) -> Vec<DigestField> {
        let mut budget = EMBED_TOTAL_LIMIT
            .saturating_sub(self.title().chars().count() + self.description().chars().count());
        let mut fields = Vec::new();

        for (index, item) in self.items.iter().enumerate() {
            let rest = &self.items[index + 1..];
            let field = item_field(item);
            let reserve = if rest.is_empty() {
                0
            } else {
                overflow_field(rest).chars()
            };
            let slots = if rest.is_empty() {
                MAX_EMBED_FIELDS
            } else {
                MAX_EMBED_FIELDS - 1
            };
            if fields.len() >= slots || field.chars() + reserve > budget {
                fields.push(overflow_field(&self.items[index..]));
                return fields;
            }
            budget -= field.chars();
            fields.push(field);
        }
        fields
    }

    /// Characters the embed counts against the total limit
    pub fn embed_chars(&self) -> usize {
        self.title().chars().count()
            + self.description().chars().count()
            + self.fields().iter().map(DigestField::chars).sum::<usize>()
    }

    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::default();
        embed
            .title(self.title())
            .description(self.description())
            .color(COLOR_ALERT);
        for field in self.fields() {
            embed.field(field.name, field.value, false);
        }
        embed
    }
}

impl DigestField {
    fn chars(&self) -> usize {
        self.name.chars().count() + self.value.chars().count()
    }
}

fn overflow_field(items: &[ReminderItem]) -> DigestField {
    let ids: Vec<String> = items
        .iter()
        .map(|item| format!("`{}`", item.record.id))
        .collect();
    DigestField {
        name: format!("…ほか {} 件", ids.len()),
        value: truncate_for_field(&format!("ID: {}", ids.join(", "))),
    }
}

fn item_field(item: &ReminderItem) -> DigestField {
    let record = &item.record;
    let value = format!(
        "**提出日:** `{}` (残り **{}** 日)\n**撮影日:** `{}`\n**提出状況:** `{}`\n**ファイル:** {}\n**YouTube:** {}\n**⚠️ この予定は、まだ提出されていません！**",
        record.due_date.as_deref().unwrap_or_default(),
        item.days_left,
        record.shoot_date.as_deref().unwrap_or("未設定"),
        status_or_blank(record),
        link_or_none(record.file_url.as_deref()),
        link_or_none(record.yt_url.as_deref()),
    );
    DigestField {
        name: schedule_heading(record),
        value: truncate_for_field(&value),
    }
}
