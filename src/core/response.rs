//! Discord size limits and truncation helpers
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add embed field and total limits for schedule digests
//! - 1.0.0: Initial message and embed truncation

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord embed field value limit
pub const FIELD_VALUE_LIMIT: usize = 1024;
/// Discord embed field name limit
pub const FIELD_NAME_LIMIT: usize = 256;
/// Maximum number of fields in one embed
pub const MAX_EMBED_FIELDS: usize = 25;
/// Combined characters across title, description and all field names and values
pub const EMBED_TOTAL_LIMIT: usize = 6000;

/// Truncate to at most `limit` bytes on a UTF-8 boundary, adding "..." when cut
pub fn truncate_to(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit.saturating_sub(3); // Room for "..."
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit embed limit, adding ellipsis if needed
pub fn truncate_for_embed(text: &str) -> String {
    truncate_to(text, EMBED_LIMIT)
}

/// Truncate text to fit message limit, adding ellipsis if needed
pub fn truncate_for_message(text: &str) -> String {
    truncate_to(text, MESSAGE_LIMIT)
}

/// Truncate an embed field value
pub fn truncate_for_field(text: &str) -> String {
    truncate_to(text, FIELD_VALUE_LIMIT)
}

/// Truncate an embed field name
pub fn truncate_field_name(text: &str) -> String {
    truncate_to(text, FIELD_NAME_LIMIT)
}
