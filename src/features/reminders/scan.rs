//! Due-date scan
//!
//! Selects unsubmitted schedules whose due date falls within the reminder
//! window `[today, today + threshold]`, inclusive on both ends.

use chrono::NaiveDate;

use crate::backend::ScheduleRecord;

/// A schedule selected for reminding, with whole days remaining until due
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderItem {
    pub record: ScheduleRecord,
    pub days_left: i64,
}

/// Run the reminder scan over a snapshot of records.
///
/// Records that are submitted, have no due date, or whose due date does not
/// parse are skipped. Overdue records (`days_left < 0`) are skipped too.
/// Input order is preserved.
pub fn scan(records: &[ScheduleRecord], today: NaiveDate, threshold_days: u32) -> Vec<ReminderItem> {
    let threshold = i64::from(threshold_days);

    records
        .iter()
        .filter(|record| !record.is_submitted())
        .filter_map(|record| {
            let due = record.parsed_due_date()?;
            let days_left = (due - today).num_days();
            (0..=threshold).contains(&days_left).then(|| ReminderItem {
                record: record.clone(),
                days_left,
            })
        })
        .collect()
}
