use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day cell in a weekly history grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// A week of per-day late-entry counts for one student.
///
/// `week_offset` 0 is the current week; higher offsets go further into the
/// past. Pages are fetched lazily per `(identifier, week_offset)` pair and
/// never cached across disclosure toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub identifier: String,
    pub week_offset: u32,
    pub entries: Vec<DayCount>,
}

/// Aggregate row in the dashboard overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedStudent {
    pub identifier: String,
    pub display_name: String,
    pub late_entries: u32,
    pub last_recorded_at: DateTime<Utc>,
}
