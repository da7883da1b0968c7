pub mod entry;
pub mod history;

pub use entry::{RosterSnapshot, ScannedEntry};
pub use history::{DayCount, HistoryPage, RecordedStudent};
