//! Reviewer-side dashboard overview.
//!
//! Lists every recorded student with their aggregate late-entry count.
//! Sorting is a local concern: switching criteria re-orders the fetched rows
//! without another network call.

use std::sync::Arc;

use crate::backend::AttendanceBackend;
use crate::error::BackendError;
use crate::history::HistoryDrilldown;
use crate::models::RecordedStudent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortCriteria {
    /// Most recently recorded first.
    #[default]
    Recent,
    /// Highest late-entry count first.
    LateEntries,
}

pub struct DashboardOverview {
    backend: Arc<dyn AttendanceBackend>,
    sort: SortCriteria,
    students: Vec<RecordedStudent>,
}

impl DashboardOverview {
    pub fn new(backend: Arc<dyn AttendanceBackend>) -> Self {
        Self {
            backend,
            sort: SortCriteria::default(),
            students: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), BackendError> {
        self.students = self.backend.recorded_students().await?;
        self.apply_sort();
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortCriteria) {
        self.sort = sort;
        self.apply_sort();
    }

    pub fn sort(&self) -> SortCriteria {
        self.sort
    }

    pub fn students(&self) -> &[RecordedStudent] {
        &self.students
    }

    pub fn drilldown(&self, identifier: &str) -> HistoryDrilldown {
        HistoryDrilldown::new(Arc::clone(&self.backend), identifier)
    }

    fn apply_sort(&mut self) {
        match self.sort {
            SortCriteria::Recent => self
                .students
                .sort_by(|a, b| b.last_recorded_at.cmp(&a.last_recorded_at)),
            SortCriteria::LateEntries => {
                self.students.sort_by(|a, b| b.late_entries.cmp(&a.late_entries))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::test_support::FakeBackend;

    fn seeded_backend() -> Arc<FakeBackend> {
        let backend = FakeBackend::with_students(&[]);
        let now = Utc::now();
        *backend.recorded.lock().unwrap() = vec![
            RecordedStudent {
                identifier: "R100".to_owned(),
                display_name: "Alice".to_owned(),
                late_entries: 5,
                last_recorded_at: now - Duration::days(3),
            },
            RecordedStudent {
                identifier: "R200".to_owned(),
                display_name: "Bob".to_owned(),
                late_entries: 1,
                last_recorded_at: now,
            },
        ];
        backend
    }

    #[tokio::test]
    async fn default_sort_is_most_recent_first() {
        let mut overview = DashboardOverview::new(seeded_backend());
        overview.refresh().await.unwrap();

        let order: Vec<&str> = overview
            .students()
            .iter()
            .map(|student| student.identifier.as_str())
            .collect();
        assert_eq!(order, vec!["R200", "R100"]);
    }

    #[tokio::test]
    async fn switching_to_late_entries_resorts_locally() {
        let mut overview = DashboardOverview::new(seeded_backend());
        overview.refresh().await.unwrap();

        overview.set_sort(SortCriteria::LateEntries);

        let order: Vec<&str> = overview
            .students()
            .iter()
            .map(|student| student.identifier.as_str())
            .collect();
        assert_eq!(order, vec!["R100", "R200"]);
    }
}
