//! Per-student weekly history drill-down.
//!
//! One widget per dashboard row. Expanding fetches the current week and
//! every week navigation fetches again; nothing is cached across toggles, so
//! there is no invalidation to get wrong. Collapsing hides the grid without
//! discarding it and resets the week cursor for the next open.

use std::sync::Arc;

use log::warn;

use crate::backend::AttendanceBackend;
use crate::models::HistoryPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    Collapsed,
    Expanded,
}

pub struct HistoryDrilldown {
    backend: Arc<dyn AttendanceBackend>,
    identifier: String,
    disclosure: Disclosure,
    week_offset: u32,
    page: Option<HistoryPage>,
    error: Option<String>,
}

impl HistoryDrilldown {
    pub fn new(backend: Arc<dyn AttendanceBackend>, identifier: impl Into<String>) -> Self {
        Self {
            backend,
            identifier: identifier.into(),
            disclosure: Disclosure::Collapsed,
            week_offset: 0,
            page: None,
            error: None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_expanded(&self) -> bool {
        self.disclosure == Disclosure::Expanded
    }

    pub fn week_offset(&self) -> u32 {
        self.week_offset
    }

    /// Last fetched page; kept (hidden) while collapsed.
    pub fn page(&self) -> Option<&HistoryPage> {
        self.page.as_ref()
    }

    /// Inline placeholder text when the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Expand (fetching the current week) or collapse (hide without
    /// discarding, week cursor back to 0 for the next open).
    pub async fn toggle(&mut self) {
        match self.disclosure {
            Disclosure::Expanded => {
                self.disclosure = Disclosure::Collapsed;
                self.week_offset = 0;
            }
            Disclosure::Collapsed => {
                self.disclosure = Disclosure::Expanded;
                self.fetch().await;
            }
        }
    }

    /// Navigate one week further into the past. No upper bound.
    pub async fn older(&mut self) {
        if self.disclosure != Disclosure::Expanded {
            return;
        }
        self.week_offset += 1;
        self.fetch().await;
    }

    /// Navigate one week toward the present; no-op at the current week, so
    /// no request ever carries a negative offset.
    pub async fn newer(&mut self) {
        if self.disclosure != Disclosure::Expanded || self.week_offset == 0 {
            return;
        }
        self.week_offset -= 1;
        self.fetch().await;
    }

    pub fn week_label(&self) -> String {
        match self.week_offset {
            0 => "This Week".to_owned(),
            1 => "Last Week".to_owned(),
            weeks => format!("{weeks} Weeks Ago"),
        }
    }

    async fn fetch(&mut self) {
        match self
            .backend
            .history_page(&self.identifier, self.week_offset)
            .await
        {
            Ok(page) => {
                self.page = Some(page);
                self.error = None;
            }
            Err(err) => {
                warn!(
                    "history fetch failed for {} week {}: {err}",
                    self.identifier, self.week_offset
                );
                self.page = None;
                self.error = Some("Error loading data".to_owned());
            }
        }
    }
}
