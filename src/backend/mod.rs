//! Remote collaborators.
//!
//! The core never talks to the network directly; it goes through
//! [`AttendanceBackend`], which the host wires to the real service (see
//! [`http::HttpBackend`]) or a test double. Negative answers ("no such
//! student") are ordinary `Ok(None)` values; [`BackendError`] is reserved for
//! the call itself failing.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::models::{HistoryPage, RecordedStudent};

/// Identity record returned by the verification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub identifier: String,
    pub display_name: String,
}

/// Acknowledgement of a batch commit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CommitAck {
    pub success: bool,
}

#[async_trait]
pub trait AttendanceBackend: Send + Sync {
    /// Camera-path lookup: resolve a decoded barcode to a student.
    async fn lookup_by_code(&self, code: &str) -> Result<Option<StudentRecord>, BackendError>;

    /// Manual-path lookup: check an operator-typed identifier.
    async fn lookup_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StudentRecord>, BackendError>;

    /// Submit the full ordered roster in one request.
    async fn commit_batch(&self, identifiers: &[String]) -> Result<CommitAck, BackendError>;

    /// Weekly history page for one student; week 0 is the current week.
    async fn history_page(
        &self,
        identifier: &str,
        week_offset: u32,
    ) -> Result<HistoryPage, BackendError>;

    /// Aggregate late-entry counts for the dashboard overview.
    async fn recorded_students(&self) -> Result<Vec<RecordedStudent>, BackendError>;
}
