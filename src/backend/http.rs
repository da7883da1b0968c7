//! HTTP implementation of the attendance backend.
//!
//! Lookups and history reads are plain GETs; the batch commit is a POST that
//! carries the request-forgery-protection token supplied by the hosting page.
//! A 404 on the code lookup is a negative answer, not an error.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::backend::{AttendanceBackend, CommitAck, StudentRecord};
use crate::error::BackendError;
use crate::models::{DayCount, HistoryPage, RecordedStudent};

/// Header carrying the request-forgery-protection token on commits.
const CSRF_HEADER: &str = "X-CSRFToken";

pub struct HttpBackend {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            csrf_token: None,
        }
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[derive(Debug, Deserialize)]
struct StudentPayload {
    roll_no: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    success: bool,
    #[serde(default)]
    student: Option<StudentPayload>,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    exists: bool,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CommitRequest<'a> {
    roll_nos: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    success: bool,
}

#[derive(Debug, Deserialize)]
struct HistoryEntryPayload {
    date: NaiveDate,
    count: u32,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    history: Vec<HistoryEntryPayload>,
}

#[derive(Debug, Deserialize)]
struct RecordedStudentPayload {
    roll_no: String,
    name: String,
    late_entries: u32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct RecordedResponse {
    students: Vec<RecordedStudentPayload>,
}

#[async_trait]
impl AttendanceBackend for HttpBackend {
    async fn lookup_by_code(&self, code: &str) -> Result<Option<StudentRecord>, BackendError> {
        let response = self
            .client
            .get(self.url(&format!("api/student/{code}/")))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: LookupResponse = response.error_for_status()?.json().await?;
        if !body.success {
            return Ok(None);
        }

        let student = body.student.ok_or_else(|| {
            BackendError::Decode("lookup succeeded without a student record".to_owned())
        })?;
        Ok(Some(StudentRecord {
            identifier: student.roll_no,
            display_name: student.name,
        }))
    }

    async fn lookup_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StudentRecord>, BackendError> {
        let response = self
            .client
            .get(self.url("api/check-student/"))
            .query(&[("roll_no", identifier)])
            .send()
            .await?;

        let body: CheckResponse = response.error_for_status()?.json().await?;
        if !body.exists {
            return Ok(None);
        }

        let name = body.name.ok_or_else(|| {
            BackendError::Decode("check succeeded without a student name".to_owned())
        })?;
        Ok(Some(StudentRecord {
            identifier: identifier.to_owned(),
            display_name: name,
        }))
    }

    async fn commit_batch(&self, identifiers: &[String]) -> Result<CommitAck, BackendError> {
        let mut request = self
            .client
            .post(self.url("api/record-late-entries/"))
            .json(&CommitRequest {
                roll_nos: identifiers,
            });
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let body: CommitResponse = request.send().await?.error_for_status()?.json().await?;
        Ok(CommitAck {
            success: body.success,
        })
    }

    async fn history_page(
        &self,
        identifier: &str,
        week_offset: u32,
    ) -> Result<HistoryPage, BackendError> {
        let week = week_offset.to_string();
        let response = self
            .client
            .get(self.url("api/student-history/"))
            .query(&[("roll_no", identifier), ("week", week.as_str())])
            .send()
            .await?;

        let body: HistoryResponse = response.error_for_status()?.json().await?;
        Ok(HistoryPage {
            identifier: identifier.to_owned(),
            week_offset,
            entries: body
                .history
                .into_iter()
                .map(|entry| DayCount {
                    date: entry.date,
                    count: entry.count,
                })
                .collect(),
        })
    }

    async fn recorded_students(&self) -> Result<Vec<RecordedStudent>, BackendError> {
        let response = self
            .client
            .get(self.url("api/recorded-students/"))
            .send()
            .await?;

        let body: RecordedResponse = response.error_for_status()?.json().await?;
        Ok(body
            .students
            .into_iter()
            .map(|student| RecordedStudent {
                identifier: student.roll_no,
                display_name: student.name,
                late_entries: student.late_entries,
                last_recorded_at: student.created_at,
            })
            .collect())
    }
}
