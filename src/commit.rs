//! Batch commit of the session roster.

use std::sync::Arc;

use log::warn;
use serde::Serialize;

use crate::backend::AttendanceBackend;
use crate::error::CommitError;
use crate::events::{AppEvent, EventBus};
use crate::roster::RosterStore;

/// Summary of an accepted batch.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReceipt {
    pub submitted: usize,
}

pub struct BatchCommitter {
    roster: RosterStore,
    backend: Arc<dyn AttendanceBackend>,
    events: EventBus,
}

impl BatchCommitter {
    pub fn new(roster: RosterStore, backend: Arc<dyn AttendanceBackend>, events: EventBus) -> Self {
        Self {
            roster,
            backend,
            events,
        }
    }

    /// Submit the entire roster as one request. At-most-once: no retry, no
    /// partial commit.
    ///
    /// The roster is cleared regardless of the server's answer; callers that
    /// need to preserve entries on failure must snapshot `list()` first.
    pub async fn commit(&self) -> Result<CommitReceipt, CommitError> {
        let entries = self.roster.list();
        if entries.is_empty() {
            self.events.error("No students to record");
            return Err(CommitError::EmptyRoster);
        }

        let identifiers: Vec<String> = entries
            .iter()
            .map(|entry| entry.identifier.clone())
            .collect();
        let submitted = identifiers.len();

        let result = self.backend.commit_batch(&identifiers).await;

        self.roster.clear();
        self.events.emit(AppEvent::RosterChanged { count: 0 });

        match result {
            Ok(ack) if ack.success => {
                self.events.success("Data recorded successfully");
                Ok(CommitReceipt { submitted })
            }
            Ok(_) => {
                warn!("server rejected batch of {submitted}");
                self.events.error("Recording failed on the server");
                Err(CommitError::Rejected { submitted })
            }
            Err(err) => {
                warn!("batch commit transport failure: {err}");
                self.events.error("Recording failed, could not reach the server");
                Err(CommitError::Transport(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use crate::roster::SessionSlot;
    use crate::test_support::FakeBackend;

    fn committer(backend: Arc<FakeBackend>) -> (BatchCommitter, RosterStore) {
        let roster = RosterStore::attach(SessionSlot::new());
        let committer = BatchCommitter::new(roster.clone(), backend, EventBus::new());
        (committer, roster)
    }

    #[tokio::test]
    async fn empty_roster_makes_no_network_call() {
        let backend = FakeBackend::with_students(&[]);
        let (committer, _) = committer(backend.clone());

        let err = committer.commit().await.unwrap_err();
        assert!(matches!(err, CommitError::EmptyRoster));
        assert_eq!(backend.commit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_commit_sends_identifiers_in_scan_order_and_clears() {
        let backend = FakeBackend::with_students(&[]);
        let (committer, roster) = committer(backend.clone());
        roster.add("R300", "Chandra").unwrap();
        roster.add("R100", "Alice").unwrap();

        let receipt = committer.commit().await.unwrap();
        assert_eq!(receipt.submitted, 2);
        assert_eq!(
            backend.last_commit.lock().unwrap().as_deref(),
            Some(["R300".to_owned(), "R100".to_owned()].as_slice())
        );
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn rejected_commit_still_clears_the_roster() {
        let backend = FakeBackend::with_students(&[]);
        backend.commit_success.store(false, Ordering::SeqCst);
        let (committer, roster) = committer(backend);
        roster.add("R100", "Alice").unwrap();

        let err = committer.commit().await.unwrap_err();
        assert!(matches!(err, CommitError::Rejected { submitted: 1 }));
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_still_clears_the_roster() {
        let backend = FakeBackend::with_students(&[]);
        backend.fail_commit.store(true, Ordering::SeqCst);
        let (committer, roster) = committer(backend);
        roster.add("R100", "Alice").unwrap();

        let err = committer.commit().await.unwrap_err();
        assert!(matches!(err, CommitError::Transport(_)));
        assert!(roster.is_empty());
    }
}
