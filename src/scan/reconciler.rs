//! Candidate-scan reconciliation.
//!
//! Turns a debounced barcode or an operator-typed roll number into a roster
//! mutation. Two independent checks gate every append: the local roster must
//! not already hold the identifier, and the remote verifier must know it.
//! The recorded display name always comes from the remote response, so a
//! doctored barcode or typo cannot spoof a name.

use std::sync::Arc;

use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::backend::{AttendanceBackend, StudentRecord};
use crate::device::DeviceProfile;
use crate::error::{RosterError, ScanError};
use crate::events::{AppEvent, EventBus};
use crate::models::ScannedEntry;
use crate::platform::Haptics;
use crate::roster::RosterStore;

/// Pulse length for the confirmation buzz on constrained devices.
const HAPTIC_PULSE_MS: u64 = 100;

/// How a candidate identifier was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Added(ScannedEntry),
    AlreadyRecorded {
        identifier: String,
        display_name: String,
    },
    NotFound {
        query: String,
    },
    /// Verification finished after the session was torn down; the response
    /// was discarded without touching the roster.
    Stale,
}

pub struct ScanReconciler {
    roster: RosterStore,
    backend: Arc<dyn AttendanceBackend>,
    haptics: Arc<dyn Haptics>,
    events: EventBus,
    profile: DeviceProfile,
}

impl ScanReconciler {
    pub fn new(
        roster: RosterStore,
        backend: Arc<dyn AttendanceBackend>,
        haptics: Arc<dyn Haptics>,
        events: EventBus,
        profile: DeviceProfile,
    ) -> Self {
        Self {
            roster,
            backend,
            haptics,
            events,
            profile,
        }
    }

    /// Camera path. The decoded barcode carries the roll number, so the
    /// local duplicate check runs against the raw code before any network
    /// round-trip.
    pub async fn record_camera_scan(
        &self,
        code: &str,
        cancel: &CancellationToken,
    ) -> Result<ScanOutcome, ScanError> {
        self.events.info(format!("Processing {code}"));

        if let Some(existing) = self.find_local(code) {
            self.events
                .info(format!("{} already recorded", existing.display_name));
            return Ok(ScanOutcome::AlreadyRecorded {
                identifier: existing.identifier,
                display_name: existing.display_name,
            });
        }

        let record = match self.backend.lookup_by_code(code).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.events.error("Student not found in database");
                return Ok(ScanOutcome::NotFound {
                    query: code.to_owned(),
                });
            }
            Err(err) => {
                warn!("lookup for {code} failed: {err}");
                self.events.error("Error fetching student data, rescan to retry");
                return Err(err.into());
            }
        };

        if cancel.is_cancelled() {
            // The session was stopped while the lookup was in flight.
            debug!("discarding verification result for {code}: session stopped");
            return Ok(ScanOutcome::Stale);
        }

        match self.append(record) {
            ScanOutcome::Added(entry) => {
                self.buzz();
                Ok(ScanOutcome::Added(entry))
            }
            outcome => Ok(outcome),
        }
    }

    /// Manual path: operator-typed roll number. No haptics, no stale guard;
    /// the call runs synchronously from the operator's point of view.
    pub async fn record_manual_entry(&self, identifier: &str) -> Result<ScanOutcome, ScanError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ScanError::EmptyIdentifier);
        }

        if let Some(existing) = self.find_local(identifier) {
            self.events
                .error("Student with this roll number is already recorded");
            return Ok(ScanOutcome::AlreadyRecorded {
                identifier: existing.identifier,
                display_name: existing.display_name,
            });
        }

        let record = match self.backend.lookup_by_identifier(identifier).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.events.error("Student does not exist in database");
                return Ok(ScanOutcome::NotFound {
                    query: identifier.to_owned(),
                });
            }
            Err(err) => {
                warn!("check for {identifier} failed: {err}");
                self.events.error("Error checking student, resubmit to retry");
                return Err(err.into());
            }
        };

        Ok(self.append(record))
    }

    fn find_local(&self, identifier: &str) -> Option<ScannedEntry> {
        self.roster
            .list()
            .into_iter()
            .find(|entry| entry.identifier == identifier)
    }

    /// Append using the remote-resolved record. The lookup may resolve a
    /// code to an identifier that is already on the roster, so duplicates
    /// are re-checked at the append itself.
    fn append(&self, record: StudentRecord) -> ScanOutcome {
        match self.roster.add(&record.identifier, &record.display_name) {
            Ok(entry) => {
                self.events
                    .success(format!("Added {} ({})", entry.display_name, entry.identifier));
                self.events.emit(AppEvent::RosterChanged {
                    count: self.roster.len(),
                });
                ScanOutcome::Added(entry)
            }
            Err(RosterError::DuplicateIdentifier { identifier }) => {
                self.events
                    .info(format!("{} already recorded", record.display_name));
                ScanOutcome::AlreadyRecorded {
                    identifier,
                    display_name: record.display_name,
                }
            }
            Err(err) => {
                // add() has no other failure mode today.
                warn!("unexpected roster error: {err}");
                ScanOutcome::AlreadyRecorded {
                    identifier: record.identifier,
                    display_name: record.display_name,
                }
            }
        }
    }

    fn buzz(&self) {
        if !self.profile.is_constrained() {
            return;
        }
        if let Err(err) = self.haptics.pulse(HAPTIC_PULSE_MS) {
            debug!("haptic pulse failed: {err:#}");
        }
    }
}
