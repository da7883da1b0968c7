//! Scan-session core for recording student late arrivals.
//!
//! An operator scans identifiers (camera barcode decoding or manual entry)
//! into a session-local roster, then commits the roster as one batch to the
//! attendance service. A reviewer-side dashboard browses per-student history
//! paginated by week. The hosting UI supplies the platform pieces (camera,
//! decode engine, display surface, haptics) and subscribes to the event bus
//! for notices and state changes.

pub mod backend;
pub mod camera;
pub mod commit;
pub mod dashboard;
pub mod device;
pub mod error;
pub mod events;
pub mod history;
pub mod models;
pub mod platform;
pub mod roster;
pub mod scan;
pub mod settings;
mod utils;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use backend::http::HttpBackend;
use backend::AttendanceBackend;
use camera::{CameraSession, SessionPhase};
use commit::{BatchCommitter, CommitReceipt};
use dashboard::DashboardOverview;
use device::DeviceProfile;
use error::{CameraError, CommitError, RosterError, ScanError};
use events::{AppEvent, EventBus};
use models::ScannedEntry;
use platform::PlatformBridge;
use roster::{RosterStore, SessionSlot};
use scan::{ScanOutcome, ScanReconciler};
use settings::SettingsStore;

pub use camera::CaptureConstraints;
pub use events::{Notice, NoticeLevel};
pub use models::{HistoryPage, RecordedStudent, RosterSnapshot};

/// Facade wiring the scan-session core for one hosting page.
///
/// The [`SessionSlot`] is host-owned: hand the same slot back in after a
/// page transition and the roster is recovered. Drop the slot and it is
/// gone; nothing here touches durable storage.
pub struct ScanApp {
    events: EventBus,
    slot: SessionSlot,
    roster: RosterStore,
    reconciler: Arc<ScanReconciler>,
    committer: BatchCommitter,
    camera: Arc<Mutex<CameraSession>>,
    backend: Arc<dyn AttendanceBackend>,
}

impl ScanApp {
    pub fn new(
        platform: PlatformBridge,
        backend: Arc<dyn AttendanceBackend>,
        slot: SessionSlot,
        profile: DeviceProfile,
    ) -> Self {
        let events = EventBus::new();
        let roster = RosterStore::attach(slot.clone());
        let reconciler = Arc::new(ScanReconciler::new(
            roster.clone(),
            Arc::clone(&backend),
            Arc::clone(&platform.haptics),
            events.clone(),
            profile,
        ));
        let committer = BatchCommitter::new(roster.clone(), Arc::clone(&backend), events.clone());
        let camera = Arc::new(Mutex::new(CameraSession::new(
            platform,
            profile,
            Arc::clone(&reconciler),
            events.clone(),
        )));

        Self {
            events,
            slot,
            roster,
            reconciler,
            committer,
            camera,
            backend,
        }
    }

    /// Wire against persisted settings: HTTP backend plus the device profile
    /// resolved from the stored descriptor.
    pub fn from_settings(
        platform: PlatformBridge,
        settings: &SettingsStore,
        slot: SessionSlot,
    ) -> Self {
        let backend_settings = settings.backend();
        let mut http = HttpBackend::new(backend_settings.base_url);
        if let Some(token) = backend_settings.csrf_token {
            http = http.with_csrf_token(token);
        }

        let profile = settings
            .device_descriptor()
            .map(|descriptor| DeviceProfile::resolve(&descriptor))
            .unwrap_or_default();

        Self::new(platform, Arc::new(http), slot, profile)
    }

    pub async fn start_scanner(&self) -> Result<(), CameraError> {
        self.camera.lock().await.start().await
    }

    pub async fn stop_scanner(&self) {
        self.camera.lock().await.stop().await;
    }

    pub async fn scanner_phase(&self) -> SessionPhase {
        self.camera.lock().await.phase()
    }

    pub async fn add_manual_entry(&self, identifier: &str) -> Result<ScanOutcome, ScanError> {
        self.reconciler.record_manual_entry(identifier).await
    }

    /// Destructive; the UI asks the operator for confirmation before calling
    /// this.
    pub fn remove_entry(&self, index: usize) -> Result<ScannedEntry, RosterError> {
        let removed = self.roster.remove(index)?;
        self.events.info("Student removed");
        self.events.emit(AppEvent::RosterChanged {
            count: self.roster.len(),
        });
        Ok(removed)
    }

    /// Destructive; the UI asks the operator for confirmation before calling
    /// this.
    pub fn clear_roster(&self) {
        self.roster.clear();
        self.events.info("All data cleared");
        self.events.emit(AppEvent::RosterChanged { count: 0 });
    }

    pub async fn commit_roster(&self) -> Result<CommitReceipt, CommitError> {
        self.committer.commit().await
    }

    /// Current roster in scan order.
    pub fn roster(&self) -> Vec<ScannedEntry> {
        self.roster.list()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    pub fn dashboard(&self) -> DashboardOverview {
        DashboardOverview::new(Arc::clone(&self.backend))
    }

    pub fn session_slot(&self) -> SessionSlot {
        self.slot.clone()
    }
}

/// Initialize logging (reads the `RUST_LOG` env var).
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
