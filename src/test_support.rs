//! Shared fakes for unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use crate::backend::{AttendanceBackend, CommitAck, StudentRecord};
use crate::camera::CaptureConstraints;
use crate::device::DecoderTuning;
use crate::error::BackendError;
use crate::models::{HistoryPage, RecordedStudent};
use crate::platform::{
    CaptureDevice, CaptureHandle, DecodeEngine, Detection, DisplaySurface, Haptics, MediaTrack,
    PlatformBridge,
};

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub students: Mutex<Vec<StudentRecord>>,
    pub recorded: Mutex<Vec<RecordedStudent>>,
    pub commit_success: AtomicBool,
    pub fail_lookups: AtomicBool,
    pub fail_commit: AtomicBool,
    pub fail_history: AtomicBool,
    pub lookup_calls: AtomicUsize,
    pub commit_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub last_commit: Mutex<Option<Vec<String>>>,
    pub last_history_request: Mutex<Option<(String, u32)>>,
}

impl FakeBackend {
    pub fn with_students(records: &[(&str, &str)]) -> Arc<Self> {
        let backend = Self::default();
        backend.commit_success.store(true, Ordering::SeqCst);
        *backend.students.lock().unwrap() = records
            .iter()
            .map(|(identifier, name)| StudentRecord {
                identifier: (*identifier).to_owned(),
                display_name: (*name).to_owned(),
            })
            .collect();
        Arc::new(backend)
    }

    fn find(&self, identifier: &str) -> Option<StudentRecord> {
        self.students
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.identifier == identifier)
            .cloned()
    }
}

#[async_trait]
impl AttendanceBackend for FakeBackend {
    async fn lookup_by_code(&self, code: &str) -> Result<Option<StudentRecord>, BackendError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(BackendError::Status { status: 500 });
        }
        Ok(self.find(code))
    }

    async fn lookup_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StudentRecord>, BackendError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(BackendError::Status { status: 500 });
        }
        Ok(self.find(identifier))
    }

    async fn commit_batch(&self, identifiers: &[String]) -> Result<CommitAck, BackendError> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(BackendError::Status { status: 502 });
        }
        *self.last_commit.lock().unwrap() = Some(identifiers.to_vec());
        Ok(CommitAck {
            success: self.commit_success.load(Ordering::SeqCst),
        })
    }

    async fn history_page(
        &self,
        identifier: &str,
        week_offset: u32,
    ) -> Result<HistoryPage, BackendError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_history_request.lock().unwrap() = Some((identifier.to_owned(), week_offset));
        if self.fail_history.load(Ordering::SeqCst) {
            return Err(BackendError::Status { status: 500 });
        }
        Ok(HistoryPage {
            identifier: identifier.to_owned(),
            week_offset,
            entries: Vec::new(),
        })
    }

    async fn recorded_students(&self) -> Result<Vec<RecordedStudent>, BackendError> {
        Ok(self.recorded.lock().unwrap().clone())
    }
}

pub(crate) struct FakeTrack {
    stopped: Arc<AtomicBool>,
}

impl MediaTrack for FakeTrack {
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Capture device that rejects configured ladder rungs and tracks every
/// handed-out media track so tests can assert nothing leaks.
#[derive(Default)]
pub(crate) struct FakeCapture {
    pub reject_labels: Mutex<Vec<&'static str>>,
    pub open_attempts: Mutex<Vec<&'static str>>,
    live_tracks: Mutex<Vec<Arc<AtomicBool>>>,
}

impl FakeCapture {
    pub fn rejecting(labels: &[&'static str]) -> Arc<Self> {
        let capture = Self::default();
        *capture.reject_labels.lock().unwrap() = labels.to_vec();
        Arc::new(capture)
    }

    pub fn all_tracks_stopped(&self) -> bool {
        self.live_tracks
            .lock()
            .unwrap()
            .iter()
            .all(|flag| flag.load(Ordering::SeqCst))
    }

    pub fn handed_out_tracks(&self) -> usize {
        self.live_tracks.lock().unwrap().len()
    }
}

#[async_trait]
impl CaptureDevice for FakeCapture {
    async fn open(&self, constraints: &CaptureConstraints) -> anyhow::Result<CaptureHandle> {
        self.open_attempts.lock().unwrap().push(constraints.label);
        if self.reject_labels.lock().unwrap().contains(&constraints.label) {
            anyhow::bail!("constraints {} rejected", constraints.label);
        }

        let flag = Arc::new(AtomicBool::new(false));
        self.live_tracks.lock().unwrap().push(Arc::clone(&flag));
        Ok(CaptureHandle::new(vec![Box::new(FakeTrack {
            stopped: flag,
        })]))
    }
}

#[derive(Default)]
pub(crate) struct FakeEngine {
    detections: Mutex<Option<mpsc::Receiver<Detection>>>,
    pub fail_start: AtomicBool,
    pub started: AtomicBool,
    pub stopped: AtomicBool,
    pub tuning_seen: Mutex<Option<DecoderTuning>>,
}

impl FakeEngine {
    /// Engine plus the sender tests use to inject detections.
    pub fn with_channel() -> (Arc<Self>, mpsc::Sender<Detection>) {
        let (tx, rx) = mpsc::channel(16);
        let engine = Self::default();
        *engine.detections.lock().unwrap() = Some(rx);
        (Arc::new(engine), tx)
    }
}

#[async_trait]
impl DecodeEngine for FakeEngine {
    async fn start(&self, tuning: &DecoderTuning) -> anyhow::Result<mpsc::Receiver<Detection>> {
        if self.fail_start.load(Ordering::SeqCst) {
            anyhow::bail!("decoder init failed");
        }
        *self.tuning_seen.lock().unwrap() = Some(*tuning);
        self.started.store(true, Ordering::SeqCst);
        self.detections
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow::anyhow!("no detection channel prepared"))
    }

    async fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub(crate) struct FakeSurface {
    pub attached: AtomicBool,
    pub fullscreen: AtomicBool,
    pub overlay: AtomicBool,
    pub laser: AtomicBool,
    pub first_frame_waits: AtomicUsize,
}

#[async_trait]
impl DisplaySurface for FakeSurface {
    async fn attach(&self, _handle: &CaptureHandle) -> anyhow::Result<()> {
        self.attached.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn wait_first_frame(&self) -> anyhow::Result<()> {
        self.first_frame_waits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    fn enter_fullscreen(&self) {
        self.fullscreen.store(true, Ordering::SeqCst);
    }

    fn exit_fullscreen(&self) {
        self.fullscreen.store(false, Ordering::SeqCst);
    }

    fn set_overlay_visible(&self, visible: bool) {
        self.overlay.store(visible, Ordering::SeqCst);
    }

    fn set_laser_visible(&self, visible: bool) {
        self.laser.store(visible, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub(crate) struct FakeHaptics {
    pub pulses: AtomicUsize,
}

impl Haptics for FakeHaptics {
    fn pulse(&self, _duration_ms: u64) -> anyhow::Result<()> {
        self.pulses.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) fn bridge(
    capture: Arc<FakeCapture>,
    engine: Arc<FakeEngine>,
    surface: Arc<FakeSurface>,
    haptics: Arc<FakeHaptics>,
) -> PlatformBridge {
    PlatformBridge {
        capture,
        decoder: engine,
        surface,
        haptics,
    }
}

pub(crate) fn detection(code: &str) -> Detection {
    Detection {
        code: code.to_owned(),
        format: Some("code_128".to_owned()),
        at: Utc::now(),
    }
}
