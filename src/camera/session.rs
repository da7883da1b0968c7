//! Scanner session lifecycle.
//!
//! Owns exactly one capture handle at a time. Acquisition walks the
//! constraint ladder (class primary, then one relaxed fallback); every
//! failure path releases whatever it acquired before surfacing, so a session
//! that never reached `Active` holds nothing.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::device::DeviceProfile;
use crate::error::CameraError;
use crate::events::{AppEvent, EventBus};
use crate::platform::{CaptureHandle, PlatformBridge};
use crate::scan::debounce::DetectionDebouncer;
use crate::scan::reconciler::ScanReconciler;

use super::constraints::{self, CaptureConstraints};
use super::loop_worker::scan_loop;
use super::state::{CameraState, SessionPhase};

pub struct CameraSession {
    platform: PlatformBridge,
    profile: DeviceProfile,
    reconciler: Arc<ScanReconciler>,
    events: EventBus,
    state: CameraState,
    capture: Option<CaptureHandle>,
    worker: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl CameraSession {
    pub fn new(
        platform: PlatformBridge,
        profile: DeviceProfile,
        reconciler: Arc<ScanReconciler>,
        events: EventBus,
    ) -> Self {
        Self {
            platform,
            profile,
            reconciler,
            events,
            state: CameraState::default(),
            capture: None,
            worker: None,
            cancel_token: None,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub async fn start(&mut self) -> Result<(), CameraError> {
        if !self.state.can_start() {
            return Err(CameraError::AlreadyActive);
        }

        let session_id = Uuid::new_v4();
        self.state.begin(session_id, Utc::now());
        self.publish_phase();
        self.events.info("Starting camera...");

        let (handle, rung) = match self.acquire().await {
            Ok(acquired) => acquired,
            Err(err) => {
                self.state.fail();
                self.publish_phase();
                self.events
                    .error("Could not start the camera, check permissions and retry");
                return Err(err);
            }
        };

        // The decode engine must not start before the first frame is ready;
        // feeding it a black stream wastes workers and reports phantom
        // errors.
        if let Err(err) = self.present(&handle).await {
            handle.release();
            self.clear_presentation();
            self.state.fail();
            self.publish_phase();
            self.events.error("Could not present the camera stream");
            return Err(CameraError::Surface {
                reason: format!("{err:#}"),
            });
        }

        let detections = match self.platform.decoder.start(&self.profile.decoder).await {
            Ok(receiver) => receiver,
            Err(err) => {
                handle.release();
                self.clear_presentation();
                self.state.fail();
                self.publish_phase();
                self.events.error("Error starting scanner");
                return Err(CameraError::DecoderInit {
                    reason: format!("{err:#}"),
                });
            }
        };

        let cancel_token = CancellationToken::new();
        let debouncer = DetectionDebouncer::for_profile(&self.profile);
        let worker = tokio::spawn(scan_loop(
            session_id,
            detections,
            debouncer,
            Arc::clone(&self.reconciler),
            cancel_token.clone(),
        ));

        self.capture = Some(handle);
        self.worker = Some(worker);
        self.cancel_token = Some(cancel_token);
        self.state.activate(rung);
        self.platform.surface.set_overlay_visible(true);
        self.platform.surface.set_laser_visible(true);
        self.publish_phase();
        self.events
            .success("Scanner started, point the camera at a barcode");
        Ok(())
    }

    /// Silent no-op unless `Active`. Guaranteed to leave zero held hardware
    /// resources regardless of what triggered the stop.
    pub async fn stop(&mut self) {
        if self.state.phase != SessionPhase::Active {
            return;
        }

        self.state.phase = SessionPhase::Stopping;
        self.publish_phase();

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.platform.decoder.stop().await;
        if let Some(worker) = self.worker.take() {
            if let Err(err) = worker.await {
                warn!("scan loop failed to join: {err}");
            }
        }

        if let Some(handle) = self.capture.take() {
            handle.release();
        }
        self.clear_presentation();

        self.state.reset();
        self.publish_phase();
        self.events.info("Scanner stopped");
    }

    async fn acquire(&self) -> Result<(CaptureHandle, CaptureConstraints), CameraError> {
        let mut last_error = None;
        for rung in constraints::ladder(&self.profile) {
            match self.platform.capture.open(&rung).await {
                Ok(handle) => {
                    info!(
                        "camera acquired with {} profile ({} tracks)",
                        rung.label,
                        handle.track_count()
                    );
                    return Ok((handle, rung));
                }
                Err(err) => {
                    warn!("{} constraints failed: {err:#}", rung.label);
                    last_error = Some(err);
                }
            }
        }

        Err(CameraError::DeviceUnavailable {
            reason: last_error
                .map(|err| format!("{err:#}"))
                .unwrap_or_else(|| "no constraint profile accepted".to_owned()),
        })
    }

    async fn present(&self, handle: &CaptureHandle) -> anyhow::Result<()> {
        self.platform.surface.attach(handle).await?;
        self.platform.surface.wait_first_frame().await?;
        self.platform.surface.enter_fullscreen();
        Ok(())
    }

    fn clear_presentation(&self) {
        let surface = &self.platform.surface;
        surface.set_laser_visible(false);
        surface.set_overlay_visible(false);
        surface.detach();
        surface.exit_fullscreen();
    }

    fn publish_phase(&self) {
        self.events.emit(AppEvent::ScannerPhaseChanged {
            phase: self.state.phase,
        });
    }
}
