//! Platform seam: capture hardware, decode engine, display surface, haptics.
//!
//! The host supplies implementations of these traits; the core only drives
//! their lifecycles and consumes decode events. Errors at this boundary are
//! opaque (`anyhow`), and the camera session maps them to its own kinds.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::camera::CaptureConstraints;
use crate::device::DecoderTuning;

/// A single acquired media track. `stop` must be idempotent.
pub trait MediaTrack: Send + Sync {
    fn stop(&self);
}

/// Handle over every track acquired for one capture session.
pub struct CaptureHandle {
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl CaptureHandle {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Stop and drop every acquired track.
    pub fn release(self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

/// One decoded-barcode event from the engine.
#[derive(Debug, Clone)]
pub struct Detection {
    pub code: String,
    /// Symbology reported by the decoder, when known.
    pub format: Option<String>,
    pub at: DateTime<Utc>,
}

#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Acquire a stream satisfying `constraints`. On failure nothing may be
    /// left held.
    async fn open(&self, constraints: &CaptureConstraints) -> Result<CaptureHandle>;
}

#[async_trait]
pub trait DecodeEngine: Send + Sync {
    /// Start decoding frames from the attached surface. Detections arrive on
    /// the returned channel until `stop`.
    async fn start(&self, tuning: &DecoderTuning) -> Result<mpsc::Receiver<Detection>>;

    async fn stop(&self);
}

#[async_trait]
pub trait DisplaySurface: Send + Sync {
    /// Bind the capture stream to the preview surface.
    async fn attach(&self, handle: &CaptureHandle) -> Result<()>;

    /// Resolves once the first frame is ready. The decode engine must not be
    /// started before this resolves.
    async fn wait_first_frame(&self) -> Result<()>;

    fn detach(&self);
    fn enter_fullscreen(&self);
    fn exit_fullscreen(&self);
    fn set_overlay_visible(&self, visible: bool);
    fn set_laser_visible(&self, visible: bool);
}

/// Best-effort haptic feedback. Failures are logged by the caller, never
/// propagated.
pub trait Haptics: Send + Sync {
    fn pulse(&self, duration_ms: u64) -> Result<()>;
}

/// Bundle of platform capabilities handed to the core by the host.
#[derive(Clone)]
pub struct PlatformBridge {
    pub capture: Arc<dyn CaptureDevice>,
    pub decoder: Arc<dyn DecodeEngine>,
    pub surface: Arc<dyn DisplaySurface>,
    pub haptics: Arc<dyn Haptics>,
}
