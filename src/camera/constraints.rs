//! Capture constraint profiles.
//!
//! Acquisition walks a short ladder: one primary profile picked by device
//! class, then one relaxed fallback (lower resolution, bare facing-mode
//! request, no frame-rate hint). The ladder is rebuilt on every session
//! start and never persisted.

use serde::Serialize;

use crate::device::{DeviceClass, DeviceProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FacingMode {
    Environment,
    User,
}

/// ideal/max pair for one capture dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub ideal: u32,
    pub max: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRateRange {
    pub ideal: u32,
    pub max: Option<u32>,
}

/// One rung of the constraint ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureConstraints {
    pub label: &'static str,
    pub facing: FacingMode,
    /// When false the facing request is a bare preference without the
    /// ideal-hint wrapper; some drivers only accept the relaxed form.
    pub facing_ideal_hint: bool,
    pub width: DimensionRange,
    pub height: DimensionRange,
    pub frame_rate: Option<FrameRateRange>,
}

impl CaptureConstraints {
    fn primary(profile: &DeviceProfile) -> Self {
        match profile.class {
            DeviceClass::Constrained => Self {
                label: "primary-constrained",
                facing: FacingMode::Environment,
                facing_ideal_hint: true,
                width: DimensionRange {
                    ideal: 640,
                    max: Some(800),
                },
                height: DimensionRange {
                    ideal: 480,
                    max: Some(600),
                },
                frame_rate: Some(FrameRateRange {
                    ideal: 15,
                    max: Some(30),
                }),
            },
            DeviceClass::Standard => Self {
                label: "primary",
                facing: FacingMode::Environment,
                facing_ideal_hint: true,
                width: DimensionRange {
                    ideal: 1280,
                    max: None,
                },
                height: DimensionRange {
                    ideal: 720,
                    max: None,
                },
                frame_rate: Some(FrameRateRange {
                    ideal: 30,
                    max: None,
                }),
            },
        }
    }

    fn fallback() -> Self {
        Self {
            label: "fallback",
            facing: FacingMode::Environment,
            facing_ideal_hint: false,
            width: DimensionRange {
                ideal: 640,
                max: None,
            },
            height: DimensionRange {
                ideal: 480,
                max: None,
            },
            frame_rate: None,
        }
    }
}

/// Ranked profiles to try in order.
pub fn ladder(profile: &DeviceProfile) -> Vec<CaptureConstraints> {
    vec![CaptureConstraints::primary(profile), CaptureConstraints::fallback()]
}
