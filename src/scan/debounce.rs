//! Duplicate-detection suppression.
//!
//! The decode engine reports the same physical barcode many times per second
//! while it sits in frame. This filter forwards one candidate per sighting:
//! a dropped duplicate refreshes the window, so the code has to leave the
//! frame (or the window has to lapse with no sighting) before it can fire
//! again.

use chrono::{DateTime, Duration, Utc};

use crate::device::DeviceProfile;

#[derive(Debug)]
pub struct DetectionDebouncer {
    window: Duration,
    last_code: Option<String>,
    last_seen: Option<DateTime<Utc>>,
}

impl DetectionDebouncer {
    /// Window width is fixed per session from the device class.
    pub fn for_profile(profile: &DeviceProfile) -> Self {
        Self::with_window_ms(profile.debounce_window_ms)
    }

    pub fn with_window_ms(window_ms: u64) -> Self {
        Self {
            window: Duration::milliseconds(window_ms as i64),
            last_code: None,
            last_seen: None,
        }
    }

    /// Returns true when the detection should be forwarded as a candidate
    /// scan.
    pub fn observe(&mut self, code: &str, at: DateTime<Utc>) -> bool {
        if let (Some(last_code), Some(last_seen)) = (&self.last_code, self.last_seen) {
            if last_code == code && at - last_seen < self.window {
                self.last_seen = Some(at);
                return false;
            }
        }

        self.last_code = Some(code.to_owned());
        self.last_seen = Some(at);
        true
    }
}
