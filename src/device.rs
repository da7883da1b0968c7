//! Device-class classification and per-session tuning.
//!
//! Capture constraints, the debounce window and decoder tuning all vary with
//! the same coarse hardware classification. The profile is resolved once per
//! session from a device descriptor and threaded into the camera session and
//! the debouncer, so no other module branches on the device class directly.

use serde::{Deserialize, Serialize};

const DEFAULT_DEBOUNCE_MS: u64 = 2000;
// Constrained decoders report the same barcode in rapid bursts; the wider
// window absorbs them.
const CONSTRAINED_DEBOUNCE_MS: u64 = 3500;

const DEFAULT_DECODER_WORKERS: u32 = 2;
const DEFAULT_SCANS_PER_SECOND: u32 = 10;
const CONSTRAINED_DECODER_WORKERS: u32 = 1;
const CONSTRAINED_SCANS_PER_SECOND: u32 = 5;

/// Coarse capture-hardware quirk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceClass {
    /// Default capture and decoding parameters.
    Standard,
    /// Known quirky capture stack; gets conservative parameters throughout.
    Constrained,
}

impl DeviceClass {
    /// Classify from a device descriptor (user-agent style string).
    pub fn classify(descriptor: &str) -> Self {
        let descriptor = descriptor.to_lowercase();
        if descriptor.contains("samsung") || descriptor.contains("sm-") {
            DeviceClass::Constrained
        } else {
            DeviceClass::Standard
        }
    }
}

/// Decode-engine tuning: worker pool size and frame sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoderTuning {
    pub workers: u32,
    pub scans_per_second: u32,
}

/// Per-session tuning resolved from the device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub class: DeviceClass,
    pub debounce_window_ms: u64,
    pub decoder: DecoderTuning,
}

impl DeviceProfile {
    pub fn resolve(descriptor: &str) -> Self {
        Self::for_class(DeviceClass::classify(descriptor))
    }

    pub fn for_class(class: DeviceClass) -> Self {
        match class {
            DeviceClass::Standard => Self {
                class,
                debounce_window_ms: DEFAULT_DEBOUNCE_MS,
                decoder: DecoderTuning {
                    workers: DEFAULT_DECODER_WORKERS,
                    scans_per_second: DEFAULT_SCANS_PER_SECOND,
                },
            },
            DeviceClass::Constrained => Self {
                class,
                debounce_window_ms: CONSTRAINED_DEBOUNCE_MS,
                decoder: DecoderTuning {
                    workers: CONSTRAINED_DECODER_WORKERS,
                    scans_per_second: CONSTRAINED_SCANS_PER_SECOND,
                },
            },
        }
    }

    pub fn is_constrained(&self) -> bool {
        self.class == DeviceClass::Constrained
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::for_class(DeviceClass::Standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_constrained_descriptors() {
        let ua = "Mozilla/5.0 (Linux; Android 13; SM-G991B) SamsungBrowser/21.0";
        assert_eq!(DeviceClass::classify(ua), DeviceClass::Constrained);
        assert_eq!(DeviceClass::classify("sm-a515f"), DeviceClass::Constrained);
    }

    #[test]
    fn classifies_everything_else_as_standard() {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Safari/605.1.15";
        assert_eq!(DeviceClass::classify(ua), DeviceClass::Standard);
        assert_eq!(DeviceClass::classify(""), DeviceClass::Standard);
    }

    #[test]
    fn constrained_profile_widens_window_and_slows_decoder() {
        let standard = DeviceProfile::for_class(DeviceClass::Standard);
        let constrained = DeviceProfile::for_class(DeviceClass::Constrained);

        assert_eq!(standard.debounce_window_ms, 2000);
        assert_eq!(constrained.debounce_window_ms, 3500);
        assert!(constrained.decoder.workers < standard.decoder.workers);
        assert!(constrained.decoder.scans_per_second < standard.decoder.scans_per_second);
    }
}
