use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::platform::Detection;
use crate::scan::debounce::DetectionDebouncer;
use crate::scan::reconciler::{ScanOutcome, ScanReconciler};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at the crate root)
use crate::{log_error, log_info};

/// Pump decode events through the debouncer into the reconciler until the
/// session is cancelled or the engine closes its channel.
pub(crate) async fn scan_loop(
    session_id: Uuid,
    mut detections: mpsc::Receiver<Detection>,
    mut debouncer: DetectionDebouncer,
    reconciler: Arc<ScanReconciler>,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            received = detections.recv() => {
                let Some(detection) = received else {
                    log_info!("detection stream closed for session {session_id}");
                    break;
                };

                if !debouncer.observe(&detection.code, detection.at) {
                    continue;
                }

                match reconciler.record_camera_scan(&detection.code, &cancel_token).await {
                    Ok(ScanOutcome::Added(entry)) => {
                        log_info!(
                            "recorded {} ({}) for session {session_id}",
                            entry.display_name,
                            entry.identifier
                        );
                    }
                    Ok(outcome) => {
                        log_info!("scan {} resolved as {outcome:?}", detection.code);
                    }
                    Err(err) => {
                        log_error!("scan {} failed for session {session_id}: {err}", detection.code);
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("scan loop shutting down for session {session_id}");
                break;
            }
        }
    }
}
