use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::constraints::CaptureConstraints;

/// Scanner lifecycle phase.
///
/// `Failed` is terminal for the attempt but recoverable: `start()` is
/// accepted again from both `Idle` and `Failed`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    Idle,
    Starting,
    Active,
    Stopping,
    Failed,
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    pub phase: SessionPhase,
    pub session_id: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
    /// Constraint rung the acquisition succeeded with, once `Active`.
    pub active_constraints: Option<CaptureConstraints>,
}

impl CameraState {
    pub fn can_start(&self) -> bool {
        matches!(self.phase, SessionPhase::Idle | SessionPhase::Failed)
    }

    pub fn begin(&mut self, session_id: Uuid, at: DateTime<Utc>) {
        *self = Self {
            phase: SessionPhase::Starting,
            session_id: Some(session_id),
            started_at: Some(at),
            active_constraints: None,
        };
    }

    pub fn activate(&mut self, constraints: CaptureConstraints) {
        self.phase = SessionPhase::Active;
        self.active_constraints = Some(constraints);
    }

    pub fn fail(&mut self) {
        self.phase = SessionPhase::Failed;
        self.active_constraints = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_allowed_from_idle_and_failed_only() {
        let mut state = CameraState::default();
        assert!(state.can_start());

        state.begin(Uuid::new_v4(), Utc::now());
        assert!(!state.can_start());

        state.activate(crate::camera::constraints::ladder(&Default::default())[0].clone());
        assert!(!state.can_start());

        state.fail();
        assert!(state.can_start());

        state.reset();
        assert!(state.can_start());
    }
}
