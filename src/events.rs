//! Operator-facing events.
//!
//! Everything the hosting UI needs to render lands on one broadcast bus:
//! short-lived status notices, scanner phase changes and roster updates.
//! Emission is fire-and-forget; with no subscriber the event is dropped.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::camera::SessionPhase;

/// How long the UI should keep a status notice on screen before it
/// auto-dismisses.
pub const NOTICE_TTL_MS: u64 = 3000;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short-lived, auto-dismissing status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub ttl_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AppEvent {
    Notice(Notice),
    ScannerPhaseChanged { phase: SessionPhase },
    RosterChanged { count: usize },
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notice(NoticeLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notice(NoticeLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notice(NoticeLevel::Error, message);
    }

    fn notice(&self, level: NoticeLevel, message: impl Into<String>) {
        self.emit(AppEvent::Notice(Notice {
            level,
            message: message.into(),
            ttl_ms: NOTICE_TTL_MS,
        }));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
