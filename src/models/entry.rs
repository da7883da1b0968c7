use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One confirmed late arrival.
///
/// Created by the reconciler after remote verification and never mutated
/// afterwards. The display name always comes from the verification response,
/// not from operator input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedEntry {
    /// Roll number, unique within a session.
    pub identifier: String,
    pub display_name: String,
    pub captured_at: DateTime<Utc>,
}

/// Roster contents as held by a [`SessionSlot`](crate::roster::SessionSlot).
/// Entry order is scan order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    pub entries: Vec<ScannedEntry>,
    pub updated_at: Option<DateTime<Utc>>,
}
