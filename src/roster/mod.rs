//! Session-local roster of confirmed entries.
//!
//! The roster lives in a [`SessionSlot`] owned by the hosting layer, so a
//! page transition within the same browsing session can hand the slot to a
//! fresh [`RosterStore`] and recover the list. Nothing here is durable: drop
//! the slot and the roster is gone.

use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::error::RosterError;
use crate::models::{RosterSnapshot, ScannedEntry};

/// Host-owned storage cell for the roster.
#[derive(Clone, Default)]
pub struct SessionSlot {
    inner: Arc<RwLock<RosterSnapshot>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        self.inner.read().unwrap().clone()
    }
}

/// Authoritative local list of confirmed entries for the active session.
///
/// Entries keep scan order; identifiers are unique. Every mutation persists
/// straight into the attached slot.
#[derive(Clone)]
pub struct RosterStore {
    slot: SessionSlot,
}

impl RosterStore {
    /// Bind to a host-owned slot, recovering whatever roster it holds.
    pub fn attach(slot: SessionSlot) -> Self {
        Self { slot }
    }

    pub fn add(&self, identifier: &str, display_name: &str) -> Result<ScannedEntry, RosterError> {
        let mut guard = self.slot.inner.write().unwrap();
        if guard
            .entries
            .iter()
            .any(|entry| entry.identifier == identifier)
        {
            return Err(RosterError::DuplicateIdentifier {
                identifier: identifier.to_owned(),
            });
        }

        let entry = ScannedEntry {
            identifier: identifier.to_owned(),
            display_name: display_name.to_owned(),
            captured_at: Utc::now(),
        };
        guard.entries.push(entry.clone());
        guard.updated_at = Some(Utc::now());
        Ok(entry)
    }

    /// Destructive single-entry removal. Confirmation is the caller's
    /// concern.
    pub fn remove(&self, index: usize) -> Result<ScannedEntry, RosterError> {
        let mut guard = self.slot.inner.write().unwrap();
        if index >= guard.entries.len() {
            return Err(RosterError::IndexOutOfRange {
                index,
                len: guard.entries.len(),
            });
        }

        let entry = guard.entries.remove(index);
        guard.updated_at = Some(Utc::now());
        Ok(entry)
    }

    pub fn clear(&self) {
        let mut guard = self.slot.inner.write().unwrap();
        guard.entries.clear();
        guard.updated_at = Some(Utc::now());
    }

    /// Full roster in scan order.
    pub fn list(&self) -> Vec<ScannedEntry> {
        self.slot.inner.read().unwrap().entries.clone()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.slot
            .inner
            .read()
            .unwrap()
            .entries
            .iter()
            .any(|entry| entry.identifier == identifier)
    }

    pub fn len(&self) -> usize {
        self.slot.inner.read().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
