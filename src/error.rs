//! Error types for the scan-session core.
//!
//! Fatal and non-fatal kinds are kept distinct so the hosting layer can
//! decide what is retryable: a `DeviceUnavailable` ends the session attempt,
//! while `DuplicateIdentifier` and `NotFound` are informational and
//! `Transport` failures clear by re-issuing the same action.

use thiserror::Error;

/// Scanner lifecycle errors.
#[derive(Debug, Error)]
pub enum CameraError {
    /// `start()` was called while a session is already starting or active.
    #[error("scanner already active")]
    AlreadyActive,

    /// Acquisition exhausted both the primary and the fallback constraint
    /// profiles. Recoverable by calling `start()` again.
    #[error("camera unavailable: {reason}")]
    DeviceUnavailable { reason: String },

    /// The display surface could not present the acquired stream.
    #[error("display surface error: {reason}")]
    Surface { reason: String },

    /// The decode engine refused to start on the acquired stream.
    #[error("decoder failed to start: {reason}")]
    DecoderInit { reason: String },
}

/// Roster mutation errors. Both are non-fatal to the session.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("identifier {identifier} is already on the roster")]
    DuplicateIdentifier { identifier: String },

    #[error("index {index} out of range for roster of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures of the remote collaborators themselves, as opposed to negative
/// answers ("not found"), which are ordinary return values.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Reconciliation errors. Transient by construction: the operator retries by
/// rescanning or resubmitting the same identifier.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("verification failed: {0}")]
    Backend(#[from] BackendError),
}

/// Batch commit errors.
#[derive(Debug, Error)]
pub enum CommitError {
    /// Guard: nothing to send, no network call was made.
    #[error("no entries to commit")]
    EmptyRoster,

    /// The server answered but refused the batch.
    #[error("commit rejected by the server ({submitted} entries submitted)")]
    Rejected { submitted: usize },

    #[error("commit transport failure: {0}")]
    Transport(#[from] BackendError),
}
