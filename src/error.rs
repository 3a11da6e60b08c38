//! Error types for the doc2pdf-client library.
//!
//! Every failure an upload session can hit maps to one [`ConvertError`]
//! variant, grouped the way the failures actually occur:
//!
//! * **Precondition failures** (no file selected, wrong state) — rejected
//!   before any request is sent; the session is left untouched.
//! * **Server-reported failures** (non-2xx) — the response body is carried
//!   verbatim so the caller can show the service's own message.
//! * **Transport failures** (connect, DNS, timeout) — terminal for the
//!   attempt; the session resets itself so the caller can resubmit.
//!
//! Nothing is retried automatically. After any error the session is back in
//! a resubmittable state — that contract is what keeps the taxonomy flat
//! rather than layered.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the doc2pdf-client library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Precondition errors ───────────────────────────────────────────────
    /// Submit was called with no file selected. No request was sent.
    #[error("No file selected.\nSelect a document before submitting.")]
    NoFileSelected,

    /// The selected file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the selected file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// An operation was attempted from a state that does not allow it,
    /// e.g. submitting while a conversion is already in flight.
    #[error("Cannot {operation} while the session is {state}")]
    WrongState {
        operation: &'static str,
        state: &'static str,
    },

    /// Download was requested but no converted artifact is held.
    #[error("No converted artifact to download")]
    NoArtifact,

    // ── Server errors ─────────────────────────────────────────────────────
    /// The conversion endpoint answered with a non-2xx status.
    ///
    /// `message` is the response body, unmodified — the service writes
    /// plain-text errors meant to be shown to the user as-is.
    #[error("Conversion failed (HTTP {status}): {message}")]
    ServerRejected { status: u16, message: String },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The request never completed: connection refused, DNS failure,
    /// broken stream while reading the response body.
    #[error("Error during conversion: {reason}")]
    Transport { reason: String },

    /// The request exceeded the configured timeout.
    #[error("Conversion request timed out after {secs}s\nIncrease request_timeout_secs or --timeout.")]
    RequestTimeout { secs: u64 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not read the selected file from disk.
    #[error("Failed to read '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the downloaded artifact.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
