//! The upload session: a single-owner state machine around one conversion
//! cycle (select → submit → download or discard).
//!
//! ## Why a state machine?
//!
//! The session moves `Idle → Submitting → Success → Idle`. Operations check
//! the state explicitly and reject illegal transitions with
//! [`ConvertError::WrongState`], so a double submit is a typed error rather
//! than something incidentally prevented by a disabled control. `&mut self`
//! on every transition means a second submission structurally cannot start
//! while one is in flight.
//!
//! ## Resource contract
//!
//! The converted [`Artifact`] is the only externally significant resource
//! the session holds. Every path that leaves `Success` — [`download_to`] or
//! [`convert_another`] — releases it exactly once via `Option::take`, and
//! `submit` only runs from `Idle`, so a new artifact is never created while
//! a previous one is still held.
//!
//! [`download_to`]: UploadSession::download_to
//! [`convert_another`]: UploadSession::convert_another

use crate::artifact::Artifact;
use crate::config::ClientConfig;
use crate::error::ConvertError;
use crate::filename;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Lifecycle state of an [`UploadSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No request in flight, no artifact held. The only state that accepts
    /// a submit.
    Idle,
    /// A request is in flight. Entered and left inside [`UploadSession::submit`].
    Submitting,
    /// A converted artifact is held, awaiting download or discard.
    Success,
}

impl SessionState {
    fn name(self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Submitting => "Submitting",
            SessionState::Success => "Success",
        }
    }
}

/// The file currently selected for conversion.
#[derive(Debug, Clone)]
struct PendingFile {
    path: PathBuf,
    /// Display name (final path component), also sent as the multipart
    /// part's filename and used for the fallback download name.
    name: String,
}

/// Outcome of a completed download, serialisable for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadReceipt {
    /// Derived download name.
    pub filename: String,
    /// Where the artifact was written.
    pub path: PathBuf,
    /// Size written, in bytes.
    pub bytes: usize,
    /// Wall-clock time of the conversion request, in milliseconds.
    pub duration_ms: u64,
}

/// One upload cycle against a conversion endpoint.
///
/// # Example
/// ```rust,no_run
/// use doc2pdf_client::{ClientConfig, UploadSession};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::default();
///     let mut session = UploadSession::new(config)?;
///     session.select("report.docx")?;
///     session.submit().await?;
///     let receipt = session.download_to(".").await?;
///     println!("saved {} ({} bytes)", receipt.filename, receipt.bytes);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct UploadSession {
    config: ClientConfig,
    client: reqwest::Client,
    state: SessionState,
    pending: Option<PendingFile>,
    artifact: Option<Artifact>,
    /// Duration of the last successful submit, for the receipt.
    last_submit_ms: u64,
}

impl UploadSession {
    /// Create a session with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ConvertError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConvertError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            config,
            client,
            state: SessionState::Idle,
            pending: None,
            artifact: None,
            last_submit_ms: 0,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Display name of the selected file, if any.
    pub fn selected_name(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.name.as_str())
    }

    /// The held artifact, if the session is in `Success`.
    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// Derived download name of the held artifact, if any.
    pub fn download_name(&self) -> Option<&str> {
        self.artifact.as_ref().map(|a| a.filename())
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Select a file for conversion, validating it exists and is readable.
    ///
    /// Replaces any previous selection. Only legal in `Idle`.
    pub fn select(&mut self, path: impl AsRef<Path>) -> Result<(), ConvertError> {
        if self.state != SessionState::Idle {
            return Err(ConvertError::WrongState {
                operation: "select a file",
                state: self.state.name(),
            });
        }

        let path = path.as_ref().to_path_buf();
        match std::fs::File::open(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(ConvertError::PermissionDenied { path });
            }
            Err(_) => {
                return Err(ConvertError::FileNotFound { path });
            }
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ConvertError::FileNotFound { path: path.clone() })?;

        debug!("Selected: {}", name);
        self.pending = Some(PendingFile { path, name });
        Ok(())
    }

    /// Select exactly the first path of a provided set (picker or drop set).
    ///
    /// Returns `Ok(true)` when a file was selected, `Ok(false)` when the set
    /// was empty — an empty set leaves the current selection unchanged and
    /// is not an error.
    pub fn select_first<I, P>(&mut self, paths: I) -> Result<bool, ConvertError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        match paths.into_iter().next() {
            Some(first) => {
                self.select(first)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ── Submit ────────────────────────────────────────────────────────────

    /// Submit the selected file to the conversion endpoint.
    ///
    /// Precondition: a file is selected and the session is `Idle` — otherwise
    /// the operation is rejected and **no request is sent**.
    ///
    /// On success the session enters `Success` holding the converted
    /// [`Artifact`]. On a server-reported or transport failure the session
    /// resets to `Idle` (selection cleared) so the caller can resubmit,
    /// and the error carries the server's message verbatim.
    pub async fn submit(&mut self) -> Result<&Artifact, ConvertError> {
        if self.state != SessionState::Idle {
            return Err(ConvertError::WrongState {
                operation: "submit",
                state: self.state.name(),
            });
        }
        let pending = self.pending.clone().ok_or(ConvertError::NoFileSelected)?;

        // Read before entering Submitting: a vanished file is a precondition
        // failure, not a failed attempt, and keeps the selection intact.
        let bytes = tokio::fs::read(&pending.path).await.map_err(|e| {
            ConvertError::InputReadFailed {
                path: pending.path.clone(),
                source: e,
            }
        })?;

        self.state = SessionState::Submitting;
        let start = Instant::now();
        info!(
            "Submitting '{}' ({} bytes) to {}",
            pending.name,
            bytes.len(),
            self.config.endpoint
        );

        let part = multipart::Part::bytes(bytes).file_name(pending.name.clone());
        let form = multipart::Form::new().part(self.config.field_name.clone(), part);

        let response = match self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                self.reset();
                return Err(self.map_transport_error(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Server rejected conversion: HTTP {} — {}", status, message);
            self.reset();
            return Err(ConvertError::ServerRejected {
                status: status.as_u16(),
                message,
            });
        }

        // Headers must be read before the body consumes the response.
        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                self.reset();
                return Err(self.map_transport_error(e));
            }
        };

        let name = filename::download_name(
            disposition.as_deref(),
            &pending.name,
            &self.config.target_extension,
        );

        self.last_submit_ms = start.elapsed().as_millis() as u64;
        info!(
            "Converted '{}' → '{}' ({} bytes, {}ms)",
            pending.name,
            name,
            body.len(),
            self.last_submit_ms
        );

        // submit only runs from Idle, and every path out of Success releases
        // the artifact, so no prior artifact can be held here.
        debug_assert!(self.artifact.is_none());
        self.state = SessionState::Success;
        Ok(self.artifact.insert(Artifact::new(name, content_type, body.to_vec())))
    }

    /// Synchronous wrapper around [`submit`](Self::submit).
    ///
    /// Creates a temporary tokio runtime internally.
    pub fn submit_sync(&mut self) -> Result<(), ConvertError> {
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ConvertError::Internal(format!("Failed to create tokio runtime: {e}")))?;
        rt.block_on(self.submit())?;
        Ok(())
    }

    // ── Success-state operations ──────────────────────────────────────────

    /// Write the held artifact into `dir` under its derived filename, then
    /// release it and return to `Idle`.
    ///
    /// If the write fails the artifact stays held and the session remains in
    /// `Success`, so the caller can retry with a different destination.
    pub async fn download_to(
        &mut self,
        dir: impl AsRef<Path>,
    ) -> Result<DownloadReceipt, ConvertError> {
        let artifact = self.artifact.as_ref().ok_or(ConvertError::NoArtifact)?;
        let path = artifact.write_into(dir).await?;

        // Write succeeded — release exactly once and return to Idle.
        let artifact = self.artifact.take().expect("artifact checked above");
        let receipt = DownloadReceipt {
            filename: artifact.filename().to_string(),
            path,
            bytes: artifact.len(),
            duration_ms: self.last_submit_ms,
        };
        self.reset();
        info!("Downloaded '{}' to {}", receipt.filename, receipt.path.display());
        Ok(receipt)
    }

    /// Take ownership of the held artifact, returning the session to `Idle`.
    ///
    /// The transfer counts as the release: the session no longer holds the
    /// artifact, and a new submit may start.
    pub fn take_artifact(&mut self) -> Option<Artifact> {
        let artifact = self.artifact.take();
        self.reset();
        artifact
    }

    /// Discard any held artifact and return to `Idle` without downloading.
    ///
    /// A no-op when no artifact is held — calling it from `Idle` is legal
    /// and still leaves the session in `Idle`.
    pub fn convert_another(&mut self) {
        if self.artifact.take().is_some() {
            debug!("Released converted artifact without downloading");
        }
        self.reset();
    }

    /// Clear the selection and, when no artifact is held, return to `Idle`.
    ///
    /// Does not touch a held artifact — release belongs to
    /// [`download_to`](Self::download_to), [`take_artifact`](Self::take_artifact)
    /// and [`convert_another`](Self::convert_another) — so from `Success` the
    /// session stays in `Success` until one of those runs.
    pub fn reset(&mut self) {
        self.pending = None;
        self.state = if self.artifact.is_some() {
            SessionState::Success
        } else {
            SessionState::Idle
        };
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    fn map_transport_error(&self, e: reqwest::Error) -> ConvertError {
        if e.is_timeout() {
            ConvertError::RequestTimeout {
                secs: self.config.request_timeout_secs,
            }
        } else {
            ConvertError::Transport {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn session() -> UploadSession {
        UploadSession::new(ClientConfig::default()).unwrap()
    }

    fn temp_doc(name: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"fake docx bytes").unwrap();
        (dir, path)
    }

    #[test]
    fn new_session_starts_idle_and_empty() {
        let s = session();
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.selected_name().is_none());
        assert!(s.artifact().is_none());
    }

    #[test]
    fn select_nonexistent_file_fails() {
        let mut s = session();
        let err = s.select("/definitely/not/a/real/file.docx").unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
        assert!(s.selected_name().is_none());
    }

    #[test]
    fn select_updates_displayed_name() {
        let (_dir, path) = temp_doc("report.docx");
        let mut s = session();
        s.select(&path).unwrap();
        assert_eq!(s.selected_name(), Some("report.docx"));
    }

    #[test]
    fn select_first_takes_only_the_first() {
        let (_dir, path) = temp_doc("first.docx");
        let mut s = session();
        let changed = s
            .select_first([path.as_path(), Path::new("/ignored/second.docx")])
            .unwrap();
        assert!(changed);
        assert_eq!(s.selected_name(), Some("first.docx"));
    }

    #[test]
    fn select_first_empty_set_is_a_no_op() {
        let (_dir, path) = temp_doc("kept.docx");
        let mut s = session();
        s.select(&path).unwrap();
        let changed = s.select_first(Vec::<PathBuf>::new()).unwrap();
        assert!(!changed);
        assert_eq!(s.selected_name(), Some("kept.docx"));
    }

    #[tokio::test]
    async fn submit_without_selection_sends_nothing_and_fails() {
        let mut s = session();
        let err = s.submit().await.unwrap_err();
        assert!(matches!(err, ConvertError::NoFileSelected));
        // Precondition failure leaves the session untouched.
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn submit_connection_refused_resets_to_idle() {
        let (_dir, path) = temp_doc("report.docx");
        // Port 9 (discard) is not listening; the connect fails immediately.
        let config = ClientConfig::builder()
            .endpoint("http://127.0.0.1:9/convert")
            .request_timeout_secs(5)
            .build()
            .unwrap();
        let mut s = UploadSession::new(config).unwrap();
        s.select(&path).unwrap();

        let err = s.submit().await.unwrap_err();
        assert!(
            matches!(err, ConvertError::Transport { .. } | ConvertError::RequestTimeout { .. }),
            "got: {err:?}"
        );
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.selected_name().is_none(), "form must be cleared");
    }

    #[test]
    fn convert_another_without_artifact_is_idempotent() {
        let mut s = session();
        s.convert_another();
        s.convert_another();
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.artifact().is_none());
    }

    #[tokio::test]
    async fn download_without_artifact_fails() {
        let mut s = session();
        let err = s.download_to(".").await.unwrap_err();
        assert!(matches!(err, ConvertError::NoArtifact));
    }

    #[test]
    fn reset_clears_selection_but_keeps_state_consistent() {
        let (_dir, path) = temp_doc("report.docx");
        let mut s = session();
        s.select(&path).unwrap();
        s.reset();
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.selected_name().is_none());
    }
}
