//! One-shot conversion entry points.
//!
//! These wrap a full select → submit → download cycle in a single call for
//! callers that do not need to drive the [`crate::session::UploadSession`]
//! state machine themselves. The session API remains the right choice when
//! the caller wants to inspect the artifact before deciding to write it, or
//! to discard it with `convert_another`.

use crate::artifact::Artifact;
use crate::config::ClientConfig;
use crate::error::ConvertError;
use crate::session::{DownloadReceipt, UploadSession};
use std::path::Path;

/// Convert a local document via the configured endpoint.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input`  — Path to the document to upload
/// * `config` — Client configuration (endpoint, timeout, …)
///
/// # Errors
/// Any [`ConvertError`]: precondition failures (missing file), the server's
/// verbatim rejection message, or a transport failure. Nothing is retried.
pub async fn convert(
    input: impl AsRef<Path>,
    config: &ClientConfig,
) -> Result<Artifact, ConvertError> {
    let mut session = UploadSession::new(config.clone())?;
    session.select(input)?;
    session.submit().await?;
    session
        .take_artifact()
        .ok_or_else(|| ConvertError::Internal("submit succeeded without an artifact".into()))
}

/// Convert a local document and write the artifact into `output_dir` under
/// its derived download name. Returns a [`DownloadReceipt`].
pub async fn convert_to_dir(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &ClientConfig,
) -> Result<DownloadReceipt, ConvertError> {
    let mut session = UploadSession::new(config.clone())?;
    session.select(input)?;
    session.submit().await?;
    session.download_to(output_dir).await
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input: impl AsRef<Path>,
    config: &ClientConfig,
) -> Result<Artifact, ConvertError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(input, config))
}
