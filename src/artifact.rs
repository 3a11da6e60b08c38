//! The converted artifact: the response body held in memory between a
//! successful conversion and its download (or discard).
//!
//! ## Ownership contract
//!
//! An [`Artifact`] is owned exclusively by the [`crate::session::UploadSession`]
//! that produced it, as an `Option<Artifact>`. Releasing it is `Option::take`
//! followed by drop — structurally exactly-once, so no code path can free the
//! bytes twice or leak them past the session's return to idle.

use crate::error::ConvertError;
use std::path::{Path, PathBuf};

/// A converted document returned by the conversion endpoint.
#[derive(Debug, Clone)]
pub struct Artifact {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl Artifact {
    pub(crate) fn new(filename: String, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename,
            content_type,
            bytes,
        }
    }

    /// Download name derived from the response (header token or original
    /// stem + target extension).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// `Content-Type` the server sent with the artifact, when present.
    /// The doc2pdf service sends `application/pdf`.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Raw artifact bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the artifact in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the artifact, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Write the artifact into `dir` under its derived filename.
    ///
    /// Uses atomic write (temp file + rename) so a crash mid-write never
    /// leaves a partial document behind. Returns the final path.
    pub async fn write_into(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ConvertError> {
        let path = dir.as_ref().join(&self.filename);
        self.write_to(&path).await?;
        Ok(path)
    }

    /// Write the artifact to an explicit path, atomically.
    pub async fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ConvertError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    ConvertError::OutputWriteFailed {
                        path: path.to_path_buf(),
                        source: e,
                    }
                })?;
            }
        }

        let tmp_path = path.with_extension("part");
        tokio::fs::write(&tmp_path, &self.bytes)
            .await
            .map_err(|e| ConvertError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| ConvertError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })
    }
}
